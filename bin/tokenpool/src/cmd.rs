use clap::{Parser, Subcommand};
use tokenpool_ops::{
    AcceptAdminParams, AddRemotePoolsParams, AllowListParams, ChainUpdateParams,
    InterfaceRegistry, MintParams, RateLimiterParams, RegisterAdminParams, RoleGrantParams,
    SetPoolParams,
};

use crate::{
    DeployPoolCmd, DeployTokenAndPoolCmd, DeployTokenCmd, LogArgs, OpCmd, PredictCmd, Result,
};

/// Offline transaction builder for cross-chain token pools
#[derive(Parser, Debug)]
#[command(infer_subcommands = true, version)]
pub struct MainCmd {
    /// Logging configuration
    #[command(flatten)]
    pub log: LogArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Command enumeration for the tokenpool CLI tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Predict a CREATE2 factory deployment address
    PredictAddress(PredictCmd),
    /// Deploy a token
    DeployToken(DeployTokenCmd),
    /// Deploy a pool for an existing token
    DeployPool(DeployPoolCmd),
    /// Deploy a token and its pool
    DeployTokenAndPool(DeployTokenAndPoolCmd),
    /// Connect or disconnect remote chains on a pool
    ChainUpdate(OpCmd),
    /// Add remote pools for already connected chains, one transaction per pool
    AddRemotePool(OpCmd),
    /// Update the rate limits of a remote chain on a pool
    RateLimiter(OpCmd),
    /// Update the allow list of a pool
    AllowList(OpCmd),
    /// Mint tokens
    Mint(OpCmd),
    /// Grant mint and/or burn roles on a token
    GrantRoles(OpCmd),
    /// Propose the token administrator through the registry module
    RegisterAdmin(OpCmd),
    /// Accept the token administrator role
    AcceptAdmin(OpCmd),
    /// Assign a pool to a token in the token admin registry
    SetPool(OpCmd),
}

impl MainCmd {
    /// Execute the command. Logging must be initialized by the caller.
    pub fn run(&self) -> Result<()> {
        let registry = InterfaceRegistry::load()?;
        self.command.run(&registry)
    }
}

impl Command {
    /// Execute the command against the interface registry
    pub fn run(&self, registry: &InterfaceRegistry) -> Result<()> {
        match self {
            Self::PredictAddress(cmd) => cmd.run(registry),
            Self::DeployToken(cmd) => cmd.run(registry),
            Self::DeployPool(cmd) => cmd.run(registry),
            Self::DeployTokenAndPool(cmd) => cmd.run(registry),
            Self::ChainUpdate(cmd) => cmd.run(registry, "Apply chain updates", |ops, to, input| {
                ops.chain_update(to, &ChainUpdateParams::from_json(input)?)
            }),
            Self::AddRemotePool(cmd) => {
                cmd.run_many(registry, "Add remote pools", |ops, to, input| {
                    ops.add_remote_pools(to, &AddRemotePoolsParams::from_json(input)?)
                })
            }
            Self::RateLimiter(cmd) => cmd.run(registry, "Set rate limits", |ops, to, input| {
                ops.rate_limiter(to, &RateLimiterParams::from_json(input)?)
            }),
            Self::AllowList(cmd) => cmd.run(registry, "Update allow list", |ops, to, input| {
                ops.allow_list(to, &AllowListParams::from_json(input)?)
            }),
            Self::Mint(cmd) => cmd.run(registry, "Mint tokens", |ops, to, input| {
                ops.mint(to, &MintParams::from_json(input)?)
            }),
            Self::GrantRoles(cmd) => cmd.run(registry, "Grant roles", |ops, to, input| {
                ops.grant_roles(to, &RoleGrantParams::from_json(input)?)
            }),
            Self::RegisterAdmin(cmd) => cmd.run(registry, "Register admin", |ops, to, input| {
                ops.register_admin(to, &RegisterAdminParams::from_json(input)?)
            }),
            Self::AcceptAdmin(cmd) => cmd.run(registry, "Accept admin role", |ops, to, input| {
                ops.accept_admin(to, &AcceptAdminParams::from_json(input)?)
            }),
            Self::SetPool(cmd) => cmd.run(registry, "Set pool", |ops, to, input| {
                ops.set_pool(to, &SetPoolParams::from_json(input)?)
            }),
        }
    }
}
