//! Deployment commands.

use std::path::PathBuf;

use clap::Parser;
use tokenpool_ops::{
    AddressScheme, Artifacts, DeployError, DeployStage, Deployer, Deployment, InterfaceRegistry,
    PoolDeployParams, TokenAndPoolDeployParams, TokenDeployParams,
};
use tracing::info;

use crate::{InputArgs, OutputArgs, Result};

/// Compiled artifact location
#[derive(Parser, Debug, Clone)]
pub struct ArtifactArgs {
    /// Directory holding `<Contract>.json` compiler artifacts
    #[arg(long = "artifacts", env = "TOKENPOOL_ARTIFACTS", default_value = "artifacts")]
    pub artifacts: PathBuf,
}

impl ArtifactArgs {
    /// Artifact source rooted at the configured directory.
    pub fn load(&self) -> Artifacts {
        Artifacts::from_dir(&self.artifacts)
    }
}

/// Arguments shared by the deployment commands
#[derive(Parser, Debug, Clone)]
pub struct DeployArgs {
    /// Parameter document
    #[command(flatten)]
    pub input: InputArgs,

    /// Artifact configuration
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Output configuration
    #[command(flatten)]
    pub output: OutputArgs,
}

impl DeployArgs {
    fn announce(&self, label: &str, deployment: &Deployment) {
        info!(contract = %deployment.contract, address = %deployment.address, "Predicted {label} address");
        if self.output.is_calldata() {
            eprintln!("{label}: {}", deployment.address);
        }
    }

    fn write(
        &self,
        registry: &InterfaceRegistry,
        scheme: &AddressScheme,
        deployments: &[&Deployment],
        name: &str,
        description: &str,
    ) -> Result<()> {
        let (contract, function) = scheme.deployment_method();
        let transactions = deployments.iter().map(|d| d.transaction.clone()).collect();
        let functions = vec![function; deployments.len()];
        self.output.write(registry, contract, transactions, &functions, name, description)
    }
}

/// Deploy a burnable and mintable token
#[derive(Parser, Debug)]
pub struct DeployTokenCmd {
    /// Shared deployment arguments
    #[command(flatten)]
    pub args: DeployArgs,
}

impl DeployTokenCmd {
    /// Execute the deploy-token command
    pub fn run(&self, registry: &InterfaceRegistry) -> Result<()> {
        let params = TokenDeployParams::from_json(&self.args.input.load()?)?;
        let artifacts = self.args.artifacts.load();
        let token = Deployer::new(registry, &artifacts).deploy_token(&params)?;
        self.args.announce("token", &token);
        self.args.write(
            registry,
            &params.scheme,
            &[&token],
            &format!("Deploy token {}", params.token.symbol),
            &format!("Deploy {} ({}) at {}", params.token.name, params.token.symbol, token.address),
        )
    }
}

/// Deploy a token pool for an existing token
#[derive(Parser, Debug)]
pub struct DeployPoolCmd {
    /// Shared deployment arguments
    #[command(flatten)]
    pub args: DeployArgs,
}

impl DeployPoolCmd {
    /// Execute the deploy-pool command
    pub fn run(&self, registry: &InterfaceRegistry) -> Result<()> {
        let params = PoolDeployParams::from_json(&self.args.input.load()?)?;
        let artifacts = self.args.artifacts.load();
        let pool = Deployer::new(registry, &artifacts).deploy_pool(&params)?;
        self.args.announce("pool", &pool);
        self.args.write(
            registry,
            &params.scheme,
            &[&pool],
            &format!("Deploy {}", pool.contract),
            &format!("Deploy {} for token {} at {}", pool.contract, params.token, pool.address),
        )
    }
}

/// Deploy a token and its pool in one batch
#[derive(Parser, Debug)]
pub struct DeployTokenAndPoolCmd {
    /// Shared deployment arguments
    #[command(flatten)]
    pub args: DeployArgs,
}

impl DeployTokenAndPoolCmd {
    /// Execute the deploy-token-and-pool command
    pub fn run(&self, registry: &InterfaceRegistry) -> Result<()> {
        let params = TokenAndPoolDeployParams::from_json(&self.args.input.load()?)
            .map_err(|e| DeployError::new(DeployStage::Validate, e))?;
        let artifacts = self.args.artifacts.load();
        let deployment =
            Deployer::new(registry, &artifacts).deploy_token_and_pool_params(&params)?;
        self.args.announce("token", &deployment.token);
        self.args.announce("pool", &deployment.pool);

        self.args.write(
            registry,
            &params.scheme,
            &[&deployment.token, &deployment.pool],
            &format!("Deploy token {} and pool", params.token.symbol),
            &format!(
                "Deploy {} at {} and {} at {}",
                params.token.symbol,
                deployment.token.address,
                deployment.pool.contract,
                deployment.pool.address
            ),
        )
    }
}
