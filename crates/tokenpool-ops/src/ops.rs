//! Administrative operations on deployed tokens, pools and registries.
//!
//! Every operation maps validated parameters to exactly one call on a fixed interface.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::{
    build_transaction,
    constants::token::{BURNER_ROLE, MINTER_ROLE},
    AcceptAdminParams, AddRemotePoolsParams, AdminRegistration, AllowListParams,
    ChainUpdateParams, Contract, InterfaceRegistry, MintParams, RateLimiterParams,
    RegisterAdminParams, Result, RoleGrantParams, RoleType, SetPoolParams, TransactionRecord,
};

/// A single encoded call together with the method it invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    /// Interface the call is encoded against
    pub contract: Contract,
    /// Method name
    pub function: &'static str,
    /// The transaction
    pub transaction: TransactionRecord,
}

/// Builds operation transactions against the interface registry.
#[derive(Debug, Clone, Copy)]
pub struct Operations<'a> {
    registry: &'a InterfaceRegistry,
}

impl<'a> Operations<'a> {
    /// Creates a builder over `registry`.
    pub const fn new(registry: &'a InterfaceRegistry) -> Self {
        Self { registry }
    }

    fn call(
        &self,
        to: Address,
        contract: Contract,
        function: &'static str,
        args: &[DynSolValue],
    ) -> Result<PreparedCall> {
        let data = self.registry.encode_call(contract, function, args)?;
        debug!(%to, contract = %contract, function, "Prepared call");
        Ok(PreparedCall { contract, function, transaction: build_transaction(to, data, None, None) })
    }

    /// `TokenPool.applyChainUpdates` on `pool`.
    pub fn chain_update(&self, pool: Address, params: &ChainUpdateParams) -> Result<PreparedCall> {
        let remove = params
            .remove
            .iter()
            .map(|selector| DynSolValue::Uint(U256::from(*selector), 64))
            .collect();
        let add = params.add.iter().map(|update| update.to_sol()).collect();
        self.call(
            pool,
            Contract::TokenPool,
            "applyChainUpdates",
            &[DynSolValue::Array(remove), DynSolValue::Array(add)],
        )
    }

    /// One `TokenPool.addRemotePool` call on `pool` per remote pool, in input order.
    pub fn add_remote_pools(
        &self,
        pool: Address,
        params: &AddRemotePoolsParams,
    ) -> Result<Vec<PreparedCall>> {
        params
            .pools
            .iter()
            .map(|remote| {
                self.call(
                    pool,
                    Contract::TokenPool,
                    "addRemotePool",
                    &[
                        DynSolValue::Uint(U256::from(remote.remote_chain_selector), 64),
                        DynSolValue::Bytes(remote.remote_pool_address.clone()),
                    ],
                )
            })
            .collect()
    }

    /// `TokenPool.setChainRateLimiterConfig` on `pool`.
    pub fn rate_limiter(&self, pool: Address, params: &RateLimiterParams) -> Result<PreparedCall> {
        self.call(
            pool,
            Contract::TokenPool,
            "setChainRateLimiterConfig",
            &[
                DynSolValue::Uint(U256::from(params.remote_chain_selector), 64),
                params.outbound.to_sol(),
                params.inbound.to_sol(),
            ],
        )
    }

    /// `TokenPool.applyAllowListUpdates` on `pool`.
    pub fn allow_list(&self, pool: Address, params: &AllowListParams) -> Result<PreparedCall> {
        let list = |addresses: &[Address]| {
            DynSolValue::Array(addresses.iter().copied().map(DynSolValue::Address).collect())
        };
        self.call(
            pool,
            Contract::TokenPool,
            "applyAllowListUpdates",
            &[list(&params.removes), list(&params.adds)],
        )
    }

    /// `BurnMintERC20.mint` on `token`.
    pub fn mint(&self, token: Address, params: &MintParams) -> Result<PreparedCall> {
        self.call(
            token,
            Contract::BurnMintErc20,
            "mint",
            &[DynSolValue::Address(params.receiver), DynSolValue::Uint(params.amount, 256)],
        )
    }

    /// Grants the requested minter and/or burner role on `token`.
    pub fn grant_roles(&self, token: Address, params: &RoleGrantParams) -> Result<PreparedCall> {
        let account = DynSolValue::Address(params.account);
        let role = match params.role {
            RoleType::MintAndBurn => {
                return self.call(token, Contract::BurnMintErc20, "grantMintAndBurnRoles", &[account]);
            }
            RoleType::Mint => MINTER_ROLE,
            RoleType::Burn => BURNER_ROLE,
        };
        self.call(
            token,
            Contract::BurnMintErc20,
            "grantRole",
            &[DynSolValue::FixedBytes(role, 32), account],
        )
    }

    /// Proposes the token administrator through `module`.
    pub fn register_admin(
        &self,
        module: Address,
        params: &RegisterAdminParams,
    ) -> Result<PreparedCall> {
        let function = match params.method {
            AdminRegistration::GetCcipAdmin => "registerAdminViaGetCCIPAdmin",
            AdminRegistration::Owner => "registerAdminViaOwner",
        };
        self.call(
            module,
            Contract::RegistryModuleOwnerCustom,
            function,
            &[DynSolValue::Address(params.token)],
        )
    }

    /// `TokenAdminRegistry.acceptAdminRole` on `registry`.
    pub fn accept_admin(&self, registry: Address, params: &AcceptAdminParams) -> Result<PreparedCall> {
        self.call(
            registry,
            Contract::TokenAdminRegistry,
            "acceptAdminRole",
            &[DynSolValue::Address(params.token)],
        )
    }

    /// `TokenAdminRegistry.setPool` on `registry`.
    pub fn set_pool(&self, registry: Address, params: &SetPoolParams) -> Result<PreparedCall> {
        self.call(
            registry,
            Contract::TokenAdminRegistry,
            "setPool",
            &[DynSolValue::Address(params.token), DynSolValue::Address(params.pool)],
        )
    }
}
