//! Deployment transaction assembly.
//!
//! A combined deployment runs in three stages, stopping at the first failure:
//!
//! 1. validate the token and pool parameters,
//! 2. encode the token deployment,
//! 3. predict the token address, inject it into the pool parameters and encode the pool
//!    deployment.
//!
//! Nothing is submitted; the output is the ordered transaction pair for a single multisig batch in
//! which the token deployment strictly precedes the pool deployment.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    build_transaction, AddressScheme, Artifacts, Contract, DeployError, DeployStage,
    InterfaceRegistry, Operation, PoolDeployParams, PoolParams, PoolType, Result,
    TokenAndPoolDeployParams, TokenDeployParams, TokenParams, TransactionRecord,
};

impl AddressScheme {
    /// Contract and method that perform a deployment under this scheme.
    pub const fn deployment_method(&self) -> (Contract, &'static str) {
        match self {
            Self::Create2 { .. } => (Contract::Create2Factory, "deployContract"),
            Self::Nonce { .. } => (Contract::CreateCall, "performCreate"),
        }
    }

    /// Builds the transaction that deploys `init_code` under this scheme.
    ///
    /// The CREATE2 path calls the factory; the nonce path delegate-calls `CreateCall` so that the
    /// contract is created from the multisig itself.
    pub fn deployment_transaction(
        &self,
        registry: &InterfaceRegistry,
        init_code: Bytes,
    ) -> Result<TransactionRecord> {
        let (contract, function) = self.deployment_method();
        let tx = match *self {
            Self::Create2 { factory, salt, .. } => {
                let data = registry.encode_call(
                    contract,
                    function,
                    &[DynSolValue::Bytes(init_code.to_vec()), DynSolValue::FixedBytes(salt, 32)],
                )?;
                build_transaction(factory, data, None, None)
            }
            Self::Nonce { create_call, .. } => {
                let data = registry.encode_call(
                    contract,
                    function,
                    &[DynSolValue::Uint(U256::ZERO, 256), DynSolValue::Bytes(init_code.to_vec())],
                )?;
                build_transaction(create_call, data, None, Some(Operation::DelegateCall))
            }
        };
        Ok(tx)
    }
}

/// One encoded contract deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Deployed contract
    pub contract: Contract,
    /// Predicted address of the deployed contract
    pub address: Address,
    /// Transaction performing the deployment
    pub transaction: TransactionRecord,
}

/// Output of a combined token and pool deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAndPoolDeployment {
    /// Token deployment, executed first
    pub token: Deployment,
    /// Pool deployment, constructed with the predicted token address
    pub pool: Deployment,
}

impl TokenAndPoolDeployment {
    /// The transactions in execution order: token first, then pool.
    pub fn transactions(&self) -> [TransactionRecord; 2] {
        [self.token.transaction.clone(), self.pool.transaction.clone()]
    }

    /// Predicted token address, as embedded in the pool constructor.
    pub fn token_address(&self) -> Address {
        self.token.address
    }
}

/// Assembles deployment transactions from validated parameters.
#[derive(Debug, Clone, Copy)]
pub struct Deployer<'a> {
    registry: &'a InterfaceRegistry,
    artifacts: &'a Artifacts,
}

impl<'a> Deployer<'a> {
    /// Creates a deployer over the given descriptors and bytecode.
    pub const fn new(registry: &'a InterfaceRegistry, artifacts: &'a Artifacts) -> Self {
        Self { registry, artifacts }
    }

    /// Token init code.
    pub fn token_init_code(&self, token: &TokenParams) -> Result<Bytes> {
        let bytecode = self.artifacts.bytecode(Contract::BurnMintErc20)?;
        Ok(self.registry.init_code(Contract::BurnMintErc20, &bytecode, &token.constructor_args())?)
    }

    /// Pool init code for a pool managing `token`.
    pub fn pool_init_code(&self, pool: &PoolParams, token: Address) -> Result<Bytes> {
        let contract = pool_contract(pool.pool_type);
        let bytecode = self.artifacts.bytecode(contract)?;
        Ok(self.registry.init_code(contract, &bytecode, &pool.constructor_args(token))?)
    }

    fn deploy(
        &self,
        scheme: &AddressScheme,
        contract: Contract,
        init_code: Bytes,
        index: u64,
    ) -> Result<Deployment> {
        let address = scheme.predict(&init_code, index);
        let transaction = scheme.deployment_transaction(self.registry, init_code)?;
        debug!(contract = %contract, %address, to = %transaction.to(), "Encoded deployment");
        Ok(Deployment { contract, address, transaction })
    }

    /// Encodes a standalone token deployment.
    pub fn deploy_token(&self, params: &TokenDeployParams) -> Result<Deployment, DeployError> {
        self.token_init_code(&params.token)
            .and_then(|init_code| self.deploy(&params.scheme, Contract::BurnMintErc20, init_code, 0))
            .map_err(|e| DeployError::new(DeployStage::EncodeToken, e))
    }

    /// Encodes a standalone pool deployment for an existing token.
    pub fn deploy_pool(&self, params: &PoolDeployParams) -> Result<Deployment, DeployError> {
        let contract = pool_contract(params.pool.pool_type);
        self.pool_init_code(&params.pool, params.token)
            .and_then(|init_code| self.deploy(&params.scheme, contract, init_code, 0))
            .map_err(|e| DeployError::new(DeployStage::EncodePool, e))
    }

    /// Validates a combined deployment document and encodes both deployments.
    ///
    /// Input: `{ "token": {…}, "pool": {…}, "deployment": {…} }` where the pool's `token` is left
    /// empty.
    pub fn deploy_token_and_pool(
        &self,
        input: &Value,
    ) -> Result<TokenAndPoolDeployment, DeployError> {
        let params = TokenAndPoolDeployParams::from_json(input)
            .map_err(|e| DeployError::new(DeployStage::Validate, e))?;
        self.deploy_token_and_pool_params(&params)
    }

    /// Encodes both deployments from already validated parameters.
    pub fn deploy_token_and_pool_params(
        &self,
        params: &TokenAndPoolDeployParams,
    ) -> Result<TokenAndPoolDeployment, DeployError> {
        let token = self
            .token_init_code(&params.token)
            .and_then(|init_code| self.deploy(&params.scheme, Contract::BurnMintErc20, init_code, 0))
            .map_err(|e| DeployError::new(DeployStage::EncodeToken, e))?;
        info!(token = %token.address, "Token deployment encoded");

        let mut pool_params = params.pool.clone();
        pool_params.token = Some(token.address);
        let contract = pool_contract(pool_params.pool_type);
        let pool = self
            .pool_init_code(&pool_params, token.address)
            .and_then(|init_code| self.deploy(&params.scheme, contract, init_code, 1))
            .map_err(|e| DeployError::new(DeployStage::EncodePool, e))?;
        info!(token = %token.address, pool = %pool.address, "Pool deployment encoded");

        Ok(TokenAndPoolDeployment { token, pool })
    }
}

/// Contract deployed for a pool flavour.
pub const fn pool_contract(pool_type: PoolType) -> Contract {
    match pool_type {
        PoolType::BurnMint => Contract::BurnMintTokenPool,
        PoolType::LockRelease => Contract::LockReleaseTokenPool,
    }
}
