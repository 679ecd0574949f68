//! Typed parameter shapes and their validators.
//!
//! Each `from_json` runs the full structural validation of one input document and applies the
//! documented defaults in the same step. Nothing downstream re-checks the input.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use serde_json::Value;
use tracing::warn;

use crate::{
    constants::{
        deployment::{DEFAULT_CREATE_CALL, DEFAULT_NONCE},
        token::DEFAULT_DECIMALS,
    },
    AddressScheme, InputVariant, Object, ValidationResult,
};

/// Token pool flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolType {
    /// Burns on send, mints on receive
    BurnMint,
    /// Locks on send, releases on receive
    LockRelease,
}

impl InputVariant for PoolType {
    const ALLOWED: &'static str = "BurnMintTokenPool, LockReleaseTokenPool";

    fn from_input(value: &str) -> Option<Self> {
        match value {
            "BurnMintTokenPool" => Some(Self::BurnMint),
            "LockReleaseTokenPool" => Some(Self::LockRelease),
            _ => None,
        }
    }
}

/// Address format of a remote chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainType {
    /// 20-byte hex addresses
    #[default]
    Evm,
    /// 32-byte base58 public keys
    Svm,
}

impl InputVariant for ChainType {
    const ALLOWED: &'static str = "evm, svm";

    fn from_input(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "evm" => Some(Self::Evm),
            "svm" => Some(Self::Svm),
            _ => None,
        }
    }
}

/// Constructor parameters of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParams {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
    /// Supply cap; zero means uncapped
    pub max_supply: U256,
    /// Amount minted to the deployer at construction
    pub pre_mint: U256,
}

impl TokenParams {
    /// Validates a token object.
    pub fn from_object(obj: &Object<'_>) -> ValidationResult<Self> {
        let name = obj.non_empty_string("name")?.to_string();
        let symbol = obj.non_empty_string("symbol")?.to_string();
        let decimals = obj.optional_decimals("decimals")?.unwrap_or(DEFAULT_DECIMALS);
        let max_supply = obj.optional_uint("maxSupply", 256)?.unwrap_or_default();
        let pre_mint = obj.optional_uint("preMint", 256)?.unwrap_or_default();
        if !max_supply.is_zero() && pre_mint > max_supply {
            return Err(obj.invalid("preMint", "must not exceed maxSupply"));
        }
        Ok(Self {
            name,
            symbol,
            decimals,
            max_supply,
            pre_mint,
        })
    }

    /// Constructor arguments in declaration order.
    pub fn constructor_args(&self) -> Vec<DynSolValue> {
        vec![
            DynSolValue::String(self.name.clone()),
            DynSolValue::String(self.symbol.clone()),
            DynSolValue::Uint(U256::from(self.decimals), 8),
            DynSolValue::Uint(self.max_supply, 256),
            DynSolValue::Uint(self.pre_mint, 256),
        ]
    }
}

/// Constructor parameters of a token pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    /// Pool flavour
    pub pool_type: PoolType,
    /// Token the pool manages; `None` until the token address is known
    pub token: Option<Address>,
    /// Decimals of the local token; `None` when inherited from the token
    pub decimals: Option<u8>,
    /// Senders allowed to use the pool; empty disables the allow list
    pub allowlist: Vec<Address>,
    /// Risk management proxy
    pub rmn_proxy: Address,
    /// Cross-chain router
    pub router: Address,
    /// Whether a lock/release pool accepts liquidity
    pub accept_liquidity: bool,
}

impl PoolParams {
    /// Validates a pool object. The token address may be an empty placeholder.
    pub fn from_object(obj: &Object<'_>) -> ValidationResult<Self> {
        let pool_type: PoolType = obj.variant("poolType")?;
        let accept_liquidity = obj.optional_bool("acceptLiquidity")?;
        if pool_type == PoolType::BurnMint && accept_liquidity.is_some() {
            return Err(obj.invalid("acceptLiquidity", "only valid for LockReleaseTokenPool"));
        }
        Ok(Self {
            pool_type,
            token: obj.optional_address("token")?,
            decimals: obj.optional_decimals("decimals")?,
            allowlist: obj.address_list("allowlist")?,
            rmn_proxy: obj.address("rmnProxy")?,
            router: obj.address("router")?,
            accept_liquidity: accept_liquidity.unwrap_or(false),
        })
    }

    /// Constructor arguments in declaration order for `token`.
    pub fn constructor_args(&self, token: Address) -> Vec<DynSolValue> {
        let allowlist =
            DynSolValue::Array(self.allowlist.iter().copied().map(DynSolValue::Address).collect());
        let decimals =
            DynSolValue::Uint(U256::from(self.decimals.unwrap_or(DEFAULT_DECIMALS)), 8);
        let mut args =
            vec![DynSolValue::Address(token), decimals, allowlist, DynSolValue::Address(self.rmn_proxy)];
        if self.pool_type == PoolType::LockRelease {
            args.push(DynSolValue::Bool(self.accept_liquidity));
        }
        args.push(DynSolValue::Address(self.router));
        args
    }
}

/// Parses the `deployment` object selecting the address scheme.
///
/// ```json
/// { "scheme": "create2", "factory": "0x…", "salt": "0x…", "sender": "0x…" }
/// { "scheme": "nonce", "deployer": "0x…", "createCall": "0x…", "nonce": 0 }
/// ```
pub fn address_scheme(obj: &Object<'_>) -> ValidationResult<AddressScheme> {
    match obj.string("scheme")? {
        "create2" => Ok(AddressScheme::Create2 {
            factory: obj.address("factory")?,
            salt: obj.salt("salt")?,
            sender: obj.address("sender")?,
        }),
        "nonce" => {
            let deployer = obj.address("deployer")?;
            let create_call = obj.optional_address("createCall")?.unwrap_or(DEFAULT_CREATE_CALL);
            let nonce = obj.optional_u64_in("nonce", 0..=u64::MAX - 2)?.unwrap_or_else(|| {
                warn!(
                    %deployer,
                    nonce = DEFAULT_NONCE,
                    "No deployer nonce given, predicted addresses assume an unused account"
                );
                DEFAULT_NONCE
            });
            Ok(AddressScheme::Nonce { deployer, create_call, nonce })
        }
        other => Err(obj.invalid("scheme", format!("`{other}` is not one of create2, nonce"))),
    }
}

/// Input of a token deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDeployParams {
    /// Token constructor parameters
    pub token: TokenParams,
    /// Address scheme of the deployment
    pub scheme: AddressScheme,
}

impl TokenDeployParams {
    /// Validates `{ "token": {…}, "deployment": {…} }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        Ok(Self {
            token: TokenParams::from_object(&root.object("token")?)?,
            scheme: address_scheme(&root.object("deployment")?)?,
        })
    }
}

/// Input of a standalone pool deployment, for an already deployed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDeployParams {
    /// Pool constructor parameters
    pub pool: PoolParams,
    /// Address of the existing token
    pub token: Address,
    /// Address scheme of the deployment
    pub scheme: AddressScheme,
}

impl PoolDeployParams {
    /// Validates `{ "pool": {…, "token": "0x…"}, "deployment": {…} }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let pool_obj = root.object("pool")?;
        let pool = PoolParams::from_object(&pool_obj)?;
        let token = pool_obj.address("token")?;
        Ok(Self { pool, token, scheme: address_scheme(&root.object("deployment")?)? })
    }
}

/// Input of a combined token and pool deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAndPoolDeployParams {
    /// Token constructor parameters
    pub token: TokenParams,
    /// Pool constructor parameters; `token` is still the placeholder
    pub pool: PoolParams,
    /// Address scheme shared by both deployments
    pub scheme: AddressScheme,
}

impl TokenAndPoolDeployParams {
    /// Validates `{ "token": {…}, "pool": {…}, "deployment": {…} }`.
    ///
    /// The pool's `token` must be left empty and its decimals default to the token's.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let token = TokenParams::from_object(&root.object("token")?)?;
        let pool_obj = root.object("pool")?;
        let mut pool = PoolParams::from_object(&pool_obj)?;
        if pool.token.is_some() {
            return Err(pool_obj.invalid("token", "must be empty, the token address is predicted"));
        }
        match pool.decimals {
            Some(decimals) if decimals != token.decimals => {
                return Err(pool_obj.invalid("decimals", "must match token.decimals"));
            }
            _ => pool.decimals = Some(token.decimals),
        }
        Ok(Self { token, pool, scheme: address_scheme(&root.object("deployment")?)? })
    }
}

/// Token bucket rate limiter settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Whether the limiter is active
    pub is_enabled: bool,
    /// Bucket capacity
    pub capacity: u128,
    /// Refill rate per second
    pub rate: u128,
}

impl RateLimiterConfig {
    /// Validates an optional rate limiter object; absent means disabled.
    pub fn from_object(obj: Option<&Object<'_>>) -> ValidationResult<Self> {
        let Some(obj) = obj else {
            return Ok(Self::default());
        };
        let is_enabled = obj.optional_bool("isEnabled")?.unwrap_or(false);
        // uint128 bounds are enforced by the validator
        let capacity = obj.optional_uint("capacity", 128)?.unwrap_or_default().to::<u128>();
        let rate = obj.optional_uint("rate", 128)?.unwrap_or_default().to::<u128>();
        if is_enabled {
            if rate == 0 {
                return Err(obj.invalid("rate", "must be positive when enabled"));
            }
            if rate > capacity {
                return Err(obj.invalid("rate", "must not exceed capacity"));
            }
        } else if capacity != 0 || rate != 0 {
            return Err(obj.invalid("isEnabled", "disabled limiter must have zero capacity and rate"));
        }
        Ok(Self { is_enabled, capacity, rate })
    }

    /// ABI tuple `(bool isEnabled, uint128 capacity, uint128 rate)`.
    pub fn to_sol(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Bool(self.is_enabled),
            DynSolValue::Uint(U256::from(self.capacity), 128),
            DynSolValue::Uint(U256::from(self.rate), 128),
        ])
    }
}

/// Encodes a remote address into the bytes the pool stores for it.
///
/// EVM addresses are ABI-encoded (left-padded to 32 bytes); SVM keys are the raw 32 bytes.
pub fn encode_remote_address(
    obj: &Object<'_>,
    key: &str,
    raw: &str,
    chain_type: ChainType,
) -> ValidationResult<Vec<u8>> {
    match chain_type {
        ChainType::Evm => {
            let address = crate::parse_address(raw)
                .map_err(|e| obj.invalid(key, format!("`{raw}` is not an EVM address: {e}")))?;
            Ok(B256::left_padding_from(address.as_slice()).to_vec())
        }
        ChainType::Svm => {
            let bytes = bs58::decode(raw)
                .into_vec()
                .map_err(|e| obj.invalid(key, format!("`{raw}` is not base58: {e}")))?;
            if bytes.len() != 32 {
                return Err(obj.invalid(
                    key,
                    format!("`{raw}` decodes to {} bytes, expected 32", bytes.len()),
                ));
            }
            Ok(bytes)
        }
    }
}

/// One remote chain to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainUpdate {
    /// Remote chain selector
    pub remote_chain_selector: u64,
    /// Encoded remote pool addresses
    pub remote_pool_addresses: Vec<Vec<u8>>,
    /// Encoded remote token address
    pub remote_token_address: Vec<u8>,
    /// Outbound rate limit
    pub outbound: RateLimiterConfig,
    /// Inbound rate limit
    pub inbound: RateLimiterConfig,
}

impl ChainUpdate {
    fn from_object(obj: &Object<'_>) -> ValidationResult<Self> {
        let chain_type: ChainType = obj.optional_variant("remoteChainType")?.unwrap_or_default();
        let pools = obj.strings("remotePoolAddresses")?;
        if pools.is_empty() {
            return Err(obj.invalid("remotePoolAddresses", "at least one remote pool is required"));
        }
        let remote_pool_addresses = pools
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                encode_remote_address(obj, &format!("remotePoolAddresses[{i}]"), raw, chain_type)
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        let token = obj.string("remoteTokenAddress")?;
        Ok(Self {
            remote_chain_selector: obj.chain_selector("remoteChainSelector")?,
            remote_pool_addresses,
            remote_token_address: encode_remote_address(obj, "remoteTokenAddress", token, chain_type)?,
            outbound: RateLimiterConfig::from_object(
                obj.optional_object("outboundRateLimiterConfig")?.as_ref(),
            )?,
            inbound: RateLimiterConfig::from_object(
                obj.optional_object("inboundRateLimiterConfig")?.as_ref(),
            )?,
        })
    }

    /// ABI tuple of `TokenPool.ChainUpdate`.
    pub fn to_sol(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(self.remote_chain_selector), 64),
            DynSolValue::Array(
                self.remote_pool_addresses.iter().cloned().map(DynSolValue::Bytes).collect(),
            ),
            DynSolValue::Bytes(self.remote_token_address.clone()),
            self.outbound.to_sol(),
            self.inbound.to_sol(),
        ])
    }
}

/// Input of `applyChainUpdates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainUpdateParams {
    /// Selectors of chains to disconnect
    pub remove: Vec<u64>,
    /// Chains to connect
    pub add: Vec<ChainUpdate>,
}

impl ChainUpdateParams {
    /// Validates `{ "remoteChainSelectorsToRemove": [...], "chainsToAdd": [...] }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let remove = root.chain_selector_list("remoteChainSelectorsToRemove")?;
        let add = root
            .objects("chainsToAdd", false)?
            .iter()
            .map(ChainUpdate::from_object)
            .collect::<ValidationResult<Vec<_>>>()?;
        if remove.is_empty() && add.is_empty() {
            return Err(root.invalid("chainsToAdd", "nothing to add or remove"));
        }
        Ok(Self { remove, add })
    }
}

/// One remote pool to register for an already connected chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePool {
    /// Remote chain selector
    pub remote_chain_selector: u64,
    /// Encoded remote pool address
    pub remote_pool_address: Vec<u8>,
}

/// Input of a batch of `addRemotePool` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRemotePoolsParams {
    /// Pools to add, one transaction each, in input order
    pub pools: Vec<RemotePool>,
}

impl AddRemotePoolsParams {
    /// Validates `{ "remotePools": [{ "remoteChainSelector": "…", "remotePoolAddress": "…" }] }`.
    ///
    /// Each entry may carry `remoteChainType` (`evm` by default).
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let pools = root
            .objects("remotePools", true)?
            .iter()
            .map(|obj| -> ValidationResult<RemotePool> {
                let chain_type: ChainType =
                    obj.optional_variant("remoteChainType")?.unwrap_or_default();
                let raw = obj.string("remotePoolAddress")?;
                Ok(RemotePool {
                    remote_chain_selector: obj.chain_selector("remoteChainSelector")?,
                    remote_pool_address: encode_remote_address(
                        obj,
                        "remotePoolAddress",
                        raw,
                        chain_type,
                    )?,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        if pools.is_empty() {
            return Err(root.invalid("remotePools", "at least one remote pool is required"));
        }
        Ok(Self { pools })
    }
}

/// Input of `setChainRateLimiterConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterParams {
    /// Remote chain selector
    pub remote_chain_selector: u64,
    /// Outbound rate limit
    pub outbound: RateLimiterConfig,
    /// Inbound rate limit
    pub inbound: RateLimiterConfig,
}

impl RateLimiterParams {
    /// Validates `{ "remoteChainSelector": "…", "outboundConfig": {…}, "inboundConfig": {…} }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        Ok(Self {
            remote_chain_selector: root.chain_selector("remoteChainSelector")?,
            outbound: RateLimiterConfig::from_object(root.optional_object("outboundConfig")?.as_ref())?,
            inbound: RateLimiterConfig::from_object(root.optional_object("inboundConfig")?.as_ref())?,
        })
    }
}

/// Input of `applyAllowListUpdates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowListParams {
    /// Senders to remove
    pub removes: Vec<Address>,
    /// Senders to add
    pub adds: Vec<Address>,
}

impl AllowListParams {
    /// Validates `{ "removes": [...], "adds": [...] }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let removes = root.address_list("removes")?;
        let adds = root.address_list("adds")?;
        if removes.is_empty() && adds.is_empty() {
            return Err(root.invalid("adds", "nothing to add or remove"));
        }
        Ok(Self { removes, adds })
    }
}

/// Input of `mint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintParams {
    /// Recipient
    pub receiver: Address,
    /// Amount in the token's smallest unit
    pub amount: U256,
}

impl MintParams {
    /// Validates `{ "receiver": "0x…", "amount": "…" }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        let amount = root.uint("amount", 256)?;
        if amount.is_zero() {
            return Err(root.invalid("amount", "must be positive"));
        }
        Ok(Self { receiver: root.address("receiver")?, amount })
    }
}

/// Which token role to grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleType {
    /// Both minter and burner
    #[default]
    MintAndBurn,
    /// Minter only
    Mint,
    /// Burner only
    Burn,
}

impl InputVariant for RoleType {
    const ALLOWED: &'static str = "mintAndBurn, mint, burn";

    fn from_input(value: &str) -> Option<Self> {
        match value {
            "mintAndBurn" => Some(Self::MintAndBurn),
            "mint" => Some(Self::Mint),
            "burn" => Some(Self::Burn),
            _ => None,
        }
    }
}

/// Input of a role grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrantParams {
    /// Grantee, usually the pool
    pub account: Address,
    /// Role to grant
    pub role: RoleType,
}

impl RoleGrantParams {
    /// Validates `{ "account": "0x…", "roleType": "mintAndBurn" }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        Ok(Self {
            account: root.address("account")?,
            role: root.optional_variant("roleType")?.unwrap_or_default(),
        })
    }
}

/// How the registry module verifies the prospective administrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminRegistration {
    /// Via the token's `getCCIPAdmin()`
    #[default]
    GetCcipAdmin,
    /// Via the token's `owner()`
    Owner,
}

impl InputVariant for AdminRegistration {
    const ALLOWED: &'static str = "getCCIPAdmin, owner";

    fn from_input(value: &str) -> Option<Self> {
        match value {
            "getCCIPAdmin" => Some(Self::GetCcipAdmin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }
}

/// Input of an administrator registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterAdminParams {
    /// Token to register
    pub token: Address,
    /// Verification method
    pub method: AdminRegistration,
}

impl RegisterAdminParams {
    /// Validates `{ "token": "0x…", "method": "getCCIPAdmin" }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        Ok(Self {
            token: root.address("token")?,
            method: root.optional_variant("method")?.unwrap_or_default(),
        })
    }
}

/// Input of `acceptAdminRole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptAdminParams {
    /// Token whose administrator role is accepted
    pub token: Address,
}

impl AcceptAdminParams {
    /// Validates `{ "token": "0x…" }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        Ok(Self { token: Object::root(value)?.address("token")? })
    }
}

/// Input of `setPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPoolParams {
    /// Token to configure
    pub token: Address,
    /// Pool to assign; the zero address unsets the pool
    pub pool: Address,
}

impl SetPoolParams {
    /// Validates `{ "token": "0x…", "pool": "0x…" }`.
    pub fn from_json(value: &Value) -> ValidationResult<Self> {
        let root = Object::root(value)?;
        Ok(Self { token: root.address("token")?, pool: root.address("pool")? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationErrorKind;
    use alloy_primitives::address;
    use serde_json::json;

    fn pool_json() -> Value {
        json!({
            "poolType": "BurnMintTokenPool",
            "token": "",
            "allowlist": [],
            "rmnProxy": "0x411de17f12d1a34ecc7f45f49844626267c75e81",
            "router": "0x80226fc0ee2b096224eeac085bb9a8cba1146f7d"
        })
    }

    fn deployment_json() -> Value {
        json!({
            "scheme": "create2",
            "factory": "0x4e59b44847b379578588920ca78fbf26c0b4956c",
            "salt": "0x0000000000000000000000000000000000000000000000000000000000000001",
            "sender": "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f"
        })
    }

    #[test]
    fn test_token_defaults() {
        let input = json!({ "token": { "name": "Token", "symbol": "TKN" }, "deployment": deployment_json() });
        let params = TokenDeployParams::from_json(&input).unwrap();
        assert_eq!(params.token.decimals, 18);
        assert_eq!(params.token.max_supply, U256::ZERO);
        assert_eq!(params.token.pre_mint, U256::ZERO);
    }

    #[test]
    fn test_pre_mint_bounded_by_max_supply() {
        let input = json!({
            "token": { "name": "Token", "symbol": "TKN", "maxSupply": "100", "preMint": "101" },
            "deployment": deployment_json()
        });
        let err = TokenDeployParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "token.preMint");
    }

    #[test]
    fn test_missing_salt_reported_at_path() {
        let mut deployment = deployment_json();
        deployment.as_object_mut().unwrap().remove("salt");
        let input = json!({ "token": { "name": "Token", "symbol": "TKN" }, "deployment": deployment });
        let err = TokenDeployParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "deployment.salt");
        assert_eq!(err.kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn test_unknown_pool_type() {
        let mut pool = pool_json();
        pool["poolType"] = json!("MintBurn");
        let input = json!({ "token": { "name": "T", "symbol": "T" }, "pool": pool, "deployment": deployment_json() });
        let err = TokenAndPoolDeployParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "pool.poolType");
        assert!(matches!(err.kind, ValidationErrorKind::UnknownVariant { .. }));
    }

    #[test]
    fn test_combined_pool_inherits_decimals() {
        let input = json!({
            "token": { "name": "T", "symbol": "T", "decimals": 6 },
            "pool": pool_json(),
            "deployment": deployment_json()
        });
        let params = TokenAndPoolDeployParams::from_json(&input).unwrap();
        assert_eq!(params.pool.decimals, Some(6));
        assert_eq!(params.pool.token, None);
    }

    #[test]
    fn test_combined_rejects_preset_token() {
        let mut pool = pool_json();
        pool["token"] = json!("0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f");
        let input = json!({ "token": { "name": "T", "symbol": "T" }, "pool": pool, "deployment": deployment_json() });
        let err = TokenAndPoolDeployParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "pool.token");
    }

    #[test]
    fn test_standalone_pool_requires_token() {
        let input = json!({ "pool": pool_json(), "deployment": deployment_json() });
        let err = PoolDeployParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "pool.token");
        assert_eq!(err.kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn test_nonce_scheme_defaults() {
        let obj_json = json!({ "scheme": "nonce", "deployer": "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f" });
        let obj = Object::root(&obj_json).unwrap();
        assert_eq!(
            address_scheme(&obj).unwrap(),
            AddressScheme::Nonce {
                deployer: address!("bf6512b1bbeec3a673feff43c0a182c2b28dfd9f"),
                create_call: DEFAULT_CREATE_CALL,
                nonce: 0,
            }
        );
    }

    #[test]
    fn test_lock_release_constructor_args_include_liquidity_flag() {
        let mut pool = pool_json();
        pool["poolType"] = json!("LockReleaseTokenPool");
        pool["acceptLiquidity"] = json!(true);
        let params = PoolParams::from_object(&Object::root(&pool).unwrap()).unwrap();
        let args = params.constructor_args(Address::ZERO);
        assert_eq!(args.len(), 6);
        assert_eq!(args[4], DynSolValue::Bool(true));
    }

    #[test]
    fn test_rate_limiter_rules() {
        let enabled = json!({ "isEnabled": true, "capacity": "1000", "rate": "100" });
        let cfg = RateLimiterConfig::from_object(Some(&Object::root(&enabled).unwrap())).unwrap();
        assert_eq!(cfg, RateLimiterConfig { is_enabled: true, capacity: 1000, rate: 100 });

        let too_fast = json!({ "isEnabled": true, "capacity": "10", "rate": "100" });
        let err = RateLimiterConfig::from_object(Some(&Object::root(&too_fast).unwrap())).unwrap_err();
        assert_eq!(err.path.as_str(), "rate");

        let disabled_with_capacity = json!({ "isEnabled": false, "capacity": "10", "rate": "0" });
        assert!(RateLimiterConfig::from_object(Some(&Object::root(&disabled_with_capacity).unwrap())).is_err());

        assert_eq!(RateLimiterConfig::from_object(None).unwrap(), RateLimiterConfig::default());
    }

    #[test]
    fn test_evm_remote_address_is_left_padded() {
        let input = json!({
            "chainsToAdd": [{
                "remoteChainSelector": "6433500567565415381",
                "remotePoolAddresses": ["0x6f6F5645B86b1fD3c4C015822a0E672132D4e2F8"],
                "remoteTokenAddress": "0xb3e0aac2b12b5a4a2e8b7c6f6a4d1f3e8c1a9b7d"
            }]
        });
        let params = ChainUpdateParams::from_json(&input).unwrap();
        let update = &params.add[0];
        assert_eq!(update.remote_chain_selector, 6433500567565415381);
        assert_eq!(update.remote_pool_addresses[0].len(), 32);
        assert_eq!(&update.remote_pool_addresses[0][..12], &[0u8; 12]);
        assert_eq!(
            &update.remote_pool_addresses[0][12..],
            address!("6f6f5645b86b1fd3c4c015822a0e672132d4e2f8").as_slice()
        );
    }

    #[test]
    fn test_svm_remote_address_is_raw_key() {
        let input = json!({
            "chainsToAdd": [{
                "remoteChainSelector": "124615329519749607",
                "remoteChainType": "svm",
                "remotePoolAddresses": ["11111111111111111111111111111111"],
                "remoteTokenAddress": "So11111111111111111111111111111111111111112"
            }]
        });
        let params = ChainUpdateParams::from_json(&input).unwrap();
        assert_eq!(params.add[0].remote_pool_addresses[0], vec![0u8; 32]);
        assert_eq!(params.add[0].remote_token_address.len(), 32);
    }

    #[test]
    fn test_invalid_remote_pool_path() {
        let input = json!({
            "chainsToAdd": [{
                "remoteChainSelector": "1",
                "remotePoolAddresses": ["0x6f6F5645B86b1fD3c4C015822a0E672132D4e2F8", "0x01"],
                "remoteTokenAddress": "0x6f6F5645B86b1fD3c4C015822a0E672132D4e2F8"
            }]
        });
        let err = ChainUpdateParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "chainsToAdd[0].remotePoolAddresses[1]");
    }

    #[test]
    fn test_add_remote_pools() {
        let input = json!({ "remotePools": [
            { "remoteChainSelector": "4949039107694359620", "remotePoolAddress": "0x6f93AD7963BBdD8C655A0C819B9b79347EE04b70" },
            { "remoteChainSelector": "15971525489660198786", "remotePoolAddress": "0xC026ae03C857093979872C665b13dBBA83B55987" }
        ]});
        let params = AddRemotePoolsParams::from_json(&input).unwrap();
        assert_eq!(params.pools.len(), 2);
        assert_eq!(params.pools[0].remote_chain_selector, 4949039107694359620);
        assert_eq!(params.pools[1].remote_chain_selector, 15971525489660198786);
        assert_eq!(params.pools[0].remote_pool_address.len(), 32);
        assert_eq!(&params.pools[0].remote_pool_address[..12], &[0u8; 12]);
        assert_eq!(
            &params.pools[0].remote_pool_address[12..],
            address!("6f93ad7963bbdd8c655a0c819b9b79347ee04b70").as_slice()
        );
    }

    #[test]
    fn test_add_remote_pools_rejects_empty_and_reports_path() {
        let err = AddRemotePoolsParams::from_json(&json!({ "remotePools": [] })).unwrap_err();
        assert_eq!(err.path.as_str(), "remotePools");

        let err = AddRemotePoolsParams::from_json(&json!({})).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Missing);

        let err = AddRemotePoolsParams::from_json(&json!({ "remotePools": [
            { "remoteChainSelector": "1", "remotePoolAddress": "0x6f93AD7963BBdD8C655A0C819B9b79347EE04b70" },
            { "remoteChainSelector": "2", "remotePoolAddress": "0x1234" }
        ]}))
        .unwrap_err();
        assert_eq!(err.path.as_str(), "remotePools[1].remotePoolAddress");
    }

    #[test]
    fn test_selector_must_fit_u64() {
        let input = json!({ "remoteChainSelectorsToRemove": ["18446744073709551616"] });
        let err = ChainUpdateParams::from_json(&input).unwrap_err();
        assert_eq!(err.path.as_str(), "remoteChainSelectorsToRemove[0]");
    }
}
