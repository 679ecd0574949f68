//! Tests for the administrative operation catalogue.

use alloy_primitives::{address, keccak256, Address, U256};
use serde_json::json;
use tokenpool_ops::{
    constants::token::{BURNER_ROLE, MINTER_ROLE},
    AcceptAdminParams, AddRemotePoolsParams, AllowListParams, ChainUpdateParams, Contract,
    InterfaceRegistry, MintParams, Operation, Operations, RateLimiterParams, RegisterAdminParams,
    RoleGrantParams, SetPoolParams,
};

const POOL: Address = address!("6f6f5645b86b1fd3c4c015822a0e672132d4e2f8");
const TOKEN: Address = address!("bf6512b1bbeec3a673feff43c0a182c2b28dfd9f");
const REGISTRY: Address = address!("4e59b44847b379578588920ca78fbf26c0b4956c");

fn selector(signature: &str) -> [u8; 4] {
    keccak256(signature)[..4].try_into().unwrap()
}

fn word(data: &[u8], index: usize) -> &[u8] {
    &data[4 + 32 * index..4 + 32 * (index + 1)]
}

#[test]
fn test_chain_update() {
    let registry = InterfaceRegistry::load().unwrap();
    let params = ChainUpdateParams::from_json(&json!({
        "remoteChainSelectorsToRemove": ["16015286601757825753"],
        "chainsToAdd": [{
            "remoteChainSelector": "3478487238524512106",
            "remotePoolAddresses": ["0x6f6F5645B86b1fD3c4C015822a0E672132D4e2F8"],
            "remoteTokenAddress": "0xbF6512B1bBEeC3a673Feff43C0A182C2b28DFD9f",
            "outboundRateLimiterConfig": { "isEnabled": true, "capacity": "1000000", "rate": "1000" }
        }]
    }))
    .unwrap();

    let call = Operations::new(&registry).chain_update(POOL, &params).unwrap();
    assert_eq!(call.contract, Contract::TokenPool);
    assert_eq!(call.function, "applyChainUpdates");
    assert_eq!(call.transaction.to(), POOL);
    assert_eq!(call.transaction.operation(), Operation::Call);
    assert_eq!(
        call.transaction.data()[..4],
        selector(
            "applyChainUpdates(uint64[],(uint64,bytes[],bytes,(bool,uint128,uint128),(bool,uint128,uint128))[])"
        )
    );
}

#[test]
fn test_add_remote_pools() {
    let registry = InterfaceRegistry::load().unwrap();
    let params = AddRemotePoolsParams::from_json(&json!({ "remotePools": [
        { "remoteChainSelector": "4949039107694359620", "remotePoolAddress": "0x6f93AD7963BBdD8C655A0C819B9b79347EE04b70" },
        { "remoteChainSelector": "15971525489660198786", "remotePoolAddress": "0xC026ae03C857093979872C665b13dBBA83B55987" },
        { "remoteChainSelector": "11344663589394136015", "remotePoolAddress": "0x7f1f90E6b6BAD9fc14ca71224B072541B739beb3" }
    ]}))
    .unwrap();

    let calls = Operations::new(&registry).add_remote_pools(POOL, &params).unwrap();
    assert_eq!(calls.len(), 3);
    for (call, remote) in calls.iter().zip(&params.pools) {
        let data = call.transaction.data();
        assert_eq!(call.contract, Contract::TokenPool);
        assert_eq!(call.function, "addRemotePool");
        assert_eq!(call.transaction.to(), POOL);
        assert_eq!(call.transaction.operation(), Operation::Call);
        assert_eq!(data[..4], selector("addRemotePool(uint64,bytes)"));
        assert_eq!(word(data, 0), U256::from(remote.remote_chain_selector).to_be_bytes::<32>());
        // offset, then length 32, then the left-padded address
        assert_eq!(word(data, 1), U256::from(64).to_be_bytes::<32>());
        assert_eq!(word(data, 2), U256::from(32).to_be_bytes::<32>());
        assert_eq!(word(data, 3), remote.remote_pool_address.as_slice());
    }
    assert_eq!(
        &calls[1].transaction.data()[4 + 96 + 12..],
        address!("c026ae03c857093979872c665b13dbba83b55987").as_slice()
    );
}

#[test]
fn test_encoding_is_stable_and_argument_sensitive() {
    let registry = InterfaceRegistry::load().unwrap();
    let ops = Operations::new(&registry);
    let one = MintParams { receiver: TOKEN, amount: U256::from(1) };
    let two = MintParams { receiver: TOKEN, amount: U256::from(2) };

    let a = ops.mint(POOL, &one).unwrap();
    let b = ops.mint(POOL, &one).unwrap();
    let c = ops.mint(POOL, &two).unwrap();
    assert_eq!(a.transaction.data(), b.transaction.data());
    assert_ne!(a.transaction.data(), c.transaction.data());
}

#[test]
fn test_rate_limiter() {
    let registry = InterfaceRegistry::load().unwrap();
    let params = RateLimiterParams::from_json(&json!({
        "remoteChainSelector": "3478487238524512106",
        "outboundConfig": { "isEnabled": true, "capacity": "500", "rate": "5" }
    }))
    .unwrap();
    let call = Operations::new(&registry).rate_limiter(POOL, &params).unwrap();
    let data = call.transaction.data();

    assert_eq!(
        data[..4],
        selector("setChainRateLimiterConfig(uint64,(bool,uint128,uint128),(bool,uint128,uint128))")
    );
    // selector, chain selector, two static tuples of three words
    assert_eq!(data.len(), 4 + 32 * 7);
    assert_eq!(U256::from_be_slice(word(data, 0)), U256::from(3478487238524512106u64));
    assert_eq!(U256::from_be_slice(word(data, 1)), U256::from(1));
    assert_eq!(U256::from_be_slice(word(data, 2)), U256::from(500));
    assert_eq!(U256::from_be_slice(word(data, 3)), U256::from(5));
    // inbound defaults to disabled
    assert!(data[4 + 32 * 4..].iter().all(|b| *b == 0));
}

#[test]
fn test_allow_list() {
    let registry = InterfaceRegistry::load().unwrap();
    let params = AllowListParams::from_json(&json!({ "adds": [TOKEN.to_string()] })).unwrap();
    let call = Operations::new(&registry).allow_list(POOL, &params).unwrap();
    assert_eq!(call.transaction.data()[..4], selector("applyAllowListUpdates(address[],address[])"));
}

#[test]
fn test_mint() {
    let registry = InterfaceRegistry::load().unwrap();
    let params = MintParams::from_json(&json!({
        "receiver": POOL.to_string(),
        "amount": "1000000000000000000000"
    }))
    .unwrap();
    let call = Operations::new(&registry).mint(TOKEN, &params).unwrap();
    let data = call.transaction.data();
    assert_eq!(call.transaction.to(), TOKEN);
    assert_eq!(data[..4], selector("mint(address,uint256)"));
    assert_eq!(&word(data, 0)[12..], POOL.as_slice());
    assert_eq!(U256::from_be_slice(word(data, 1)), U256::from(10u128.pow(21)));
}

#[test]
fn test_grant_roles() {
    let registry = InterfaceRegistry::load().unwrap();
    let ops = Operations::new(&registry);

    let both = RoleGrantParams::from_json(&json!({ "account": POOL.to_string() })).unwrap();
    let call = ops.grant_roles(TOKEN, &both).unwrap();
    assert_eq!(call.function, "grantMintAndBurnRoles");
    assert_eq!(call.transaction.data()[..4], selector("grantMintAndBurnRoles(address)"));

    for (role, hash) in [("mint", MINTER_ROLE), ("burn", BURNER_ROLE)] {
        let params =
            RoleGrantParams::from_json(&json!({ "account": POOL.to_string(), "roleType": role }))
                .unwrap();
        let call = ops.grant_roles(TOKEN, &params).unwrap();
        let data = call.transaction.data();
        assert_eq!(data[..4], selector("grantRole(bytes32,address)"));
        assert_eq!(word(data, 0), hash.as_slice());
    }
}

#[test]
fn test_registry_operations() {
    let registry = InterfaceRegistry::load().unwrap();
    let ops = Operations::new(&registry);

    let register = RegisterAdminParams::from_json(&json!({ "token": TOKEN.to_string() })).unwrap();
    let call = ops.register_admin(REGISTRY, &register).unwrap();
    assert_eq!(call.transaction.data()[..4], selector("registerAdminViaGetCCIPAdmin(address)"));

    let register = RegisterAdminParams::from_json(&json!({
        "token": TOKEN.to_string(),
        "method": "owner"
    }))
    .unwrap();
    let call = ops.register_admin(REGISTRY, &register).unwrap();
    assert_eq!(call.transaction.data()[..4], selector("registerAdminViaOwner(address)"));

    let accept = AcceptAdminParams::from_json(&json!({ "token": TOKEN.to_string() })).unwrap();
    let call = ops.accept_admin(REGISTRY, &accept).unwrap();
    assert_eq!(call.transaction.data()[..4], selector("acceptAdminRole(address)"));

    let set_pool = SetPoolParams::from_json(&json!({
        "token": TOKEN.to_string(),
        "pool": POOL.to_string()
    }))
    .unwrap();
    let call = ops.set_pool(REGISTRY, &set_pool).unwrap();
    assert_eq!(call.contract, Contract::TokenAdminRegistry);
    assert_eq!(call.transaction.data()[..4], selector("setPool(address,address)"));
    assert_eq!(call.transaction.data().len(), 4 + 64);
}

#[test]
fn test_invalid_method_rejected() {
    let err = RegisterAdminParams::from_json(&json!({
        "token": TOKEN.to_string(),
        "method": "admin"
    }))
    .unwrap_err();
    assert_eq!(err.path.as_str(), "method");
}
