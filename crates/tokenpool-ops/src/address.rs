//! Deterministic deployment address prediction.
//!
//! The deployer factory does not use the caller-supplied salt directly. It first binds the salt
//! to the calling account:
//!
//! ```text
//! modified_salt = keccak256(salt ++ sender)
//! address       = keccak256(0xff ++ deployer ++ modified_salt ++ keccak256(init_code))[12:]
//! ```
//!
//! The packing order (salt first, then sender) must match the on-chain factory byte for byte.

use alloy_primitives::{keccak256, Address, B256};
use tracing::info;

use crate::{parse_address, parse_salt, AddressError, AddressRole};

/// Result of a CREATE2 prediction including the intermediate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Create2Prediction {
    /// `keccak256(salt ++ sender)`
    pub modified_salt: B256,
    /// `keccak256(init_code)`
    pub init_code_hash: B256,
    /// The predicted contract address
    pub address: Address,
}

/// Binds `salt` to `sender` the way the deployer factory does.
pub fn modified_salt(salt: B256, sender: Address) -> B256 {
    let mut packed = [0u8; 52];
    packed[..32].copy_from_slice(salt.as_slice());
    packed[32..].copy_from_slice(sender.as_slice());
    keccak256(packed)
}

/// Predicts the address a factory at `deployer` assigns to `init_code` when called by `sender`
/// with `salt`.
///
/// Emits an audit record of every input and intermediate value.
pub fn predict_create2(
    deployer: Address,
    init_code: &[u8],
    salt: B256,
    sender: Address,
) -> Create2Prediction {
    let modified_salt = modified_salt(salt, sender);
    let init_code_hash = keccak256(init_code);
    let address = deployer.create2(modified_salt, init_code_hash);

    info!(
        deployer = %deployer,
        salt = %salt,
        modified_salt = %modified_salt,
        sender = %sender,
        init_code_hash = %init_code_hash,
        predicted = %address,
        "Predicted CREATE2 address"
    );

    Create2Prediction { modified_salt, init_code_hash, address }
}

/// String-level entry point for [`predict_create2`].
///
/// Rejects a malformed deployer, sender or salt before any hashing, naming the offending input.
pub fn predict_address(
    deployer: &str,
    init_code: &[u8],
    salt: &str,
    sender: &str,
) -> Result<Address, AddressError> {
    let deployer = parse_address(deployer).map_err(|reason| AddressError::InvalidAddress {
        role: AddressRole::Deployer,
        value: deployer.to_string(),
        reason,
    })?;
    let sender = parse_address(sender).map_err(|reason| AddressError::InvalidAddress {
        role: AddressRole::Sender,
        value: sender.to_string(),
        reason,
    })?;
    let salt = parse_salt(salt)
        .map_err(|reason| AddressError::InvalidSalt { value: salt.to_string(), reason })?;

    Ok(predict_create2(deployer, init_code, salt, sender).address)
}

/// Predicts the address of a contract created by `deployer` with the plain CREATE opcode at the
/// given account nonce.
pub fn predict_create(deployer: Address, nonce: u64) -> Address {
    let address = deployer.create(nonce);
    info!(deployer = %deployer, nonce, predicted = %address, "Predicted CREATE address");
    address
}

/// How the address of a deployed contract is derived.
///
/// The two schemes are not interchangeable: the scheme must match the transaction that actually
/// performs the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScheme {
    /// Deployment through the CREATE2 factory, called by `sender`.
    Create2 {
        /// Factory contract address
        factory: Address,
        /// Caller-chosen salt before sender binding
        salt: B256,
        /// Account that calls the factory
        sender: Address,
    },
    /// Deployment with CREATE from `deployer`, delegate-calling the `create_call` library.
    Nonce {
        /// Account whose nonce determines the address
        deployer: Address,
        /// CreateCall library address
        create_call: Address,
        /// Nonce of the first deployment
        nonce: u64,
    },
}

impl AddressScheme {
    /// Predicts the address of the `index`-th contract deployed under this scheme, where the
    /// deployments are executed in order within a single batch.
    pub fn predict(&self, init_code: &[u8], index: u64) -> Address {
        match *self {
            Self::Create2 { factory, salt, sender } => {
                predict_create2(factory, init_code, salt, sender).address
            }
            Self::Nonce { deployer, nonce, .. } => predict_create(deployer, nonce + index),
        }
    }
}
