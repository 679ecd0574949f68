//! Deterministic deployment and transaction assembly for cross-chain token pools.
//!
//! The crate turns JSON parameter documents into ready-to-sign transactions: it validates input,
//! predicts deployment addresses, encodes call data against fixed interface descriptors and wraps
//! the result into multisig batch documents. It never talks to a chain.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod constants;

mod error;
pub use error::*;

mod validate;
pub use validate::*;

mod address;
pub use address::*;

mod abi;
pub use abi::*;

mod tx;
pub use tx::*;

mod batch;
pub use batch::*;

mod params;
pub use params::*;

mod artifacts;
pub use artifacts::*;

mod deploy;
pub use deploy::*;

mod ops;
pub use ops::*;
