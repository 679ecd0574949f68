//! Protocol constants.
//!
//! Grouped by the contract family they belong to.

/// Constants of the burnable and mintable token.
pub mod token {
    use alloy_primitives::{b256, B256};

    /// Decimals used when the input does not specify any.
    pub const DEFAULT_DECIMALS: u8 = 18;
    /// Largest decimals value accepted for a token or pool.
    pub const MAX_DECIMALS: u8 = 18;

    /// `keccak256("MINTER_ROLE")`
    pub const MINTER_ROLE: B256 =
        b256!("9f2df0fed2c77648de5860a4cc508cd0818c85b8b8a1ab4ceeef8d981c8956a6");
    /// `keccak256("BURNER_ROLE")`
    pub const BURNER_ROLE: B256 =
        b256!("3c11d16cbaffd01df69ce1c404f6340ee057498f5f00246190ea54220576a848");
}

/// Constants of the deployment paths.
pub mod deployment {
    use alloy_primitives::{address, Address};

    /// Canonical `CreateCall` library deployment, identical on every chain that carries the Safe
    /// singleton factory.
    pub const DEFAULT_CREATE_CALL: Address = address!("9b35af71d77eaf8d7e40252370304687390a1a52");

    /// Nonce assumed for the first deployment when none is given.
    pub const DEFAULT_NONCE: u64 = 0;
}
