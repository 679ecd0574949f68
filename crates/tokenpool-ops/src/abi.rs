//! Interface descriptors and call data encoding.
//!
//! The descriptors are fixed JSON ABIs compiled into the binary. They are parsed once into an
//! [`InterfaceRegistry`], which is then passed by reference to everything that encodes calls.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Bytes;
use tracing::trace;

use crate::EncodingError;

/// Contracts the tool knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    /// Burnable and mintable ERC20 token
    BurnMintErc20,
    /// Token pool that burns on send and mints on receive
    BurnMintTokenPool,
    /// Token pool that locks on send and releases on receive
    LockReleaseTokenPool,
    /// Functions shared by every token pool
    TokenPool,
    /// Registry mapping tokens to pools and administrators
    TokenAdminRegistry,
    /// Registry module that proposes token administrators
    RegistryModuleOwnerCustom,
    /// Factory deploying init code with a sender-bound salt
    Create2Factory,
    /// Library deploying init code with CREATE when delegate-called
    CreateCall,
}

impl Contract {
    /// Every known contract, in registry order.
    pub const ALL: [Self; 8] = [
        Self::BurnMintErc20,
        Self::BurnMintTokenPool,
        Self::LockReleaseTokenPool,
        Self::TokenPool,
        Self::TokenAdminRegistry,
        Self::RegistryModuleOwnerCustom,
        Self::Create2Factory,
        Self::CreateCall,
    ];

    /// Contract name, also the artifact file stem.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BurnMintErc20 => "BurnMintERC20",
            Self::BurnMintTokenPool => "BurnMintTokenPool",
            Self::LockReleaseTokenPool => "LockReleaseTokenPool",
            Self::TokenPool => "TokenPool",
            Self::TokenAdminRegistry => "TokenAdminRegistry",
            Self::RegistryModuleOwnerCustom => "RegistryModuleOwnerCustom",
            Self::Create2Factory => "Create2Factory",
            Self::CreateCall => "CreateCall",
        }
    }

    const fn abi_json(&self) -> &'static str {
        match self {
            Self::BurnMintErc20 => include_str!("../abi/BurnMintERC20.json"),
            Self::BurnMintTokenPool => include_str!("../abi/BurnMintTokenPool.json"),
            Self::LockReleaseTokenPool => include_str!("../abi/LockReleaseTokenPool.json"),
            Self::TokenPool => include_str!("../abi/TokenPool.json"),
            Self::TokenAdminRegistry => include_str!("../abi/TokenAdminRegistry.json"),
            Self::RegistryModuleOwnerCustom => include_str!("../abi/RegistryModuleOwnerCustom.json"),
            Self::Create2Factory => include_str!("../abi/Create2Factory.json"),
            Self::CreateCall => include_str!("../abi/CreateCall.json"),
        }
    }

    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named interface descriptor.
#[derive(Debug, Clone)]
pub struct Interface {
    name: &'static str,
    abi: JsonAbi,
}

impl Interface {
    /// Parses a JSON ABI document.
    pub fn parse(name: &'static str, json: &str) -> Result<Self, EncodingError> {
        let abi = serde_json::from_str(json)
            .map_err(|source| EncodingError::Descriptor { contract: name, source })?;
        Ok(Self { name, abi })
    }

    /// Interface name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a function by name. Overloads are disambiguated by argument count.
    pub fn function(&self, name: &str, arg_count: usize) -> Result<&Function, EncodingError> {
        let overloads = self.abi.function(name).ok_or_else(|| EncodingError::UnknownFunction {
            contract: self.name,
            function: name.to_string(),
        })?;
        overloads.iter().find(|f| f.inputs.len() == arg_count).ok_or_else(|| {
            EncodingError::ArgumentCount {
                contract: self.name,
                function: name.to_string(),
                expected: overloads.first().map_or(0, |f| f.inputs.len()),
                given: arg_count,
            }
        })
    }

    /// Looks up a function by name alone, taking the first overload.
    pub fn function_by_name(&self, name: &str) -> Result<&Function, EncodingError> {
        self.abi.function(name).and_then(|overloads| overloads.first()).ok_or_else(|| {
            EncodingError::UnknownFunction { contract: self.name, function: name.to_string() }
        })
    }

    /// Encodes a call: the 4-byte selector followed by the ABI-encoded arguments.
    pub fn encode_call(&self, name: &str, args: &[DynSolValue]) -> Result<Bytes, EncodingError> {
        let function = self.function(name, args.len())?;
        let data = function.abi_encode_input(args).map_err(|source| {
            EncodingError::ArgumentType { contract: self.name, function: name.to_string(), source }
        })?;
        trace!(contract = self.name, function = name, len = data.len(), "Encoded call");
        Ok(data.into())
    }

    /// ABI-encodes constructor arguments, without a selector.
    pub fn encode_constructor(&self, args: &[DynSolValue]) -> Result<Vec<u8>, EncodingError> {
        let constructor = self
            .abi
            .constructor
            .as_ref()
            .ok_or(EncodingError::MissingConstructor { contract: self.name })?;
        if constructor.inputs.len() != args.len() {
            return Err(EncodingError::ArgumentCount {
                contract: self.name,
                function: "constructor".to_string(),
                expected: constructor.inputs.len(),
                given: args.len(),
            });
        }
        constructor.abi_encode_input(args).map_err(|source| EncodingError::ArgumentType {
            contract: self.name,
            function: "constructor".to_string(),
            source,
        })
    }

    /// Builds init code: `bytecode ++ abi.encode(constructor args)`.
    pub fn init_code(&self, bytecode: &[u8], args: &[DynSolValue]) -> Result<Bytes, EncodingError> {
        let encoded = self.encode_constructor(args)?;
        let mut init_code = Vec::with_capacity(bytecode.len() + encoded.len());
        init_code.extend_from_slice(bytecode);
        init_code.extend_from_slice(&encoded);
        Ok(init_code.into())
    }
}

/// Read-only lookup of every known interface descriptor.
///
/// Built once at startup and shared by reference; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct InterfaceRegistry {
    interfaces: Vec<Interface>,
}

impl InterfaceRegistry {
    /// Parses every embedded descriptor.
    pub fn load() -> Result<Self, EncodingError> {
        let interfaces = Contract::ALL
            .iter()
            .map(|contract| Interface::parse(contract.name(), contract.abi_json()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { interfaces })
    }

    /// Descriptor of `contract`.
    pub fn interface(&self, contract: Contract) -> &Interface {
        // `load` fills every slot of `Contract::ALL` in order
        &self.interfaces[contract.index()]
    }

    /// Encodes a call to `function` on `contract`.
    pub fn encode_call(
        &self,
        contract: Contract,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Bytes, EncodingError> {
        self.interface(contract).encode_call(function, args)
    }

    /// Builds init code for `contract` from its bytecode and constructor arguments.
    pub fn init_code(
        &self,
        contract: Contract,
        bytecode: &[u8],
        args: &[DynSolValue],
    ) -> Result<Bytes, EncodingError> {
        self.interface(contract).init_code(bytecode, args)
    }
}
