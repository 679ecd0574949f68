//! Structural validation of raw JSON input.
//!
//! Every accessor either returns a typed, normalized value or a [`ValidationError`] carrying the
//! full path of the offending field. Nothing is partially accepted.

use std::{fmt, ops::RangeInclusive};

use alloy_primitives::{hex, Address, B256, U256};
use serde_json::{Map, Value};

use crate::{constants::token, FormatError, ValidationError, ValidationErrorKind, ValidationResult};

/// Number of bytes in an address.
pub const ADDRESS_LENGTH: usize = 20;

/// Number of bytes in a salt.
pub const SALT_LENGTH: usize = 32;

/// Path to a field inside an input document, e.g. `chainsToAdd[0].remoteChainSelector`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the member `key` below this path.
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of the array element `index` below this path.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Decodes a `0x`-prefixed hex string of exactly `N` bytes.
fn parse_fixed_hex<const N: usize>(input: &str) -> Result<[u8; N], FormatError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .ok_or(FormatError::MissingPrefix)?;
    if digits.len() % 2 != 0 {
        return Err(FormatError::OddLength { digits: digits.len() });
    }
    if digits.len() != N * 2 {
        return Err(FormatError::Length { expected: N, actual: digits.len() / 2 });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|_| FormatError::NonHex)?;
    Ok(out)
}

/// Parses a `0x`-prefixed 20-byte address. Case is not significant.
pub fn parse_address(input: &str) -> Result<Address, FormatError> {
    parse_fixed_hex::<ADDRESS_LENGTH>(input).map(Address::from)
}

/// Parses a `0x`-prefixed 32-byte salt.
pub fn parse_salt(input: &str) -> Result<B256, FormatError> {
    parse_fixed_hex::<SALT_LENGTH>(input).map(B256::from)
}

/// Parses an unsigned decimal integer string that must fit in `bits` bits.
fn parse_decimal(input: &str, bits: usize) -> Result<U256, ValidationErrorKind> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationErrorKind::NotDecimal(input.to_string()));
    }
    let out_of_range = || ValidationErrorKind::OutOfRange {
        value: input.to_string(),
        constraint: format!("must fit in uint{bits}"),
    };
    let value = U256::from_str_radix(input, 10).map_err(|_| out_of_range())?;
    if value.bit_len() > bits {
        return Err(out_of_range());
    }
    Ok(value)
}

/// JSON type name used in error messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A string-valued enumeration accepted in input documents.
pub trait InputVariant: Sized {
    /// Accepted spellings, for error messages.
    const ALLOWED: &'static str;

    /// Parses one accepted spelling.
    fn from_input(value: &str) -> Option<Self>;
}

/// A JSON object under validation, positioned at a known path.
#[derive(Debug, Clone)]
pub struct Object<'a> {
    path: FieldPath,
    map: &'a Map<String, Value>,
}

impl<'a> Object<'a> {
    /// Validates that `value` is an object located at `path`.
    pub fn new(path: FieldPath, value: &'a Value) -> ValidationResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            other => Err(ValidationError::new(
                path,
                ValidationErrorKind::WrongType { expected: "object", found: type_name(other) },
            )),
        }
    }

    /// Validates that the document root is an object.
    pub fn root(value: &'a Value) -> ValidationResult<Self> {
        Self::new(FieldPath::root(), value)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn error(&self, key: &str, kind: ValidationErrorKind) -> ValidationError {
        ValidationError::new(self.path.key(key), kind)
    }

    fn wrong_type(&self, key: &str, expected: &'static str, found: &Value) -> ValidationError {
        self.error(key, ValidationErrorKind::WrongType { expected, found: type_name(found) })
    }

    /// Builds an `Invalid` error for `key`.
    pub fn invalid(&self, key: &str, message: impl Into<String>) -> ValidationError {
        self.error(key, ValidationErrorKind::Invalid(message.into()))
    }

    /// Nested required object.
    pub fn object(&self, key: &str) -> ValidationResult<Self> {
        match self.get(key) {
            Some(value) => Self::new(self.path.key(key), value),
            None => Err(self.error(key, ValidationErrorKind::Missing)),
        }
    }

    /// Nested optional object.
    pub fn optional_object(&self, key: &str) -> ValidationResult<Option<Self>> {
        self.get(key).map(|value| Self::new(self.path.key(key), value)).transpose()
    }

    /// Array member. Reports `Missing` when `required` and absent.
    pub fn array(&self, key: &str, required: bool) -> ValidationResult<Option<&'a Vec<Value>>> {
        match self.get(key) {
            None if required => Err(self.error(key, ValidationErrorKind::Missing)),
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(self.wrong_type(key, "array", other)),
        }
    }

    /// Array of objects. An absent key yields an empty list unless `required`.
    pub fn objects(&self, key: &str, required: bool) -> ValidationResult<Vec<Self>> {
        let path = self.path.key(key);
        let items = self.array(key, required)?.map(Vec::as_slice).unwrap_or_default();
        items.iter().enumerate().map(|(i, item)| Self::new(path.index(i), item)).collect()
    }

    /// Array of strings, each mapped through `parse`; absent means empty.
    fn string_list<T>(
        &self,
        key: &str,
        parse: impl Fn(&str) -> Result<T, ValidationErrorKind>,
    ) -> ValidationResult<Vec<T>> {
        let path = self.path.key(key);
        let items = self.array(key, false)?.map(Vec::as_slice).unwrap_or_default();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => parse(s).map_err(|kind| ValidationError::new(path.index(i), kind)),
                other => Err(ValidationError::new(
                    path.index(i),
                    ValidationErrorKind::WrongType { expected: "string", found: type_name(other) },
                )),
            })
            .collect()
    }

    /// Optional string member.
    pub fn optional_string(&self, key: &str) -> ValidationResult<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.wrong_type(key, "string", other)),
        }
    }

    /// Required string member.
    pub fn string(&self, key: &str) -> ValidationResult<&'a str> {
        self.optional_string(key)?.ok_or_else(|| self.error(key, ValidationErrorKind::Missing))
    }

    /// Required non-empty string member.
    pub fn non_empty_string(&self, key: &str) -> ValidationResult<&'a str> {
        let value = self.string(key)?;
        if value.trim().is_empty() {
            return Err(self.invalid(key, "must not be empty"));
        }
        Ok(value)
    }

    /// Array of strings; absent means empty.
    pub fn strings(&self, key: &str) -> ValidationResult<Vec<&'a str>> {
        let path = self.path.key(key);
        let items = self.array(key, false)?.map(Vec::as_slice).unwrap_or_default();
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.as_str()),
                other => Err(ValidationError::new(
                    path.index(i),
                    ValidationErrorKind::WrongType { expected: "string", found: type_name(other) },
                )),
            })
            .collect()
    }

    /// Optional address. An empty string is treated as an unset placeholder.
    pub fn optional_address(&self, key: &str) -> ValidationResult<Option<Address>> {
        match self.optional_string(key)? {
            None | Some("") => Ok(None),
            Some(s) => parse_address(s)
                .map(Some)
                .map_err(|e| self.error(key, ValidationErrorKind::Address(e))),
        }
    }

    /// Required address.
    pub fn address(&self, key: &str) -> ValidationResult<Address> {
        self.optional_address(key)?.ok_or_else(|| self.error(key, ValidationErrorKind::Missing))
    }

    /// Array of addresses; absent means empty.
    pub fn address_list(&self, key: &str) -> ValidationResult<Vec<Address>> {
        self.string_list(key, |s| parse_address(s).map_err(ValidationErrorKind::Address))
    }

    /// Required 32-byte salt. Absence and malformation are reported distinctly.
    pub fn salt(&self, key: &str) -> ValidationResult<B256> {
        let value = self.string(key)?;
        parse_salt(value).map_err(|e| self.error(key, ValidationErrorKind::Salt(e)))
    }

    /// Optional boolean member.
    pub fn optional_bool(&self, key: &str) -> ValidationResult<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(key, "boolean", other)),
        }
    }

    /// Optional small integer given as a JSON number, bounded by `range`.
    pub fn optional_u64_in(
        &self,
        key: &str,
        range: RangeInclusive<u64>,
    ) -> ValidationResult<Option<u64>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let Value::Number(number) = value else {
            return Err(self.wrong_type(key, "number", value));
        };
        match number.as_u64() {
            Some(n) if range.contains(&n) => Ok(Some(n)),
            _ => Err(self.error(
                key,
                ValidationErrorKind::OutOfRange {
                    value: number.to_string(),
                    constraint: format!("{}..={}", range.start(), range.end()),
                },
            )),
        }
    }

    /// Optional token decimals, bounded to what ERC20 tooling accepts.
    pub fn optional_decimals(&self, key: &str) -> ValidationResult<Option<u8>> {
        let max = u64::from(token::MAX_DECIMALS);
        // the range check guarantees the narrowing below
        Ok(self.optional_u64_in(key, 0..=max)?.map(|n| n as u8))
    }

    /// Optional unsigned integer encoded as a decimal string fitting `bits` bits.
    pub fn optional_uint(&self, key: &str, bits: usize) -> ValidationResult<Option<U256>> {
        match self.optional_string(key)? {
            None => Ok(None),
            Some(s) => parse_decimal(s, bits).map(Some).map_err(|kind| self.error(key, kind)),
        }
    }

    /// Required unsigned integer encoded as a decimal string fitting `bits` bits.
    pub fn uint(&self, key: &str, bits: usize) -> ValidationResult<U256> {
        self.optional_uint(key, bits)?.ok_or_else(|| self.error(key, ValidationErrorKind::Missing))
    }

    /// Required chain selector (decimal string, `uint64`).
    pub fn chain_selector(&self, key: &str) -> ValidationResult<u64> {
        self.uint(key, 64).map(|v| v.to::<u64>())
    }

    /// Array of chain selectors; absent means empty.
    pub fn chain_selector_list(&self, key: &str) -> ValidationResult<Vec<u64>> {
        self.string_list(key, |s| parse_decimal(s, 64).map(|v| v.to::<u64>()))
    }

    /// Optional enum member.
    pub fn optional_variant<T: InputVariant>(&self, key: &str) -> ValidationResult<Option<T>> {
        match self.optional_string(key)? {
            None => Ok(None),
            Some(s) => T::from_input(s).map(Some).ok_or_else(|| {
                self.error(
                    key,
                    ValidationErrorKind::UnknownVariant { value: s.to_string(), allowed: T::ALLOWED },
                )
            }),
        }
    }

    /// Required enum member.
    pub fn variant<T: InputVariant>(&self, key: &str) -> ValidationResult<T> {
        self.optional_variant(key)?.ok_or_else(|| self.error(key, ValidationErrorKind::Missing))
    }
}

/// Parses a standalone address argument (e.g. a CLI flag) under the given field name.
pub fn address_argument(name: &str, value: &str) -> ValidationResult<Address> {
    parse_address(value)
        .map_err(|e| ValidationError::new(FieldPath::root().key(name), ValidationErrorKind::Address(e)))
}
