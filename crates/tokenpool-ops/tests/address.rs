//! Tests for deterministic deployment address prediction.

use std::{
    io,
    sync::{Arc, Mutex},
};

use alloy_primitives::{address, b256, Address, B256};
use rstest::rstest;
use tokenpool_ops::{
    predict_address, predict_create, predict_create2, AddressError, AddressRole, AddressScheme,
    FormatError,
};
use tracing_subscriber::fmt::MakeWriter;

const DEPLOYER: Address = address!("4e59b44847b379578588920ca78fbf26c0b4956c");
const SENDER: Address = address!("bf6512b1bbeec3a673feff43c0a182c2b28dfd9f");
const OTHER_SENDER: Address = address!("6f6f5645b86b1fd3c4c015822a0e672132d4e2f8");
const ZERO_SALT: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const PLACEHOLDER_CODE: [u8; 1] = [0x00];

/// Fixed deployer, zero salt, one-byte init code and fixed sender always land on the same address.
#[test]
fn test_known_prediction() {
    let predicted = predict_address(
        "0x4e59b44847b379578588920ca78fbf26c0b4956c",
        &PLACEHOLDER_CODE,
        ZERO_SALT,
        "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f",
    )
    .unwrap();
    assert_eq!(predicted, address!("273b2d9a763e4531eca306e1cdfa35236aa1867a"));
    assert_eq!(predicted.to_checksum(None), "0x273b2D9a763E4531EcA306e1CdFa35236aa1867A");
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_prediction_emits_audit_record() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let prediction = tracing::subscriber::with_default(subscriber, || {
        predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::ZERO, SENDER)
    });

    let record = logs.contents();
    assert!(record.contains("Predicted CREATE2 address"), "{record}");
    for field in [
        format!("deployer={DEPLOYER}"),
        format!("salt={}", B256::ZERO),
        format!("modified_salt={}", prediction.modified_salt),
        format!("sender={SENDER}"),
        format!("init_code_hash={}", prediction.init_code_hash),
        "predicted=0x273b2D9a763E4531EcA306e1CdFa35236aa1867A".to_string(),
    ] {
        assert!(record.contains(&field), "missing `{field}` in {record}");
    }
}

#[test]
fn test_intermediate_values() {
    let prediction = predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::ZERO, SENDER);
    assert_eq!(
        prediction.modified_salt,
        b256!("5915b94b9782948ed1f4c93cef52ab0e7b0585a4a59b788fdac3c508afdc5c43")
    );
    assert_eq!(
        prediction.init_code_hash,
        b256!("bc36789e7a1e281436464229828f817d6612f7b477d66591ff96a9e064bcc98a")
    );
    // the raw salt would give a different address
    assert_ne!(prediction.address, DEPLOYER.create2(B256::ZERO, prediction.init_code_hash));
}

#[test]
fn test_prediction_is_deterministic() {
    let first = predict_create2(DEPLOYER, &[0x60, 0x80], B256::with_last_byte(7), SENDER);
    let second = predict_create2(DEPLOYER, &[0x60, 0x80], B256::with_last_byte(7), SENDER);
    assert_eq!(first, second);
}

#[test]
fn test_distinct_senders_do_not_collide() {
    let a = predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::ZERO, SENDER).address;
    let b = predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::ZERO, OTHER_SENDER).address;
    assert_ne!(a, b);
}

#[test]
fn test_salt_changes_address() {
    let a = predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::ZERO, SENDER).address;
    let b = predict_create2(DEPLOYER, &PLACEHOLDER_CODE, B256::with_last_byte(1), SENDER).address;
    assert_ne!(a, b);
}

#[test]
fn test_init_code_changes_address() {
    let a = predict_create2(DEPLOYER, &[0x00], B256::ZERO, SENDER).address;
    let b = predict_create2(DEPLOYER, &[0x01], B256::ZERO, SENDER).address;
    assert_ne!(a, b);
}

#[rstest]
#[case("0x00")]
#[case("0x00000000000000000000000000000000000000000000000000000000000000")]
#[case("0x000000000000000000000000000000000000000000000000000000000000000000")]
fn test_salt_length_rejected(#[case] salt: &str) {
    let err = predict_address(
        "0x4e59b44847b379578588920ca78fbf26c0b4956c",
        &PLACEHOLDER_CODE,
        salt,
        "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f",
    )
    .unwrap_err();
    assert!(matches!(err, AddressError::InvalidSalt { reason: FormatError::Length { expected: 32, .. }, .. }));
}

#[rstest]
#[case("0x4e59b44847b379578588920ca78fbf26c0b495", "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f", AddressRole::Deployer)]
#[case("0x4e59b44847b379578588920ca78fbf26c0b4956c", "0xbf6512b1bbeec3a673feff43c0a182c2b28dfd9f00", AddressRole::Sender)]
#[case("0x4e59b44847b379578588920ca78fbf26c0b4956c", "bf6512b1bbeec3a673feff43c0a182c2b28dfd9f", AddressRole::Sender)]
fn test_address_length_rejected(
    #[case] deployer: &str,
    #[case] sender: &str,
    #[case] expected: AddressRole,
) {
    let err = predict_address(deployer, &PLACEHOLDER_CODE, ZERO_SALT, sender).unwrap_err();
    match err {
        AddressError::InvalidAddress { role, .. } => assert_eq!(role, expected),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_nonce_addresses() {
    assert_eq!(predict_create(SENDER, 0), address!("b71363f99f6bd93807a7245f7dd8f00c4864f1a4"));
    assert_eq!(predict_create(SENDER, 1), address!("4ca3271e3d4a2f53906148bcca01c60b0514cc5e"));
}

#[test]
fn test_scheme_prediction() {
    let create2 = AddressScheme::Create2 { factory: DEPLOYER, salt: B256::ZERO, sender: SENDER };
    assert_eq!(
        create2.predict(&PLACEHOLDER_CODE, 0),
        address!("273b2d9a763e4531eca306e1cdfa35236aa1867a")
    );
    // CREATE2 ignores the position in the batch
    assert_eq!(create2.predict(&PLACEHOLDER_CODE, 1), create2.predict(&PLACEHOLDER_CODE, 0));

    let nonce = AddressScheme::Nonce { deployer: SENDER, create_call: DEPLOYER, nonce: 5 };
    assert_eq!(nonce.predict(&PLACEHOLDER_CODE, 0), address!("6b58ab056522fdf1572ebe55599f84c9480c1448"));
    assert_eq!(nonce.predict(&PLACEHOLDER_CODE, 1), address!("c3bf5e697d3f3e02e279141d5cb36bb2d4f76c0a"));
}
