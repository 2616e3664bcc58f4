use walkv::wal::{Operation, OPERATION_FORMAT_VERSION};
use walkv::WalError;

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_put_round_trip() {
    let op = Operation::Put {
        key: b"hello".to_vec(),
        value: b"world".to_vec(),
    };

    let bytes = op.encode().unwrap();
    assert_eq!(bytes[0], OPERATION_FORMAT_VERSION);
    assert_eq!(Operation::decode(&bytes).unwrap(), op);
}

#[test]
fn test_put_and_delete_encode_differently() {
    let put = Operation::Put {
        key: b"k".to_vec(),
        value: vec![],
    };
    let delete = Operation::Delete { key: b"k".to_vec() };

    let put_bytes = put.encode().unwrap();
    let delete_bytes = delete.encode().unwrap();

    assert_ne!(put_bytes, delete_bytes);
    assert_eq!(Operation::decode(&put_bytes).unwrap(), put);
    assert_eq!(Operation::decode(&delete_bytes).unwrap(), delete);
}

#[test]
fn test_binary_key_and_value_preserved() {
    let key: Vec<u8> = vec![0x00, 0xFF, 0x80, 0x00];
    let value: Vec<u8> = (0..=255u8).rev().collect();
    let op = Operation::Put {
        key: key.clone(),
        value: value.clone(),
    };

    match Operation::decode(&op.encode().unwrap()).unwrap() {
        Operation::Put { key: k, value: v } => {
            assert_eq!(k, key);
            assert_eq!(v, value);
        }
        other => panic!("expected Put, got {:?}", other),
    }
}

#[test]
fn test_accessors() {
    let put = Operation::Put {
        key: b"a".to_vec(),
        value: b"1".to_vec(),
    };
    let delete = Operation::Delete { key: b"b".to_vec() };

    assert_eq!(put.key(), b"a");
    assert_eq!(put.kind(), "PUT");
    assert_eq!(delete.key(), b"b");
    assert_eq!(delete.kind(), "DELETE");
}

// =============================================================================
// Malformed Payload Tests
// =============================================================================

#[test]
fn test_truncated_body_rejected() {
    let bytes = Operation::Put {
        key: b"key".to_vec(),
        value: b"value".to_vec(),
    }
    .encode()
    .unwrap();

    let result = Operation::decode(&bytes[..bytes.len() - 2]);
    assert!(matches!(result, Err(WalError::Serialization(_))));
}

#[test]
fn test_unknown_variant_rejected() {
    let mut bytes = Operation::Delete { key: b"k".to_vec() }.encode().unwrap();
    // Big-endian u32 variant index follows the version byte
    bytes[4] = 7;

    assert!(matches!(
        Operation::decode(&bytes),
        Err(WalError::Serialization(_))
    ));
}
