use super::*;

fn json_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
}

#[test]
fn bridge_error_codes_are_stable() {
    let cases: Vec<(BridgeError, &str)> = vec![
        (BridgeError::Deserialization { key: "k".into(), source: json_error() }, "E_DESERIALIZE"),
        (BridgeError::Serialization(json_error()), "E_SERIALIZE"),
        (
            BridgeError::StorageWrite { key: "k".into(), source: StoreError::Unavailable("gone".into()) },
            "E_STORAGE_WRITE",
        ),
        (BridgeError::AlreadyInitialized, "E_ALREADY_INITIALIZED"),
        (BridgeError::NotInitialized, "E_NOT_INITIALIZED"),
        (BridgeError::AlreadySubscribed, "E_ALREADY_SUBSCRIBED"),
        (BridgeError::ReentrantEmit { port: "storeModel".into() }, "E_REENTRANT_EMIT"),
        (BridgeError::Runtime(RuntimeError("boom".into())), "E_RUNTIME"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
    }
}

#[test]
fn only_transient_write_failures_are_retryable() {
    let unavailable = BridgeError::StorageWrite { key: "k".into(), source: StoreError::Unavailable("x".into()) };
    let quota = BridgeError::StorageWrite { key: "k".into(), source: StoreError::QuotaExceeded { key: "k".into(), len: 9 } };
    assert!(unavailable.retryable());
    assert!(!quota.retryable());
    assert!(!BridgeError::Serialization(json_error()).retryable());
    assert!(!BridgeError::Deserialization { key: "k".into(), source: json_error() }.retryable());
}

#[test]
fn messages_name_the_slot_key() {
    let err = BridgeError::Deserialization { key: "life-in-weeks-model".into(), source: json_error() };
    assert!(err.to_string().contains("life-in-weeks-model"));

    let err = BridgeError::StorageWrite {
        key: "life-in-weeks-model".into(),
        source: StoreError::QuotaExceeded { key: "life-in-weeks-model".into(), len: 42 },
    };
    let msg = err.to_string();
    assert!(msg.contains("life-in-weeks-model"));
    assert!(msg.contains("42 bytes"));
}

#[test]
fn runtime_error_is_transparent() {
    let err = BridgeError::from(RuntimeError("mount node missing".into()));
    assert_eq!(err.to_string(), "runtime failed to initialize: mount node missing");
}
