use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RecorderError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        RecorderError::unsupported_format("x")
            .to_string()
            .contains("unsupported output format:")
    );
    assert!(
        RecorderError::pipeline("x")
            .to_string()
            .contains("pipeline error:")
    );
    assert!(
        RecorderError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        RecorderError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn cardinality_message_names_the_count() {
    let msg = RecorderError::InputCardinality(2).to_string();
    assert!(msg.contains("expected exactly 1"));
    assert!(msg.contains("got 2"));
}

#[test]
fn only_configuration_and_serde_errors_are_recoverable() {
    assert!(!RecorderError::configuration("x").is_fatal());
    assert!(!RecorderError::serde("x").is_fatal());
    assert!(RecorderError::InputCardinality(0).is_fatal());
    assert!(RecorderError::unsupported_format("tga").is_fatal());
    assert!(RecorderError::pipeline("x").is_fatal());
    assert!(
        RecorderError::FormatMismatch {
            format: "jpeg",
            expected: "rgba8",
            actual: "rgba_f32",
        }
        .is_fatal()
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RecorderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
