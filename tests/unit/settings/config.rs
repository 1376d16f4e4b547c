use super::*;
use crate::encode::format::ExrCompression;

#[test]
fn defaults_are_valid() {
    let s = RecorderSettings::default();
    assert!(!s.has_errors(), "{:?}", s.validation_errors());
    s.validate().unwrap();
}

#[test]
fn each_bad_field_is_reported() {
    let s = RecorderSettings {
        name: " ".to_string(),
        file_stem: "a/b".to_string(),
        frame_padding: 40,
        width: 0,
        output: OutputFormat::Jpeg { quality: 101 },
        ..RecorderSettings::default()
    };
    let errors = s.validation_errors();
    assert_eq!(errors.len(), 5, "{errors:?}");
    assert!(s.has_errors());

    let err = s.validate().unwrap_err();
    assert!(matches!(err, RecorderError::Configuration(_)));
    assert!(!err.is_fatal());
    assert!(err.to_string().contains("jpeg quality 101"));
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let s = RecorderSettings::from_json_str(
        r#"{
            "name": "depth pass",
            "aov": "depth",
            "output": { "format": "exr", "compression": "rle" },
            "output_dir": "out/depth",
            "width": 32,
            "height": 16,
            "ordering": "reorder"
        }"#,
    )
    .unwrap();
    assert_eq!(s.name, "depth pass");
    assert_eq!(
        s.output,
        OutputFormat::Exr {
            compression: ExrCompression::Rle
        }
    );
    assert_eq!(s.ordering, OrderingPolicy::Reorder);
    assert_eq!(s.on_write_error, WriteErrorPolicy::Skip);
    assert_eq!(s.frame_padding, 4);
}

#[test]
fn unknown_fields_and_formats_are_rejected() {
    assert!(matches!(
        RecorderSettings::from_json_str(r#"{ "colour": "red" }"#),
        Err(RecorderError::Serde(_))
    ));
    assert!(matches!(
        RecorderSettings::from_json_str(r#"{ "output": { "format": "webp" } }"#),
        Err(RecorderError::Serde(_))
    ));
}

#[test]
fn json_file_roundtrip_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = RecorderSettings {
        aov: AovKind::Normal,
        output: OutputFormat::Png,
        ..RecorderSettings::default()
    };
    std::fs::write(&path, s.to_json_pretty().unwrap()).unwrap();
    assert_eq!(RecorderSettings::from_json_file(&path).unwrap(), s);

    assert!(RecorderSettings::from_json_file(&dir.path().join("nope.json")).is_err());
}
