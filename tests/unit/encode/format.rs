use super::*;

#[test]
fn readback_layout_follows_format() {
    assert_eq!(
        OutputFormat::default().readback_format(),
        ReadbackFormat::RgbaF32
    );
    assert_eq!(OutputFormat::Png.readback_format(), ReadbackFormat::Rgba8);
    assert_eq!(
        OutputFormat::Jpeg { quality: 90 }.readback_format(),
        ReadbackFormat::Rgba8
    );
}

#[test]
fn extensions_are_stable() {
    assert_eq!(OutputFormat::default().extension(), "exr");
    assert_eq!(OutputFormat::Png.extension(), "png");
    assert_eq!(OutputFormat::Jpeg { quality: 1 }.extension(), "jpg");
}

#[test]
fn kind_parses_known_names_and_rejects_others() {
    assert_eq!("EXR".parse::<OutputFormatKind>().unwrap(), OutputFormatKind::Exr);
    assert_eq!("jpg".parse::<OutputFormatKind>().unwrap(), OutputFormatKind::Jpeg);
    let err = "tga".parse::<OutputFormatKind>().unwrap_err();
    assert!(matches!(err, RecorderError::UnsupportedFormat(_)));
}

#[test]
fn numeric_selector_out_of_range_is_unsupported() {
    assert_eq!(OutputFormatKind::try_from(1).unwrap(), OutputFormatKind::Png);
    let err = OutputFormatKind::try_from(7).unwrap_err();
    assert!(matches!(err, RecorderError::UnsupportedFormat(_)));
    assert!(err.is_fatal());
}

#[test]
fn serde_uses_format_tag_and_defaults() {
    let f: OutputFormat = serde_json::from_str(r#"{ "format": "jpeg" }"#).unwrap();
    assert_eq!(
        f,
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY
        }
    );

    let f: OutputFormat =
        serde_json::from_str(r#"{ "format": "exr", "compression": "piz" }"#).unwrap();
    assert_eq!(
        f,
        OutputFormat::Exr {
            compression: ExrCompression::Piz
        }
    );

    assert!(serde_json::from_str::<OutputFormat>(r#"{ "format": "gif" }"#).is_err());
}

#[test]
fn with_defaults_matches_kind() {
    for &kind in OutputFormatKind::all() {
        assert_eq!(kind.with_defaults().kind(), kind);
    }
}
