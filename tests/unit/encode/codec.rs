use super::*;

fn float_buffer(w: u32, h: u32) -> CapturedBuffer {
    let mut samples = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            samples.extend_from_slice(&[x as f32 * 0.25, y as f32 * 0.5, 2.5, 1.0]);
        }
    }
    CapturedBuffer::new(w, h, PixelData::RgbaF32(samples)).unwrap()
}

fn noisy_rgba8(w: u32, h: u32) -> CapturedBuffer {
    // xorshift so the image has enough detail for quality to matter
    let mut state = 0x2545_F491u32;
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let n = (state & 0x3f) as u8;
            bytes.extend_from_slice(&[
                (x * 4) as u8 ^ n,
                (y * 4) as u8,
                n.wrapping_mul(3),
                255,
            ]);
        }
    }
    CapturedBuffer::new(w, h, PixelData::Rgba8(bytes)).unwrap()
}

#[test]
fn exr_payload_decodes_with_float_precision() {
    let buf = float_buffer(4, 3);
    for &compression in ExrCompression::all() {
        let encoded = encode_frame(&buf, &OutputFormat::Exr { compression }).unwrap();
        assert_eq!(encoded.format, OutputFormatKind::Exr);
        assert!(!encoded.is_empty());

        let decoded = image::load_from_memory_with_format(&encoded.bytes, image::ImageFormat::OpenExr)
            .unwrap()
            .to_rgba32f();
        assert_eq!(decoded.dimensions(), (4, 3));
        let px = decoded.get_pixel(3, 2);
        assert!((px[0] - 0.75).abs() < 1e-6, "{compression}: {px:?}");
        assert!((px[1] - 1.0).abs() < 1e-6, "{compression}: {px:?}");
        assert!((px[2] - 2.5).abs() < 1e-6, "{compression}: {px:?}");
    }
}

#[test]
fn png_payload_is_lossless() {
    let buf = noisy_rgba8(8, 8);
    let encoded = encode_frame(&buf, &OutputFormat::Png).unwrap();
    assert_eq!(encoded.format, OutputFormatKind::Png);

    let decoded = image::load_from_memory_with_format(&encoded.bytes, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    let PixelData::Rgba8(src) = &buf.pixels else {
        unreachable!()
    };
    assert_eq!(decoded.as_raw(), src);
}

#[test]
fn jpeg_payload_decodes_to_same_dimensions() {
    let buf = noisy_rgba8(16, 8);
    let encoded = encode_frame(&buf, &OutputFormat::Jpeg { quality: 80 }).unwrap();
    let decoded =
        image::load_from_memory_with_format(&encoded.bytes, image::ImageFormat::Jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 8));
}

#[test]
fn jpeg_quality_is_monotonic() {
    let buf = noisy_rgba8(64, 64);
    let low = encode_frame(&buf, &OutputFormat::Jpeg { quality: 10 }).unwrap();
    let high = encode_frame(&buf, &OutputFormat::Jpeg { quality: 90 }).unwrap();
    assert!(high.len() >= low.len(), "q90={} q10={}", high.len(), low.len());
}

#[test]
fn jpeg_quality_zero_is_accepted() {
    assert_eq!(jpeg_quality(0), 1);
    assert_eq!(jpeg_quality(100), 100);
    let buf = noisy_rgba8(8, 8);
    assert!(encode_frame(&buf, &OutputFormat::Jpeg { quality: 0 }).is_ok());
}

#[test]
fn float_buffer_is_rejected_by_8bit_formats_until_converted() {
    let buf = float_buffer(2, 2);
    let jpeg = OutputFormat::Jpeg { quality: 75 };

    let err = encode_frame(&buf, &jpeg).unwrap_err();
    assert!(matches!(
        err,
        RecorderError::FormatMismatch {
            format: "jpeg",
            expected: "rgba8",
            actual: "rgba_f32",
        }
    ));
    assert!(encode_frame(&buf, &OutputFormat::Png).is_err());

    assert!(encode_frame(&buf.to_rgba8(), &jpeg).is_ok());
}

#[test]
fn rgba8_buffer_is_rejected_by_exr() {
    let buf = noisy_rgba8(2, 2);
    let exr = OutputFormat::default();
    assert!(matches!(
        encode_frame(&buf, &exr),
        Err(RecorderError::FormatMismatch { .. })
    ));
    assert!(encode_frame(&buf.to_rgba_f32(), &exr).is_ok());
}

#[test]
fn missized_buffers_are_rejected_instead_of_panicking() {
    let short8 = CapturedBuffer {
        width: 2,
        height: 2,
        pixels: PixelData::Rgba8(vec![0; 12]),
    };
    for format in [OutputFormat::Png, OutputFormat::Jpeg { quality: 75 }] {
        let err = encode_frame(&short8, &format).unwrap_err();
        assert!(matches!(err, RecorderError::Encode(_)), "{format:?}: {err}");
    }

    let long_f32 = CapturedBuffer {
        width: 1,
        height: 1,
        pixels: PixelData::RgbaF32(vec![0.0; 8]),
    };
    let err = encode_frame(&long_f32, &OutputFormat::default()).unwrap_err();
    assert!(matches!(err, RecorderError::Encode(_)));
}
