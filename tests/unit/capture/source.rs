use super::*;
use crate::capture::buffer::{PixelData, ReadbackFormat};
use crate::foundation::core::FrameIndex;

fn pixel() -> CapturedBuffer {
    CapturedBuffer::new(1, 1, PixelData::Rgba8(vec![1, 2, 3, 4])).unwrap()
}

fn req(sequence: u64) -> CaptureRequest {
    CaptureRequest {
        sequence,
        frame: FrameIndex(sequence * 10),
        format: ReadbackFormat::Rgba8,
    }
}

#[test]
fn completions_echo_request_metadata() {
    let handle = InMemorySource::new();
    let mut source = handle.clone();
    source.request(req(0)).unwrap();
    source.request(req(1)).unwrap();
    assert_eq!(handle.outstanding(), 2);
    assert!(source.poll().unwrap().is_empty());

    handle.complete_next(pixel()).unwrap();
    let done = source.poll().unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].sequence, 0);
    assert_eq!(done[0].frame, FrameIndex(0));
    assert_eq!(handle.outstanding(), 1);
}

#[test]
fn complete_sequence_can_jump_the_queue() {
    let handle = InMemorySource::new();
    let mut source = handle.clone();
    for s in 0..3 {
        source.request(req(s)).unwrap();
    }
    handle.complete_sequence(2, pixel()).unwrap();
    handle.complete_sequence(0, pixel()).unwrap();
    let order: Vec<u64> = source.poll().unwrap().iter().map(|f| f.sequence).collect();
    assert_eq!(order, vec![2, 0]);
    assert!(handle.complete_sequence(2, pixel()).is_err());
}

#[test]
fn completing_without_requests_is_an_error() {
    let handle = InMemorySource::new();
    assert!(handle.complete_next(pixel()).is_err());
}

#[test]
fn reclaim_is_observable_through_clones() {
    let handle = InMemorySource::new().with_render_texture(true);
    let mut source = handle.clone();
    assert!(source.is_render_texture_backed());
    source.reclaim(pixel());
    assert_eq!(handle.reclaimed(), 1);
}
