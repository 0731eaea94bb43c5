//! Property tests for buffering and frame synchronization

use ld2410_protocol::{
    FrameKind, FrameSynchronizer, ReportMode, RingBuffer, SensorData, TargetState,
    FRAME_OVERHEAD, GATE_COUNT, MAX_FRAME_SIZE,
};
use proptest::prelude::*;

/// Build a report frame for `data` in the given mode
fn report_frame(data: &SensorData, mode: ReportMode) -> Vec<u8> {
    let mut body = vec![mode.to_byte(), 0xAA, data.target_state.to_byte()];
    body.extend_from_slice(&data.moving_distance_cm.to_le_bytes());
    body.push(data.moving_energy);
    body.extend_from_slice(&data.stationary_distance_cm.to_le_bytes());
    body.push(data.stationary_energy);
    body.extend_from_slice(&data.detection_distance_cm.to_le_bytes());
    if mode == ReportMode::Engineering {
        body.push(data.max_moving_gate);
        body.push(data.max_stationary_gate);
        body.extend_from_slice(&data.moving_gates);
        body.extend_from_slice(&data.stationary_gates);
        body.push(data.light);
        body.push(data.out_pin as u8);
    }
    body.extend_from_slice(&[0x55, 0x00]);

    let mut frame = FrameKind::Report.header().to_vec();
    frame.extend_from_slice(&(body.len() as u16).to_le_bytes());
    frame.extend_from_slice(&body);
    frame.extend_from_slice(&FrameKind::Report.footer());
    frame
}

/// Field values that cannot be mistaken for a frame marker
fn field() -> impl Strategy<Value = u8> {
    0u8..=0xA0
}

fn target_state() -> impl Strategy<Value = TargetState> {
    prop_oneof![
        Just(TargetState::None),
        Just(TargetState::Moving),
        Just(TargetState::Stationary),
        Just(TargetState::Both),
    ]
}

prop_compose! {
    fn engineering_data()(
        target_state in target_state(),
        moving_distance_cm in 0u16..0x0A00,
        moving_energy in 0u8..=100,
        stationary_distance_cm in 0u16..0x0A00,
        stationary_energy in 0u8..=100,
        detection_distance_cm in 0u16..0x0A00,
        max_moving_gate in 0u8..=8,
        max_stationary_gate in 0u8..=8,
        moving_gates in prop::array::uniform9(field()),
        stationary_gates in prop::array::uniform9(field()),
        light in field(),
        out_pin in any::<bool>(),
    ) -> SensorData {
        SensorData {
            target_state,
            moving_distance_cm,
            moving_energy,
            stationary_distance_cm,
            stationary_energy,
            detection_distance_cm,
            engineering_mode: true,
            max_moving_gate,
            max_stationary_gate,
            moving_gates,
            stationary_gates,
            light,
            out_pin,
        }
    }
}

fn decode_stream(stream: &[u8], data: &mut SensorData) -> usize {
    let mut sync = FrameSynchronizer::new();
    let mut completed = 0;
    for &byte in stream {
        if let Some(kind) = sync.feed(byte) {
            completed += 1;
            if kind == FrameKind::Report {
                let frame = sync.frame().unwrap();
                data.apply_frame(frame.bytes);
            }
        }
    }
    completed
}

proptest! {
    #[test]
    fn ring_keeps_newest_bytes(bytes in prop::collection::vec(any::<u8>(), 0..600)) {
        let mut ring: RingBuffer<128> = RingBuffer::new();
        ring.extend_from_slice(&bytes);

        prop_assert!(ring.len() <= ring.capacity());
        let kept = bytes.len().min(ring.capacity());
        prop_assert_eq!(ring.len(), kept);
        prop_assert_eq!(ring.dropped() as usize, bytes.len() - kept);

        let mut drained = Vec::new();
        while let Some(byte) = ring.pop() {
            drained.push(byte);
        }
        prop_assert_eq!(&drained[..], &bytes[bytes.len() - kept..]);
    }

    #[test]
    fn engineering_report_roundtrips(expected in engineering_data()) {
        let frame = report_frame(&expected, ReportMode::Engineering);
        prop_assert!(frame.len() <= MAX_FRAME_SIZE);

        let mut data = SensorData::default();
        prop_assert_eq!(decode_stream(&frame, &mut data), 1);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn basic_report_leaves_engineering_fields(
        first in engineering_data(),
        second in engineering_data(),
    ) {
        let mut data = SensorData::default();
        decode_stream(&report_frame(&first, ReportMode::Engineering), &mut data);
        decode_stream(&report_frame(&second, ReportMode::Basic), &mut data);

        prop_assert!(!data.engineering_mode);
        prop_assert_eq!(data.target_state, second.target_state);
        prop_assert_eq!(data.detection_distance_cm, second.detection_distance_cm);
        prop_assert_eq!(data.moving_gates, first.moving_gates);
        prop_assert_eq!(data.stationary_gates, first.stationary_gates);
        prop_assert_eq!(data.light, first.light);
        prop_assert_eq!(data.out_pin, first.out_pin);
    }

    #[test]
    fn oversized_length_resyncs_on_next_frame(
        expected in engineering_data(),
        declared in (MAX_FRAME_SIZE as u16 - 9)..=u16::MAX,
        junk in prop::collection::vec(field(), 0..40),
    ) {
        let [lo, hi] = declared.to_le_bytes();
        let mut stream = vec![0xF4, 0xF3, 0xF2, 0xF1, lo, hi];
        stream.extend_from_slice(&junk);
        stream.extend_from_slice(&report_frame(&expected, ReportMode::Engineering));

        let mut data = SensorData::default();
        prop_assert_eq!(decode_stream(&stream, &mut data), 1);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn garbage_never_panics(stream in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut sync = FrameSynchronizer::new();
        for &byte in &stream {
            if sync.feed(byte).is_some() {
                let frame = sync.frame().unwrap();
                prop_assert!(frame.bytes.len() <= MAX_FRAME_SIZE);
                prop_assert!(frame.bytes.starts_with(&frame.kind.header()));
                prop_assert!(frame.bytes.ends_with(&frame.kind.footer()));
                let mut data = SensorData::default();
                data.apply_frame(frame.bytes);
            }
        }
    }
}

#[test]
fn gate_count_matches_frame_layout() {
    let data = SensorData::default();
    let frame = report_frame(&data, ReportMode::Engineering);
    // header + length + mode/head + 9 basic + 2 max gates + gates + light/out + tail + footer
    assert_eq!(frame.len(), 4 + 2 + 2 + 9 + 2 + 2 * GATE_COUNT + 2 + 2 + 4);
}

/// Report frame with `declared` zero bytes of intra-frame data
fn padded_frame(declared: u16) -> Vec<u8> {
    let mut frame = vec![0xF4, 0xF3, 0xF2, 0xF1];
    frame.extend_from_slice(&declared.to_le_bytes());
    frame.resize(frame.len() + declared as usize, 0x00);
    frame.extend_from_slice(&[0xF8, 0xF7, 0xF6, 0xF5]);
    frame
}

#[test]
fn largest_declared_length_fits_working_buffer() {
    let largest = (MAX_FRAME_SIZE - FRAME_OVERHEAD) as u16;

    let mut sync = FrameSynchronizer::new();
    let fits = padded_frame(largest);
    assert_eq!(fits.len(), MAX_FRAME_SIZE);
    let completed: Vec<_> = fits.iter().filter_map(|&b| sync.feed(b)).collect();
    assert_eq!(completed, [FrameKind::Report]);
    assert_eq!(sync.frame().map(|f| f.bytes.len()), Some(MAX_FRAME_SIZE));
    assert_eq!(sync.stats().abandoned, 0);

    let mut sync = FrameSynchronizer::new();
    let too_long = padded_frame(largest + 1);
    assert!(too_long.iter().all(|&b| sync.feed(b).is_none()));
    assert_eq!(sync.stats().abandoned, 1);
}
