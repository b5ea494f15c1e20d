//! End-to-end round trips through the encode/select/decode pipeline.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EncoderConfig, StrategyKind};
use crate::encoders::{new_encoder, EncodedPayload};
use crate::pipeline::decoder::{decode, decode_frame, decode_payload};
use crate::pipeline::selector::{encode_range, SimultaneousEncoder};
use crate::types::{BitRange, EncodingType};

fn pattern(s: &str) -> BitRange {
    s.chars().map(|c| c == 'T').collect()
}

fn random_range(rng: &mut StdRng, len: usize) -> BitRange {
    // Mix sparse, dense and clustered patterns so every strategy gets to win.
    let density = rng.random_range(0.0..1.0);
    let clustered = rng.random_bool(0.5);
    let mut range = BitRange::new(0);
    let mut current = rng.random_bool(density);
    for _ in 0..len {
        if !clustered || rng.random_bool(0.05) {
            current = rng.random_bool(density);
        }
        range.push(current);
    }
    range
}

fn encode_with(kind: StrategyKind, range: &BitRange) -> EncodedPayload {
    let mut encoder = new_encoder(kind, Some(range.len()));
    for (index, complete) in range.iter().enumerate() {
        encoder.encode_offset(index, complete);
    }
    encoder.serialise().unwrap()
}

#[test]
fn test_selected_payload_roundtrips_for_every_length_up_to_1000() {
    let mut rng = StdRng::seed_from_u64(0x0FF5E7);
    let config = Arc::new(EncoderConfig::default());

    for len in 0..=1000 {
        let range = random_range(&mut rng, len);
        let payload = encode_range(&range, &config).unwrap();
        let decoded = decode_payload(&payload, len).unwrap();
        assert_eq!(decoded, range, "round trip failed for len {} via {}", len, payload.encoding_type());

        let frame = payload.to_bytes().unwrap();
        assert_eq!(decode_frame(&frame, len).unwrap(), range);
    }
}

#[test]
fn test_every_strategy_roundtrips_on_its_own() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in (0..=1000).step_by(37) {
        let range = random_range(&mut rng, len);
        for kind in [StrategyKind::RunLength, StrategyKind::RunLengthV2, StrategyKind::Bitset] {
            let payload = encode_with(kind, &range);
            assert_eq!(
                decode(payload.encoding_type(), payload.bytes(), len).unwrap(),
                range,
                "{:?} failed for len {}",
                kind,
                len
            );
        }
    }
}

#[test]
fn test_run_length_runs_alternate_and_sum_to_len() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in [0usize, 1, 2, 17, 250, 999] {
        let range = random_range(&mut rng, len);
        let payload = encode_with(StrategyKind::RunLengthV2, &range);

        let runs: Vec<usize> = payload
            .bytes()
            .chunks_exact(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]) as usize)
            .collect();
        assert_eq!(runs.iter().sum::<usize>(), len);

        // Dropping the leading zero run leaves exactly the maximal runs.
        let non_leading: Vec<usize> = match runs.split_first() {
            Some((&0, rest)) => rest.to_vec(),
            _ => runs.clone(),
        };
        let expected: Vec<usize> = range.runs().iter().map(|r| r.length).collect();
        if len > 0 {
            assert_eq!(non_leading, expected);
            assert!(non_leading.iter().all(|&r| r >= 1));
        }
        // The first encoded run is always the incomplete one.
        if let Some(first) = range.runs().first() {
            assert_eq!(runs[0] == 0, first.complete);
        }
    }
}

#[test]
fn test_concrete_scenario_mixed() {
    let range = pattern("FFFTTTTFFF");
    let payload = encode_with(StrategyKind::RunLength, &range);
    assert_eq!(payload.bytes(), &[0x00, 0x03, 0x00, 0x04, 0x00, 0x03]);
    assert_eq!(decode_payload(&payload, 10).unwrap(), range);
}

#[test]
fn test_concrete_scenario_all_incomplete() {
    let range = pattern("FFFFF");
    let payload = encode_with(StrategyKind::RunLength, &range);
    assert_eq!(payload.bytes(), &[0x00, 0x05]);
    let decoded = decode_payload(&payload, 5).unwrap();
    assert_eq!(decoded, range);
    assert_eq!(decoded.complete_count(), 0);
}

#[test]
fn test_concrete_scenario_all_complete_keeps_leading_zero() {
    let range = pattern("TTTTT");
    let payload = encode_with(StrategyKind::RunLength, &range);
    assert_eq!(payload.bytes(), &[0x00, 0x00, 0x00, 0x05]);
    let decoded = decode_payload(&payload, 5).unwrap();
    assert_eq!(decoded, range);
    assert_eq!(decoded.complete_count(), 5);
}

#[test]
fn test_width_overflow_scenario() {
    let range: BitRange = std::iter::repeat(false).take(40_000).collect();

    let mut v1 = new_encoder(StrategyKind::RunLength, None);
    for index in 0..range.len() {
        v1.encode_incomplete_offset(index);
    }
    assert!(v1.serialise().is_err());

    let bitset = encode_with(StrategyKind::Bitset, &range);
    assert_eq!(bitset.encoding_type(), EncodingType::Bitset);
    assert_eq!(decode_payload(&bitset, range.len()).unwrap(), range);
}

#[test]
fn test_streaming_feed_matches_whole_range_encoding() {
    let mut rng = StdRng::seed_from_u64(99);
    let range = random_range(&mut rng, 777);
    let config = Arc::new(EncoderConfig::default());

    let mut streaming = SimultaneousEncoder::new(Arc::clone(&config));
    for (index, complete) in range.iter().enumerate() {
        if complete {
            streaming.encode_completed_offset(index);
        } else {
            streaming.encode_incomplete_offset(index);
        }
    }
    assert_eq!(streaming.encoded_count(), 777);
    assert_eq!(streaming.finish().unwrap(), encode_range(&range, &config).unwrap());
}
