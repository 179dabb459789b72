//! Property tests for the windowing and ownership invariants.

use oxibits_core::BitBuffer;
use proptest::prelude::*;

/// Build a buffer from whole bytes plus a few trailing bits.
fn build(bytes: &[u8], tail: &[bool]) -> BitBuffer {
    let mut buf = BitBuffer::from(bytes);
    buf.extend(tail.iter().copied());
    buf
}

fn decode_lsb_first(s: &str) -> Vec<u8> {
    s.as_bytes()
        .chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &c)| acc | (u8::from(c == b'1') << i))
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_string_round_trip(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let buf = BitBuffer::from(&bytes[..]);
        prop_assert_eq!(decode_lsb_first(&buf.to_string()), bytes);
    }

    #[test]
    fn prop_recalibrate_idempotent(
        bytes in proptest::collection::vec(any::<u8>(), 0..32),
        tail in proptest::collection::vec(any::<bool>(), 0..8),
        skip in 0usize..300,
    ) {
        let mut once = build(&bytes, &tail);
        once.advance(skip);
        once.recalibrate();
        let snapshot = once.to_string();
        let bits = once.bits();

        once.recalibrate();
        prop_assert_eq!(once.to_string(), snapshot);
        prop_assert_eq!(once.bits(), bits);
        prop_assert_eq!(once.offset(), 0);
    }

    #[test]
    fn prop_advance_rewind_inverse(
        bytes in proptest::collection::vec(any::<u8>(), 0..32),
        tail in proptest::collection::vec(any::<bool>(), 0..8),
        step in 0usize..300,
    ) {
        let mut buf = build(&bytes, &tail);
        let before = buf.clone();
        let n = step.min(buf.bits());

        prop_assert_eq!(buf.advance(n), n);
        prop_assert_eq!(buf.rewind(n), n);
        prop_assert_eq!(buf.bits(), before.bits());
        prop_assert_eq!(&buf, &before);
    }

    #[test]
    fn prop_join_concatenates(
        left in proptest::collection::vec(any::<bool>(), 0..100),
        right in proptest::collection::vec(any::<bool>(), 0..100),
        hidden in 0usize..20,
    ) {
        let mut a: BitBuffer = left.iter().copied().collect();
        let mut b: BitBuffer = right.iter().copied().collect();
        b.advance(hidden);

        let mut expected: Vec<bool> = left.clone();
        expected.extend(right.iter().skip(hidden).copied());

        a.join(&mut b);
        prop_assert!(b.is_empty());
        prop_assert_eq!(b.offset(), 0);
        prop_assert_eq!(a.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_remove_matches_vec(
        bits in proptest::collection::vec(any::<bool>(), 1..120),
        start in 0usize..120,
        count in 0usize..130,
    ) {
        let start = start % bits.len();
        let mut buf: BitBuffer = bits.iter().copied().collect();
        let removed = buf.remove_bits(start, count).unwrap();

        let mut expected = bits.clone();
        let end = (start + count).min(expected.len());
        expected.drain(start..end);

        prop_assert_eq!(removed, end - start);
        prop_assert_eq!(buf.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_shifts_match_vec(
        bits in proptest::collection::vec(any::<bool>(), 0..120),
        hidden in 0usize..16,
        n in 0usize..130,
    ) {
        let mut buf: BitBuffer = bits.iter().copied().collect();
        buf.advance(hidden);
        let window: Vec<bool> = buf.iter().collect();
        let len = window.len();
        let k = n.min(len);

        let mut left = buf.clone();
        left.shift_left(n);
        let mut expected = vec![false; k];
        expected.extend_from_slice(&window[..len - k]);
        prop_assert_eq!(left.iter().collect::<Vec<_>>(), expected);

        let mut right = buf.clone();
        right.shift_right(n);
        let mut expected = window[k..].to_vec();
        expected.resize(len, false);
        prop_assert_eq!(right.iter().collect::<Vec<_>>(), expected);

        // Hidden prefix is untouched.
        left.rewind(hidden);
        let restored: Vec<bool> = left.iter().take(hidden.min(bits.len())).collect();
        prop_assert_eq!(&restored[..], &bits[..hidden.min(bits.len())]);
    }

    #[test]
    fn prop_peek_matches_bits(
        bits in proptest::collection::vec(any::<bool>(), 0..100),
        index in 0usize..100,
        count in 0u8..=32,
    ) {
        let buf: BitBuffer = bits.iter().copied().collect();
        match buf.peek_bits(index, count) {
            Ok(value) => {
                for i in 0..count as usize {
                    prop_assert_eq!(value >> i & 1 == 1, bits[index + i]);
                }
            }
            Err(_) => prop_assert!(index + count as usize > bits.len()),
        }
    }
}
