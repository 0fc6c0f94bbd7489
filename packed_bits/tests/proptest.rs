// tests/proptest.rs

use proptest::prelude::*;
use packed_bits::{BitVector, WORD_BITS};

//
// -----------------------------------------------------------------------------
// Helper Functions
// -----------------------------------------------------------------------------

fn from_model(model: &[bool]) -> BitVector {
    let mut bits = BitVector::new();
    for &b in model {
        bits.push(b).unwrap();
    }
    bits
}

fn skip_ones_model(model: &[bool], mut pos: usize) -> usize {
    while pos < model.len() && model[pos] {
        pos += 1;
    }
    pos
}

//
// -----------------------------------------------------------------------------
// BitVector Properties - Basic Operations
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_push_and_get_roundtrip(values in prop::collection::vec(any::<bool>(), 0..1000)) {
        let bits = from_model(&values);

        prop_assert_eq!(bits.len(), values.len());
        prop_assert!(bits.capacity() >= bits.len());

        for (i, &expected) in values.iter().enumerate() {
            prop_assert_eq!(bits.get(i), Ok(expected));
        }
    }
}

proptest! {
    #[test]
    fn prop_set_updates_only_target(
        values in prop::collection::vec(any::<bool>(), 1..400),
        update_idx in 0usize..400,
        new_val: bool
    ) {
        let mut bits = from_model(&values);
        let idx = update_idx % values.len();

        bits.set(idx, new_val).unwrap();
        prop_assert_eq!(bits.get(idx), Ok(new_val));

        for (i, &expected) in values.iter().enumerate() {
            if i != idx {
                prop_assert_eq!(bits.get(i), Ok(expected));
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_iterator_matches_get(values in prop::collection::vec(any::<bool>(), 0..500)) {
        let bits = from_model(&values);

        let collected: Vec<_> = bits.iter().collect();
        prop_assert_eq!(&collected, &values);

        let reversed: Vec<_> = bits.iter().rev().collect();
        let expected: Vec<_> = values.iter().rev().copied().collect();
        prop_assert_eq!(reversed, expected);
    }
}

proptest! {
    #[test]
    fn prop_count_ones(values in prop::collection::vec(any::<bool>(), 0..700)) {
        let bits = from_model(&values);
        prop_assert_eq!(bits.count_ones(), values.iter().filter(|&&b| b).count());
    }
}

//
// -----------------------------------------------------------------------------
// BitVector Properties - Copies and Bulk Reset
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_clone_is_independent(
        values in prop::collection::vec(any::<bool>(), 1..300),
        idx: usize
    ) {
        let mut original = from_model(&values);
        let mut copy = original.clone();
        let i = idx % values.len();

        original.set(i, !values[i]).unwrap();
        prop_assert_eq!(copy.get(i), Ok(values[i]));

        copy.set(i, !values[i]).unwrap();
        prop_assert_eq!(&copy, &original);

        copy.set(i, values[i]).unwrap();
        prop_assert_eq!(original.get(i), Ok(!values[i]));
    }
}

proptest! {
    #[test]
    fn prop_assign_fills(before in 0usize..500, after in 0usize..500, first: bool, value: bool) {
        let mut bits = BitVector::with_len(before, first).unwrap();
        let words_before = bits.word_capacity();

        bits.assign(after, value).unwrap();

        prop_assert_eq!(bits.len(), after);
        prop_assert!(bits.iter().all(|b| b == value));
        prop_assert!(bits.word_capacity() >= words_before);

        let fill = if value { u32::MAX } else { 0 };
        prop_assert!(bits.as_words().iter().all(|&w| w == fill));
    }
}

//
// -----------------------------------------------------------------------------
// BitVector Properties - Bulk Marking and Run Scan
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_progression_matches_model(
        len in 1usize..2000,
        start in 0usize..2000,
        stride in 1usize..97,
        count in 0usize..200
    ) {
        let start = start % len;
        let fit = (len - 1 - start) / stride + 1;
        let count = count.min(fit);

        let mut bits = BitVector::with_len(len, false).unwrap();
        unsafe { bits.set_progression_unchecked(start, stride, count) };

        let mut model = vec![false; len];
        for i in 0..count {
            model[start + i * stride] = true;
        }
        prop_assert_eq!(bits.iter().collect::<Vec<_>>(), model);
    }
}

proptest! {
    #[test]
    fn prop_stride_one_prefix(len in 1usize..1500, k in 0usize..1500) {
        let k = k.min(len);
        let mut bits = BitVector::with_len(len, false).unwrap();
        bits.set_progression(0, 1, k).unwrap();

        for pos in 0..len {
            prop_assert_eq!(bits.get(pos), Ok(pos < k));
        }
    }
}

proptest! {
    #[test]
    fn prop_skip_ones_matches_model(
        values in prop::collection::vec(prop::bool::weighted(0.95), 1..1200),
        start in 0usize..1200
    ) {
        let bits = from_model(&values);
        let start = start % values.len();
        prop_assert_eq!(bits.skip_ones(start), Ok(skip_ones_model(&values, start)));
    }
}

proptest! {
    #[test]
    fn prop_skip_ones_single_hole(words in 1usize..20, hole in 0usize..640, start in 0usize..640) {
        let len = words * WORD_BITS + 7;
        let hole = hole % len;
        let start = start % len;

        let mut bits = BitVector::with_len(len, true).unwrap();
        bits.set(hole, false).unwrap();

        let expected = if start <= hole { hole } else { len };
        prop_assert_eq!(bits.skip_ones(start), Ok(expected));
    }
}
