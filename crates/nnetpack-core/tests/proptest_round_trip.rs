//! Property-based round-trip tests over arbitrary layer shapes.

mod common;

use common::{Dims, Weights};
use nnetpack_core::{count_index_length, encode_blocks, ModelVerifier, ModelWriter};
use proptest::prelude::*;

fn dims() -> impl Strategy<Value = Dims> {
    (0usize..7, 0usize..9, 0usize..4, 0usize..4).prop_map(|(inputs, neurons, channels, kernel)| {
        Dims {
            inputs,
            neurons,
            channels,
            kernel,
        }
    })
}

proptest! {
    /// Writing then verifying any consistent model succeeds.
    #[test]
    fn prop_model_round_trips(dims in dims(), seed in any::<u64>(), raw in any::<bool>()) {
        let weights = if raw {
            Weights::with_raw_bits(dims, seed)
        } else {
            Weights::new(dims, seed)
        };
        let model = weights.model();

        let mut writer = ModelWriter::new(Vec::new());
        let written = writer.write_model(&model).unwrap();
        let bytes = writer.finish().unwrap();
        prop_assert_eq!(bytes.len() as u64, written.total_bytes());

        let verified = ModelVerifier::new(&bytes[..]).verify_model(&model).unwrap();
        prop_assert_eq!(written, verified);
    }

    /// The scanned index length is one count per block plus its entries.
    #[test]
    fn prop_index_length_matches_blocks(
        blocks in prop::collection::vec(prop::collection::vec(0i32..512, 0..6), 0..10),
        short_tail in 0usize..16,
    ) {
        let idx = encode_blocks(&blocks).unwrap();
        let rows = if blocks.is_empty() {
            0
        } else {
            blocks.len() * 16 - short_tail
        };
        let expected: usize = blocks.iter().map(|b| 1 + b.len()).sum();
        prop_assert_eq!(count_index_length(rows, &idx).unwrap(), expected);
    }
}
