use nnetpack_core::{block_count, encode_blocks, Result};
use rand::seq::index::sample;
use rand::Rng;

/// Column groups are four columns wide.
pub const COLUMN_GROUP: usize = 4;

/// Random block-sparse index over `rows` rows and `cols` columns.
///
/// Each block picks up to `max_block_cols` distinct column groups, listed by
/// their first column in ascending order.
pub fn random_index<R: Rng>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    max_block_cols: usize,
) -> Result<Vec<i32>> {
    let groups = cols / COLUMN_GROUP;
    let limit = max_block_cols.min(groups);
    let blocks: Vec<Vec<i32>> = (0..block_count(rows))
        .map(|_| {
            let amount = rng.gen_range(0..=limit);
            let mut picked = sample(&mut *rng, groups, amount).into_vec();
            picked.sort_unstable();
            picked
                .into_iter()
                .map(|g| (g * COLUMN_GROUP) as i32)
                .collect()
        })
        .collect();
    encode_blocks(&blocks)
}
