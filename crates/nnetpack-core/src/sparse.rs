//! Block-sparse row index.
//!
//! Rows are grouped in blocks of [`BLOCK_ROWS`]. Each block is stored as a
//! count `c` followed by `c` column indices, and the blocks follow each other
//! with nothing in between. No total length is stored anywhere: the only way
//! to find the end of the structure is to walk it with [`scan_index`].

use crate::error::{FormatError, Result};

pub const BLOCK_ROWS: usize = 16;

/// Number of blocks covering `rows`; a short final block still counts.
pub fn block_count(rows: usize) -> usize {
    rows.div_ceil(BLOCK_ROWS)
}

/// Walks an index covering `rows` rows, pulling entries through `next`.
///
/// `next` receives the entry position and returns the entry stored there.
/// Returns the number of entries the structure occupies. The write side and
/// the verify side both go through this function so the two cannot disagree
/// on where the index ends.
pub fn scan_index<F>(rows: usize, mut next: F) -> Result<usize>
where
    F: FnMut(usize) -> Result<i32>,
{
    let mut pos = 0usize;
    for block in 0..block_count(rows) {
        let count = next(pos)?;
        let cols =
            usize::try_from(count).map_err(|_| FormatError::NegativeIndexCount { block, count })?;
        pos += 1;
        for _ in 0..cols {
            next(pos)?;
            pos += 1;
        }
    }
    Ok(pos)
}

/// Length in entries of the index structure at the head of `idx`.
pub fn count_index_length(rows: usize, idx: &[i32]) -> Result<usize> {
    scan_index(rows, |pos| {
        idx.get(pos).copied().ok_or(FormatError::IndexOverrun {
            rows,
            len: idx.len(),
        })
    })
}

/// Splits an index into its per-block column lists.
pub fn decode_blocks(rows: usize, idx: &[i32]) -> Result<Vec<&[i32]>> {
    let mut blocks = Vec::with_capacity(block_count(rows));
    let mut pos = 0usize;
    for block in 0..block_count(rows) {
        let overrun = || FormatError::IndexOverrun {
            rows,
            len: idx.len(),
        };
        let count = *idx.get(pos).ok_or_else(overrun)?;
        let cols =
            usize::try_from(count).map_err(|_| FormatError::NegativeIndexCount { block, count })?;
        let start = pos + 1;
        let end = start.checked_add(cols).ok_or_else(overrun)?;
        blocks.push(idx.get(start..end).ok_or_else(overrun)?);
        pos = end;
    }
    Ok(blocks)
}

/// Builds the count-prefixed encoding from per-block column lists.
pub fn encode_blocks<B: AsRef<[i32]>>(blocks: &[B]) -> Result<Vec<i32>> {
    let total = blocks.iter().map(|b| 1 + b.as_ref().len()).sum();
    let mut idx = Vec::with_capacity(total);
    for (block, cols) in blocks.iter().enumerate() {
        let cols = cols.as_ref();
        let count = i32::try_from(cols.len()).map_err(|_| FormatError::DimensionOverflow {
            layer: format!("sparse index block {block}"),
        })?;
        idx.push(count);
        idx.extend_from_slice(cols);
    }
    Ok(idx)
}
