//! Per-layer write and check.
//!
//! Both directions walk [`Layer::groups`], so element order and counts are
//! defined in one place for every layer kind.

use std::io::{Read, Write};

use tracing::{debug, error, info};

use crate::codec::{first_difference_f32, ElementReader, ElementWriter, ELEMENT_BYTES};
use crate::error::{FormatError, Result};
use crate::layer::{ElementGroup, GroupData, Layer};
use crate::report::LayerReport;
use crate::sparse::scan_index;

pub fn write_layer<W: Write>(
    layer: &Layer<'_>,
    out: &mut ElementWriter<W>,
) -> Result<LayerReport> {
    let groups = layer.groups()?;
    let report = LayerReport::from_groups(layer, &groups, out.offset());
    info!(layer = %layer.name, kind = report.kind, counts = ?counts(&report), "write");

    for group in &groups {
        match group.data {
            GroupData::F32(values) => out.write_f32s(values)?,
            GroupData::Index { rows, idx } => {
                let entries = idx.get(..group.count).ok_or(FormatError::IndexOverrun {
                    rows,
                    len: idx.len(),
                })?;
                out.write_i32s(entries)?;
            }
        }
    }

    debug!(layer = %layer.name, offset = report.offset, end = out.offset(), "layer written");
    Ok(report)
}

/// Reads one layer back and compares it bit for bit with the live weights.
///
/// Read-back buffers live only for the duration of one group comparison.
pub fn check_layer<R: Read>(
    layer: &Layer<'_>,
    input: &mut ElementReader<R>,
) -> Result<LayerReport> {
    let groups = layer.groups()?;
    let report = LayerReport::from_groups(layer, &groups, input.offset());
    info!(layer = %layer.name, kind = report.kind, counts = ?counts(&report), "check");

    for group in &groups {
        let outcome = match group.data {
            GroupData::F32(expected) => check_floats(layer, group, expected, input),
            GroupData::Index { rows, idx } => check_index(layer, group, rows, idx, input),
        };
        if let Err(err) = outcome {
            error!(layer = %layer.name, group = group.label, error = %err, "FAIL");
            return Err(err);
        }
    }

    info!(layer = %layer.name, "OK");
    Ok(report)
}

fn check_floats<R: Read>(
    layer: &Layer<'_>,
    group: &ElementGroup<'_>,
    expected: &[f32],
    input: &mut ElementReader<R>,
) -> Result<()> {
    let start = input.offset();
    let actual = input.read_f32s(group.count)?;
    if actual.len() < group.count {
        return Err(FormatError::ShortRead {
            layer: layer.name.clone(),
            group: group.label,
            expected: group.count,
            actual: actual.len(),
        });
    }
    match first_difference_f32(expected, &actual) {
        Some(index) => Err(mismatch(layer, group, start, index)),
        None => Ok(()),
    }
}

/// Decodes the index straight from the stream, comparing each entry as it
/// arrives so a corrupted block count is caught before it is followed.
fn check_index<R: Read>(
    layer: &Layer<'_>,
    group: &ElementGroup<'_>,
    rows: usize,
    idx: &[i32],
    input: &mut ElementReader<R>,
) -> Result<()> {
    let start = input.offset();
    let expected = idx.get(..group.count).unwrap_or(idx);

    let scanned = scan_index(rows, |pos| {
        let Some(value) = input.read_i32()? else {
            return Err(FormatError::ShortRead {
                layer: layer.name.clone(),
                group: group.label,
                expected: group.count,
                actual: pos,
            });
        };
        if expected.get(pos) != Some(&value) {
            return Err(mismatch(layer, group, start, pos));
        }
        Ok(value)
    })?;

    if scanned != expected.len() {
        return Err(mismatch(layer, group, start, scanned.min(expected.len())));
    }
    Ok(())
}

fn mismatch(
    layer: &Layer<'_>,
    group: &ElementGroup<'_>,
    start: u64,
    index: usize,
) -> FormatError {
    FormatError::Mismatch {
        layer: layer.name.clone(),
        group: group.label,
        index,
        offset: start + (index * ELEMENT_BYTES) as u64,
    }
}

fn counts(report: &LayerReport) -> Vec<usize> {
    report.counts().collect()
}
