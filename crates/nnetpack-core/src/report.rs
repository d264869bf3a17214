use std::fmt;

use smallvec::SmallVec;

use crate::codec::DType;
use crate::layer::{ElementGroup, Layer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupReport {
    pub label: &'static str,
    pub dtype: DType,
    pub count: usize,
}

/// Where one layer sits in the artifact and what it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerReport {
    pub name: String,
    pub kind: &'static str,
    pub groups: SmallVec<[GroupReport; 4]>,
    /// Byte offset of the first element of the layer.
    pub offset: u64,
    pub byte_len: u64,
}

impl LayerReport {
    pub(crate) fn from_groups(
        layer: &Layer<'_>,
        groups: &[ElementGroup<'_>],
        offset: u64,
    ) -> Self {
        let groups: SmallVec<[GroupReport; 4]> = groups
            .iter()
            .map(|g| GroupReport {
                label: g.label,
                dtype: g.data.dtype(),
                count: g.count,
            })
            .collect();
        let byte_len = groups
            .iter()
            .map(|g| (g.count * g.dtype.byte_size()) as u64)
            .sum();
        Self {
            name: layer.name.clone(),
            kind: layer.kind.name(),
            groups,
            offset,
            byte_len,
        }
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().map(|g| g.count)
    }

    pub fn end(&self) -> u64 {
        self.offset + self.byte_len
    }

    pub fn contains(&self, offset: u64) -> bool {
        (self.offset..self.end()).contains(&offset)
    }
}

impl fmt::Display for LayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for count in self.counts() {
            write!(f, " {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn display_lists_counts_in_order() {
        let report = LayerReport {
            name: "feature_dense1".to_string(),
            kind: "dense",
            groups: smallvec![
                GroupReport {
                    label: "bias",
                    dtype: DType::F32,
                    count: 3,
                },
                GroupReport {
                    label: "input",
                    dtype: DType::F32,
                    count: 15,
                },
            ],
            offset: 40,
            byte_len: 72,
        };
        assert_eq!(report.to_string(), "feature_dense1: 3 15");
        assert!(report.contains(40));
        assert!(report.contains(111));
        assert!(!report.contains(112));
    }
}
