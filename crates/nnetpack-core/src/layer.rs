use smallvec::SmallVec;

use crate::codec::DType;
use crate::error::{FormatError, Result};
use crate::sparse::count_index_length;

#[derive(Clone, Copy, Debug)]
pub struct EmbeddingLayer<'a> {
    pub nb_inputs: usize,
    pub dim: usize,
    pub embedding_weights: &'a [f32],
}

#[derive(Clone, Copy, Debug)]
pub struct DenseLayer<'a> {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub bias: &'a [f32],
    pub input_weights: &'a [f32],
}

#[derive(Clone, Copy, Debug)]
pub struct MDenseLayer<'a> {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub nb_channels: usize,
    pub bias: &'a [f32],
    pub input_weights: &'a [f32],
    pub factor: &'a [f32],
}

#[derive(Clone, Copy, Debug)]
pub struct Conv1dLayer<'a> {
    pub nb_inputs: usize,
    pub kernel_size: usize,
    pub nb_neurons: usize,
    pub input_weights: &'a [f32],
    pub bias: &'a [f32],
}

#[derive(Clone, Copy, Debug)]
pub struct GruLayer<'a> {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub bias: &'a [f32],
    pub input_weights: &'a [f32],
    pub recurrent_weights: &'a [f32],
}

/// GRU whose recurrent matrix is block-sparse around its diagonal.
///
/// `idx` may extend past the index structure; only the scanned prefix is
/// part of the layer.
#[derive(Clone, Copy, Debug)]
pub struct SparseGruLayer<'a> {
    pub nb_neurons: usize,
    pub bias: &'a [f32],
    pub diag_weights: &'a [f32],
    pub recurrent_weights: &'a [f32],
    pub idx: &'a [i32],
}

#[derive(Clone, Copy, Debug)]
pub enum LayerKind<'a> {
    Embedding(EmbeddingLayer<'a>),
    Dense(DenseLayer<'a>),
    MDense(MDenseLayer<'a>),
    Conv1d(Conv1dLayer<'a>),
    Gru(GruLayer<'a>),
    SparseGru(SparseGruLayer<'a>),
}

impl LayerKind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Embedding(_) => "embedding",
            LayerKind::Dense(_) => "dense",
            LayerKind::MDense(_) => "mdense",
            LayerKind::Conv1d(_) => "conv1d",
            LayerKind::Gru(_) => "gru",
            LayerKind::SparseGru(_) => "sparse_gru",
        }
    }
}

/// Backing data of one element group.
#[derive(Clone, Copy, Debug)]
pub enum GroupData<'a> {
    F32(&'a [f32]),
    /// Sparse index covering `rows` rows; only the first `count` entries
    /// of `idx` belong to the group.
    Index { rows: usize, idx: &'a [i32] },
}

impl GroupData<'_> {
    pub fn dtype(&self) -> DType {
        match self {
            GroupData::F32(_) => DType::F32,
            GroupData::Index { .. } => DType::I32,
        }
    }
}

/// One contiguous run of elements in the artifact.
#[derive(Clone, Copy, Debug)]
pub struct ElementGroup<'a> {
    pub label: &'static str,
    pub count: usize,
    pub data: GroupData<'a>,
}

/// A named layer borrowing its weights from the model description.
#[derive(Clone, Debug)]
pub struct Layer<'a> {
    pub name: String,
    pub kind: LayerKind<'a>,
}

impl<'a> Layer<'a> {
    pub fn new(name: impl Into<String>, kind: LayerKind<'a>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The element groups of this layer in artifact order, with counts
    /// computed from the declared dimensions.
    pub fn groups(&self) -> Result<SmallVec<[ElementGroup<'a>; 4]>> {
        let name = self.name.as_str();
        let product = |factors: &[usize]| -> Result<usize> {
            factors
                .iter()
                .try_fold(1usize, |acc, &f| acc.checked_mul(f))
                .ok_or_else(|| FormatError::DimensionOverflow {
                    layer: name.to_string(),
                })
        };

        let mut groups = SmallVec::new();
        match self.kind {
            LayerKind::Embedding(l) => {
                groups.push(floats(
                    name,
                    "weights",
                    product(&[l.nb_inputs, l.dim])?,
                    l.embedding_weights,
                )?);
            }
            LayerKind::Dense(l) => {
                groups.push(floats(name, "bias", l.nb_neurons, l.bias)?);
                groups.push(floats(
                    name,
                    "input",
                    product(&[l.nb_inputs, l.nb_neurons])?,
                    l.input_weights,
                )?);
            }
            LayerKind::MDense(l) => {
                let per_channel = product(&[l.nb_neurons, l.nb_channels])?;
                groups.push(floats(name, "bias", per_channel, l.bias)?);
                groups.push(floats(
                    name,
                    "input",
                    product(&[l.nb_inputs, l.nb_neurons, l.nb_channels])?,
                    l.input_weights,
                )?);
                groups.push(floats(name, "factor", per_channel, l.factor)?);
            }
            LayerKind::Conv1d(l) => {
                groups.push(floats(
                    name,
                    "input",
                    product(&[l.nb_inputs, l.kernel_size, l.nb_neurons])?,
                    l.input_weights,
                )?);
                groups.push(floats(name, "bias", l.nb_neurons, l.bias)?);
            }
            LayerKind::Gru(l) => {
                groups.push(floats(name, "bias", product(&[6, l.nb_neurons])?, l.bias)?);
                groups.push(floats(
                    name,
                    "input",
                    product(&[3, l.nb_inputs, l.nb_neurons])?,
                    l.input_weights,
                )?);
                groups.push(floats(
                    name,
                    "recurrent",
                    product(&[3, l.nb_neurons, l.nb_neurons])?,
                    l.recurrent_weights,
                )?);
            }
            LayerKind::SparseGru(l) => {
                let ndiag = product(&[3, l.nb_neurons])?;
                groups.push(floats(name, "bias", product(&[6, l.nb_neurons])?, l.bias)?);
                groups.push(floats(name, "diag", ndiag, l.diag_weights)?);
                groups.push(floats(
                    name,
                    "recurrent",
                    product(&[3, l.nb_neurons, l.nb_neurons])?,
                    l.recurrent_weights,
                )?);
                groups.push(ElementGroup {
                    label: "index",
                    count: count_index_length(ndiag, l.idx)?,
                    data: GroupData::Index {
                        rows: ndiag,
                        idx: l.idx,
                    },
                });
            }
        }
        Ok(groups)
    }

    pub fn counts(&self) -> Result<SmallVec<[usize; 4]>> {
        Ok(self.groups()?.iter().map(|g| g.count).collect())
    }
}

fn floats<'a>(
    layer: &str,
    label: &'static str,
    count: usize,
    data: &'a [f32],
) -> Result<ElementGroup<'a>> {
    if data.len() != count {
        return Err(FormatError::ShapeMismatch {
            layer: layer.to_string(),
            group: label,
            expected: count,
            actual: data.len(),
        });
    }
    Ok(ElementGroup {
        label,
        count,
        data: GroupData::F32(data),
    })
}
