//! Owned weight arrays for each layer kind.
//!
//! These are the storage side of the reference network; `as_layer` lends
//! them to the format library for one write or verify pass.

use nnetpack_core::{
    Conv1dLayer, DenseLayer, EmbeddingLayer, GruLayer, LayerKind, MDenseLayer, SparseGruLayer,
};
use rand::Rng;

fn uniform<R: Rng>(rng: &mut R, n: usize) -> Vec<f32> {
    (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}

#[derive(Clone, Debug)]
pub struct EmbeddingWeights {
    pub nb_inputs: usize,
    pub dim: usize,
    pub weights: Vec<f32>,
}

impl EmbeddingWeights {
    pub fn random<R: Rng>(rng: &mut R, nb_inputs: usize, dim: usize) -> Self {
        Self {
            nb_inputs,
            dim,
            weights: uniform(rng, nb_inputs * dim),
        }
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::Embedding(EmbeddingLayer {
            nb_inputs: self.nb_inputs,
            dim: self.dim,
            embedding_weights: &self.weights,
        })
    }
}

#[derive(Clone, Debug)]
pub struct DenseWeights {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub bias: Vec<f32>,
    pub input_weights: Vec<f32>,
}

impl DenseWeights {
    pub fn random<R: Rng>(rng: &mut R, nb_inputs: usize, nb_neurons: usize) -> Self {
        Self {
            nb_inputs,
            nb_neurons,
            bias: uniform(rng, nb_neurons),
            input_weights: uniform(rng, nb_inputs * nb_neurons),
        }
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::Dense(DenseLayer {
            nb_inputs: self.nb_inputs,
            nb_neurons: self.nb_neurons,
            bias: &self.bias,
            input_weights: &self.input_weights,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MDenseWeights {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub nb_channels: usize,
    pub bias: Vec<f32>,
    pub input_weights: Vec<f32>,
    pub factor: Vec<f32>,
}

impl MDenseWeights {
    pub fn random<R: Rng>(
        rng: &mut R,
        nb_inputs: usize,
        nb_neurons: usize,
        nb_channels: usize,
    ) -> Self {
        let per_channel = nb_neurons * nb_channels;
        Self {
            nb_inputs,
            nb_neurons,
            nb_channels,
            bias: uniform(rng, per_channel),
            input_weights: uniform(rng, nb_inputs * per_channel),
            factor: uniform(rng, per_channel),
        }
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::MDense(MDenseLayer {
            nb_inputs: self.nb_inputs,
            nb_neurons: self.nb_neurons,
            nb_channels: self.nb_channels,
            bias: &self.bias,
            input_weights: &self.input_weights,
            factor: &self.factor,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Conv1dWeights {
    pub nb_inputs: usize,
    pub kernel_size: usize,
    pub nb_neurons: usize,
    pub input_weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl Conv1dWeights {
    pub fn random<R: Rng>(
        rng: &mut R,
        nb_inputs: usize,
        kernel_size: usize,
        nb_neurons: usize,
    ) -> Self {
        Self {
            nb_inputs,
            kernel_size,
            nb_neurons,
            input_weights: uniform(rng, nb_inputs * kernel_size * nb_neurons),
            bias: uniform(rng, nb_neurons),
        }
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::Conv1d(Conv1dLayer {
            nb_inputs: self.nb_inputs,
            kernel_size: self.kernel_size,
            nb_neurons: self.nb_neurons,
            input_weights: &self.input_weights,
            bias: &self.bias,
        })
    }
}

#[derive(Clone, Debug)]
pub struct GruWeights {
    pub nb_inputs: usize,
    pub nb_neurons: usize,
    pub bias: Vec<f32>,
    pub input_weights: Vec<f32>,
    pub recurrent_weights: Vec<f32>,
}

impl GruWeights {
    pub fn random<R: Rng>(rng: &mut R, nb_inputs: usize, nb_neurons: usize) -> Self {
        Self {
            nb_inputs,
            nb_neurons,
            bias: uniform(rng, 6 * nb_neurons),
            input_weights: uniform(rng, 3 * nb_inputs * nb_neurons),
            recurrent_weights: uniform(rng, 3 * nb_neurons * nb_neurons),
        }
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::Gru(GruLayer {
            nb_inputs: self.nb_inputs,
            nb_neurons: self.nb_neurons,
            bias: &self.bias,
            input_weights: &self.input_weights,
            recurrent_weights: &self.recurrent_weights,
        })
    }
}

#[derive(Clone, Debug)]
pub struct SparseGruWeights {
    pub nb_neurons: usize,
    pub bias: Vec<f32>,
    pub diag_weights: Vec<f32>,
    pub recurrent_weights: Vec<f32>,
    pub idx: Vec<i32>,
}

impl SparseGruWeights {
    pub fn random<R: Rng>(
        rng: &mut R,
        nb_neurons: usize,
        max_block_cols: usize,
    ) -> nnetpack_core::Result<Self> {
        let rows = 3 * nb_neurons;
        Ok(Self {
            nb_neurons,
            bias: uniform(rng, 6 * nb_neurons),
            diag_weights: uniform(rng, rows),
            recurrent_weights: uniform(rng, rows * nb_neurons),
            idx: crate::index::random_index(rng, rows, nb_neurons, max_block_cols)?,
        })
    }

    pub fn as_layer(&self) -> LayerKind<'_> {
        LayerKind::SparseGru(SparseGruLayer {
            nb_neurons: self.nb_neurons,
            bias: &self.bias,
            diag_weights: &self.diag_weights,
            recurrent_weights: &self.recurrent_weights,
            idx: &self.idx,
        })
    }
}
