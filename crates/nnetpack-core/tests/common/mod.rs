#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use nnetpack_core::{
    encode_blocks, Conv1dLayer, DenseLayer, EmbeddingLayer, GruLayer, LayerKind, MDenseLayer,
    Model, SparseGruLayer, BLOCK_ROWS,
};

/// Layer dimensions for a model holding one layer of every kind.
#[derive(Clone, Copy, Debug)]
pub struct Dims {
    pub inputs: usize,
    pub neurons: usize,
    pub channels: usize,
    pub kernel: usize,
}

impl Dims {
    pub const SMALL: Dims = Dims {
        inputs: 5,
        neurons: 3,
        channels: 2,
        kernel: 3,
    };
}

/// Owns every array a test model borrows.
pub struct Weights {
    pub dims: Dims,
    pub embed: Vec<f32>,
    pub dense_bias: Vec<f32>,
    pub dense_input: Vec<f32>,
    pub mdense_bias: Vec<f32>,
    pub mdense_input: Vec<f32>,
    pub mdense_factor: Vec<f32>,
    pub conv_input: Vec<f32>,
    pub conv_bias: Vec<f32>,
    pub gru_bias: Vec<f32>,
    pub gru_input: Vec<f32>,
    pub gru_recurrent: Vec<f32>,
    pub sparse_bias: Vec<f32>,
    pub sparse_diag: Vec<f32>,
    pub sparse_recurrent: Vec<f32>,
    pub sparse_idx: Vec<i32>,
}

impl Weights {
    pub fn new(dims: Dims, seed: u64) -> Self {
        Self::build(dims, seed, false)
    }

    /// Arbitrary bit patterns, NaNs and signed zeros included.
    pub fn with_raw_bits(dims: Dims, seed: u64) -> Self {
        Self::build(dims, seed, true)
    }

    fn build(dims: Dims, seed: u64, raw: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut floats = |n: usize| -> Vec<f32> {
            if raw {
                (0..n).map(|_| f32::from_bits(rng.gen::<u32>())).collect()
            } else {
                (0..n).map(|_| rng.gen_range(-10.0f32..10.0)).collect()
            }
        };
        let Dims {
            inputs: i,
            neurons: n,
            channels: c,
            kernel: k,
        } = dims;

        let embed = floats(i * n);
        let dense_bias = floats(n);
        let dense_input = floats(i * n);
        let mdense_bias = floats(n * c);
        let mdense_input = floats(i * n * c);
        let mdense_factor = floats(n * c);
        let conv_input = floats(i * k * n);
        let conv_bias = floats(n);
        let gru_bias = floats(6 * n);
        let gru_input = floats(3 * i * n);
        let gru_recurrent = floats(3 * n * n);
        let sparse_bias = floats(6 * n);
        let sparse_diag = floats(3 * n);
        let sparse_recurrent = floats(3 * n * n);

        let rows = 3 * n;
        let blocks: Vec<Vec<i32>> = (0..rows.div_ceil(BLOCK_ROWS))
            .map(|b| {
                let cols = ((b as u64).wrapping_add(seed) % 3) as usize;
                (0..cols).map(|j| (4 * j) as i32).collect()
            })
            .collect();
        let sparse_idx = encode_blocks(&blocks).expect("small index");

        Self {
            dims,
            embed,
            dense_bias,
            dense_input,
            mdense_bias,
            mdense_input,
            mdense_factor,
            conv_input,
            conv_bias,
            gru_bias,
            gru_input,
            gru_recurrent,
            sparse_bias,
            sparse_diag,
            sparse_recurrent,
            sparse_idx,
        }
    }

    pub fn embedding(&self) -> LayerKind<'_> {
        LayerKind::Embedding(EmbeddingLayer {
            nb_inputs: self.dims.inputs,
            dim: self.dims.neurons,
            embedding_weights: &self.embed,
        })
    }

    pub fn dense(&self) -> LayerKind<'_> {
        LayerKind::Dense(DenseLayer {
            nb_inputs: self.dims.inputs,
            nb_neurons: self.dims.neurons,
            bias: &self.dense_bias,
            input_weights: &self.dense_input,
        })
    }

    pub fn mdense(&self) -> LayerKind<'_> {
        LayerKind::MDense(MDenseLayer {
            nb_inputs: self.dims.inputs,
            nb_neurons: self.dims.neurons,
            nb_channels: self.dims.channels,
            bias: &self.mdense_bias,
            input_weights: &self.mdense_input,
            factor: &self.mdense_factor,
        })
    }

    pub fn conv1d(&self) -> LayerKind<'_> {
        LayerKind::Conv1d(Conv1dLayer {
            nb_inputs: self.dims.inputs,
            kernel_size: self.dims.kernel,
            nb_neurons: self.dims.neurons,
            input_weights: &self.conv_input,
            bias: &self.conv_bias,
        })
    }

    pub fn gru(&self) -> LayerKind<'_> {
        LayerKind::Gru(GruLayer {
            nb_inputs: self.dims.inputs,
            nb_neurons: self.dims.neurons,
            bias: &self.gru_bias,
            input_weights: &self.gru_input,
            recurrent_weights: &self.gru_recurrent,
        })
    }

    pub fn sparse_gru(&self) -> LayerKind<'_> {
        LayerKind::SparseGru(SparseGruLayer {
            nb_neurons: self.dims.neurons,
            bias: &self.sparse_bias,
            diag_weights: &self.sparse_diag,
            recurrent_weights: &self.sparse_recurrent,
            idx: &self.sparse_idx,
        })
    }

    pub fn model(&self) -> Model<'_> {
        Model::new()
            .with_layer("embed", self.embedding())
            .with_layer("dense", self.dense())
            .with_layer("mdense", self.mdense())
            .with_layer("conv1d", self.conv1d())
            .with_layer("gru", self.gru())
            .with_layer("sparse_gru", self.sparse_gru())
    }
}
