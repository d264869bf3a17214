use nnetpack_core::{Layer, Model, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::NetworkConfig;
use crate::weights::{
    Conv1dWeights, DenseWeights, EmbeddingWeights, GruWeights, MDenseWeights, SparseGruWeights,
};

pub const DEFAULT_SEED: u64 = 0x6e6e_6574;

/// Layer names in artifact order.
pub const LAYER_NAMES: [&str; 14] = [
    "gru_a_embed_sig",
    "gru_a_embed_pred",
    "gru_a_embed_exc",
    "gru_a_dense_feature",
    "embed_pitch",
    "feature_conv1",
    "feature_conv2",
    "feature_dense1",
    "embed_sig",
    "feature_dense2",
    "gru_a",
    "gru_b",
    "dual_fc",
    "sparse_gru_a",
];

/// The reference network: owns every array the artifact is built from.
///
/// `gru_a_embed_exc` has no table of its own; it is written from the
/// `gru_a_embed_pred` table, so the artifact holds that table twice.
#[derive(Clone, Debug)]
pub struct ReferenceNetwork {
    pub config: NetworkConfig,
    pub gru_a_embed_sig: EmbeddingWeights,
    pub gru_a_embed_pred: EmbeddingWeights,
    pub gru_a_dense_feature: DenseWeights,
    pub embed_pitch: EmbeddingWeights,
    pub feature_conv1: Conv1dWeights,
    pub feature_conv2: Conv1dWeights,
    pub feature_dense1: DenseWeights,
    pub embed_sig: EmbeddingWeights,
    pub feature_dense2: DenseWeights,
    pub gru_a: GruWeights,
    pub gru_b: GruWeights,
    pub dual_fc: MDenseWeights,
    pub sparse_gru_a: SparseGruWeights,
}

impl ReferenceNetwork {
    /// Fills every layer with uniform weights drawn from `seed`.
    pub fn generate(config: &NetworkConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = config;
        let gru_a_inputs = 3 * c.gru_a_size;

        Ok(Self {
            config: c.clone(),
            gru_a_embed_sig: EmbeddingWeights::random(&mut rng, c.embed_inputs, gru_a_inputs),
            gru_a_embed_pred: EmbeddingWeights::random(&mut rng, c.embed_inputs, gru_a_inputs),
            gru_a_dense_feature: DenseWeights::random(&mut rng, c.cond_size, gru_a_inputs),
            embed_pitch: EmbeddingWeights::random(
                &mut rng,
                c.embed_inputs,
                c.pitch_embed_size,
            ),
            feature_conv1: Conv1dWeights::random(
                &mut rng,
                c.feature_inputs,
                c.conv_kernel,
                c.cond_size,
            ),
            feature_conv2: Conv1dWeights::random(
                &mut rng,
                c.cond_size,
                c.conv_kernel,
                c.cond_size,
            ),
            feature_dense1: DenseWeights::random(&mut rng, c.cond_size, c.cond_size),
            embed_sig: EmbeddingWeights::random(&mut rng, c.embed_inputs, c.cond_size),
            feature_dense2: DenseWeights::random(&mut rng, c.cond_size, c.cond_size),
            gru_a: GruWeights::random(&mut rng, c.cond_size, c.gru_a_size),
            gru_b: GruWeights::random(&mut rng, c.gru_a_size + c.cond_size, c.gru_b_size),
            dual_fc: MDenseWeights::random(
                &mut rng,
                c.gru_b_size,
                c.embed_inputs,
                c.dual_fc_channels,
            ),
            sparse_gru_a: SparseGruWeights::random(&mut rng, c.gru_a_size, c.sparse_block_cols)?,
        })
    }

    /// Borrows the whole network as a model in artifact order.
    pub fn model(&self) -> Model<'_> {
        let layers = [
            self.gru_a_embed_sig.as_layer(),
            self.gru_a_embed_pred.as_layer(),
            self.gru_a_embed_pred.as_layer(),
            self.gru_a_dense_feature.as_layer(),
            self.embed_pitch.as_layer(),
            self.feature_conv1.as_layer(),
            self.feature_conv2.as_layer(),
            self.feature_dense1.as_layer(),
            self.embed_sig.as_layer(),
            self.feature_dense2.as_layer(),
            self.gru_a.as_layer(),
            self.gru_b.as_layer(),
            self.dual_fc.as_layer(),
            self.sparse_gru_a.as_layer(),
        ];
        LAYER_NAMES
            .iter()
            .zip(layers)
            .map(|(name, kind)| Layer::new(*name, kind))
            .collect()
    }
}
