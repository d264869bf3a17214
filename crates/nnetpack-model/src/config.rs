/// Dimensions of the reference network.
///
/// Every layer shape is derived from these; changing one field changes the
/// artifact layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Alphabet size of the sample embeddings (mu-law levels).
    pub embed_inputs: usize,
    /// Units in the first recurrent layer.
    pub gru_a_size: usize,
    /// Units in the second recurrent layer.
    pub gru_b_size: usize,
    /// Width of the frame features entering the first convolution.
    pub feature_inputs: usize,
    /// Width of the conditioning network.
    pub cond_size: usize,
    pub pitch_embed_size: usize,
    pub conv_kernel: usize,
    pub dual_fc_channels: usize,
    /// Upper bound on active column groups per 16-row block of the sparse GRU.
    pub sparse_block_cols: usize,
}

impl NetworkConfig {
    /// Small network with the same layer sequence, for tests.
    pub fn tiny() -> Self {
        Self {
            embed_inputs: 16,
            gru_a_size: 20,
            gru_b_size: 4,
            feature_inputs: 6,
            cond_size: 8,
            pitch_embed_size: 4,
            conv_kernel: 3,
            dual_fc_channels: 2,
            sparse_block_cols: 3,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            embed_inputs: 256,
            gru_a_size: 384,
            gru_b_size: 16,
            feature_inputs: 102,
            cond_size: 128,
            pitch_embed_size: 64,
            conv_kernel: 3,
            dual_fc_channels: 2,
            sparse_block_cols: 8,
        }
    }
}
