use anyhow::Result;
use nnetpack_core::{
    block_count, verify_model_file, write_model_file, FormatError, ModelLayout, ModelVerifier,
    ModelWriter,
};
use nnetpack_model::{NetworkConfig, ReferenceNetwork, DEFAULT_SEED};

fn counts(net: &ReferenceNetwork, name: &str) -> Result<Vec<usize>> {
    let model = net.model();
    let layer = model
        .layers()
        .iter()
        .find(|l| l.name == name)
        .ok_or_else(|| anyhow::anyhow!("no layer {name}"))?;
    Ok(layer.counts()?.to_vec())
}

fn layer_bytes<'a>(layout: &ModelLayout, bytes: &'a [u8], name: &str) -> Result<&'a [u8]> {
    let layer = layout
        .layers
        .iter()
        .find(|l| l.name == name)
        .ok_or_else(|| anyhow::anyhow!("no layer {name}"))?;
    Ok(&bytes[layer.offset as usize..layer.end() as usize])
}

#[test]
fn full_size_counts_follow_the_layer_formulas() -> Result<()> {
    let net = ReferenceNetwork::generate(&NetworkConfig::default(), DEFAULT_SEED)?;

    assert_eq!(counts(&net, "gru_a_embed_sig")?, vec![256 * 1152]);
    assert_eq!(counts(&net, "gru_a_dense_feature")?, vec![1152, 128 * 1152]);
    assert_eq!(counts(&net, "feature_conv1")?, vec![102 * 3 * 128, 128]);
    assert_eq!(counts(&net, "gru_b")?, vec![6 * 16, 3 * 512 * 16, 3 * 16 * 16]);
    assert_eq!(counts(&net, "dual_fc")?, vec![512, 16 * 256 * 2, 512]);

    let sparse = counts(&net, "sparse_gru_a")?;
    assert_eq!(&sparse[..3], &[2304, 1152, 3 * 384 * 384]);
    assert_eq!(sparse[3], net.sparse_gru_a.idx.len());
    assert!(sparse[3] >= block_count(1152));
    Ok(())
}

#[test]
fn tiny_network_round_trips_through_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tiny.f32");
    let net = ReferenceNetwork::generate(&NetworkConfig::tiny(), 9)?;
    let model = net.model();

    let written = write_model_file(&path, &model)?;
    let verified = verify_model_file(&path, &model)?;
    written.ensure_same(&verified)?;
    assert_eq!(written.layers.len(), 14);
    Ok(())
}

#[test]
fn exc_embedding_repeats_the_pred_table() -> Result<()> {
    let net = ReferenceNetwork::generate(&NetworkConfig::tiny(), 2)?;
    let model = net.model();
    let layout = model.layout()?;

    let mut writer = ModelWriter::new(Vec::new());
    writer.write_model(&model)?;
    let bytes = writer.finish()?;

    assert_eq!(
        layer_bytes(&layout, &bytes, "gru_a_embed_pred")?,
        layer_bytes(&layout, &bytes, "gru_a_embed_exc")?
    );
    assert_ne!(
        layer_bytes(&layout, &bytes, "gru_a_embed_sig")?,
        layer_bytes(&layout, &bytes, "gru_a_embed_pred")?
    );
    Ok(())
}

#[test]
fn artifact_from_another_seed_fails_verification() -> Result<()> {
    let written = ReferenceNetwork::generate(&NetworkConfig::tiny(), 1)?;
    let live = ReferenceNetwork::generate(&NetworkConfig::tiny(), 2)?;

    let mut writer = ModelWriter::new(Vec::new());
    writer.write_model(&written.model())?;
    let bytes = writer.finish()?;

    let err = ModelVerifier::new(&bytes[..])
        .verify_model(&live.model())
        .unwrap_err();
    assert!(matches!(
        err,
        FormatError::Mismatch { ref layer, .. } if layer == "gru_a_embed_sig"
    ));
    Ok(())
}
