pub mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use nnetpack_core::{verify_model_file, write_model_file, ModelLayout};
use nnetpack_model::{NetworkConfig, ReferenceNetwork};

use cli::Cli;

/// Builds the reference network, writes it, then reads it back.
///
/// With `--layout` only the computed layout is returned and nothing touches
/// the filesystem.
pub fn run(cli: &Cli) -> Result<ModelLayout> {
    let config = if cli.tiny {
        NetworkConfig::tiny()
    } else {
        NetworkConfig::default()
    };
    let network = ReferenceNetwork::generate(&config, cli.seed)
        .context("failed to build reference network")?;
    let model = network.model();

    if cli.layout {
        return model.layout().context("failed to compute layout");
    }

    let path = &cli.path;
    let written = write_model_file(path, &model)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let verified = verify_model_file(path, &model)
        .with_context(|| format!("verification of {} failed", path.display()))?;
    written
        .ensure_same(&verified)
        .context("write and verify passes disagree on the layout")?;

    Ok(verified)
}

/// One line per layer: dotted name, element counts, then `suffix`.
pub fn print_summary<W: Write>(
    out: &mut W,
    layout: &ModelLayout,
    suffix: &str,
) -> io::Result<()> {
    for layer in &layout.layers {
        write!(out, "{:.<20}:", layer.name)?;
        for count in layer.counts() {
            write!(out, " {count}")?;
        }
        writeln!(out, " {suffix}")?;
    }
    Ok(())
}

/// Like [`print_summary`], with each layer's byte range.
pub fn print_layout<W: Write>(out: &mut W, layout: &ModelLayout) -> io::Result<()> {
    for layer in &layout.layers {
        writeln!(
            out,
            "{:.<20}: {:<10} @{:>10} +{:>9}  {:?}",
            layer.name,
            layer.kind,
            layer.offset,
            layer.byte_len,
            layer.counts().collect::<Vec<_>>()
        )?;
    }
    writeln!(out, "total: {} bytes", layout.total_bytes())
}
