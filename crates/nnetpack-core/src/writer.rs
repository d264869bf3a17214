use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::codec::ElementWriter;
use crate::error::{FormatError, Result};
use crate::model::{Model, ModelLayout};
use crate::serializer::write_layer;

/// Writes every layer of a model, in order, as one flat artifact.
pub struct ModelWriter<W: Write> {
    out: ElementWriter<W>,
}

impl ModelWriter<BufWriter<File>> {
    /// Creates the artifact, truncating anything already at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(FormatError::file(path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ModelWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: ElementWriter::new(inner),
        }
    }

    pub fn write_model(&mut self, model: &Model<'_>) -> Result<ModelLayout> {
        let mut layers = Vec::with_capacity(model.len());
        for layer in model.layers() {
            layers.push(write_layer(layer, &mut self.out)?);
        }
        Ok(ModelLayout { layers })
    }

    pub fn bytes_written(&self) -> u64 {
        self.out.offset()
    }

    /// Flushes buffered output and hands back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out.into_inner())
    }
}

/// Writes `model` to `path` and closes the file before returning.
pub fn write_model_file(path: impl AsRef<Path>, model: &Model<'_>) -> Result<ModelLayout> {
    let path = path.as_ref();
    let mut writer = ModelWriter::create(path)?;
    let layout = writer.write_model(model)?;
    let bytes = writer.bytes_written();
    let file = writer
        .finish()?
        .into_inner()
        .map_err(|e| FormatError::file(path)(e.into_error()))?;
    file.sync_all().map_err(FormatError::file(path))?;
    info!(path = %path.display(), layers = layout.layers.len(), bytes, "artifact written");
    Ok(layout)
}
