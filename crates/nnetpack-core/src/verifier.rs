use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::codec::ElementReader;
use crate::error::{FormatError, Result};
use crate::model::{Model, ModelLayout};
use crate::serializer::check_layer;

/// Reads an artifact back layer by layer against the live model.
///
/// Stops at the first layer that fails; nothing after it is read.
pub struct ModelVerifier<R: Read> {
    input: ElementReader<R>,
}

impl ModelVerifier<BufReader<File>> {
    /// Opens the artifact read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(FormatError::file(path))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ModelVerifier<R> {
    pub fn new(inner: R) -> Self {
        Self {
            input: ElementReader::new(inner),
        }
    }

    pub fn verify_model(&mut self, model: &Model<'_>) -> Result<ModelLayout> {
        let mut layers = Vec::with_capacity(model.len());
        for layer in model.layers() {
            layers.push(check_layer(layer, &mut self.input)?);
        }

        let extra = self.input.remaining()?;
        if extra > 0 {
            return Err(FormatError::TrailingBytes { extra });
        }
        Ok(ModelLayout { layers })
    }

    pub fn bytes_read(&self) -> u64 {
        self.input.offset()
    }
}

pub fn verify_model_file(path: impl AsRef<Path>, model: &Model<'_>) -> Result<ModelLayout> {
    let path = path.as_ref();
    let mut verifier = ModelVerifier::open(path)?;
    let layout = verifier.verify_model(model)?;
    info!(
        path = %path.display(),
        layers = layout.layers.len(),
        bytes = verifier.bytes_read(),
        "artifact verified"
    );
    Ok(layout)
}
