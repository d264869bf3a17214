use crate::error::{FormatError, Result};
use crate::layer::{Layer, LayerKind};
use crate::report::LayerReport;

/// Ordered, named layers. The order is the byte layout of the artifact.
#[derive(Clone, Debug, Default)]
pub struct Model<'a> {
    layers: Vec<Layer<'a>>,
}

impl<'a> Model<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, kind: LayerKind<'a>) {
        self.layers.push(Layer::new(name, kind));
    }

    pub fn with_layer(mut self, name: impl Into<String>, kind: LayerKind<'a>) -> Self {
        self.push(name, kind);
        self
    }

    pub fn layers(&self) -> &[Layer<'a>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Computes where every layer lands in the artifact without doing I/O.
    pub fn layout(&self) -> Result<ModelLayout> {
        let mut offset = 0u64;
        let mut layers = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let report = LayerReport::from_groups(layer, &layer.groups()?, offset);
            offset = report.end();
            layers.push(report);
        }
        Ok(ModelLayout { layers })
    }
}

impl<'a> FromIterator<Layer<'a>> for Model<'a> {
    fn from_iter<I: IntoIterator<Item = Layer<'a>>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelLayout {
    pub layers: Vec<LayerReport>,
}

impl ModelLayout {
    pub fn total_bytes(&self) -> u64 {
        self.layers.last().map(LayerReport::end).unwrap_or(0)
    }

    /// The layer whose bytes include `offset`.
    pub fn layer_at(&self, offset: u64) -> Option<&LayerReport> {
        self.layers.iter().find(|l| l.contains(offset))
    }

    /// Fails on the first position where the two layouts disagree in name,
    /// kind or element counts.
    pub fn ensure_same(&self, other: &ModelLayout) -> Result<()> {
        let describe = |l: Option<&LayerReport>| match l {
            Some(l) => format!("{} {} {:?}", l.kind, l, l.groups),
            None => "<none>".to_string(),
        };
        let len = self.layers.len().max(other.layers.len());
        for position in 0..len {
            let expected = self.layers.get(position);
            let actual = other.layers.get(position);
            let same = match (expected, actual) {
                (Some(a), Some(b)) => a.name == b.name && a.kind == b.kind && a.groups == b.groups,
                _ => false,
            };
            if !same {
                return Err(FormatError::LayoutMismatch {
                    position,
                    expected: describe(expected),
                    actual: describe(actual),
                });
            }
        }
        Ok(())
    }
}
