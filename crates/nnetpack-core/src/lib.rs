//! Flat binary dump of a fixed neural-network description.
//!
//! A model is written as the concatenation of its layers' element groups,
//! in declaration order, with no header and no lengths. Reading it back
//! requires the same model: every count is recomputed from the layer
//! dimensions, and the sparse GRU index is re-scanned from the stream.

pub mod codec;
pub mod error;
pub mod layer;
pub mod model;
pub mod report;
pub mod serializer;
pub mod sparse;
pub mod verifier;
pub mod writer;

pub use codec::*;
pub use error::*;
pub use layer::*;
pub use model::*;
pub use report::*;
pub use serializer::*;
pub use sparse::*;
pub use verifier::*;
pub use writer::*;
