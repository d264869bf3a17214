//! The reference network dumped by `nnet2f32`.
//!
//! Owns the weight arrays and lends them to `nnetpack-core` as a [`Model`]
//! with a fixed layer order.
//!
//! [`Model`]: nnetpack_core::Model

pub mod config;
pub mod index;
pub mod network;
pub mod weights;

pub use config::*;
pub use network::*;
pub use weights::*;
