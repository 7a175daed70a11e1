//! Domain types shared with the surrounding simulation engine.

pub mod instrument;

pub use instrument::{AssetClass, Instrument};
