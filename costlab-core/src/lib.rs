//! Costlab Core — trade-cost computation for a trading-simulation engine.
//!
//! The engine holds a [`CostModel`] per strategy and asks it to price
//! each trade event: buys, sells, borrowed cash, and borrowed shares.
//! This crate contains:
//! - The polymorphic [`CostModel`] contract with zero-cost defaults for
//!   the borrow/return operations
//! - [`CostRecord`], the immutable component breakdown every computation
//!   returns
//! - [`ParamStore`], the named typed parameters each model instance owns
//! - Prototype cloning (`clone_box`) for per-context model instances
//! - [`CostModelRegistry`], the tag-keyed persistence adapter
//! - Built-in strategies under [`cost::models`]

pub mod cost;
pub mod domain;

pub use cost::{
    validate_interval, CostError, CostModel, CostModelRegistry, CostRecord, ModelSnapshot,
    ParamError, ParamStore, ParamValue, PersistError,
};
pub use domain::{AssetClass, Instrument};
