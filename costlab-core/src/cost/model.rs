//! CostModel — the polymorphic trade-cost contract.
//!
//! A cost model prices six trade events: buying and selling an
//! instrument, borrowing and returning cash, and borrowing and returning
//! shares. Buy and sell have no default — every strategy must price them.
//! The borrow/return operations default to a zero record, so a strategy
//! only overrides the capabilities it models.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::params::{ParamError, ParamStore};
use super::record::CostRecord;
use crate::domain::Instrument;

/// Errors from cost computations.
///
/// All errors surface synchronously to the immediate caller; nothing is
/// retried or logged here.
#[derive(Debug, Error)]
pub enum CostError {
    #[error("return time {returned_at} precedes borrow time {borrowed_at}")]
    InvalidInterval {
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
    },

    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Check a borrow/return holding interval.
///
/// Overrides of the return operations call this before pricing, the same
/// way the default bodies do.
pub fn validate_interval(
    borrowed_at: DateTime<Utc>,
    returned_at: DateTime<Utc>,
) -> Result<(), CostError> {
    if returned_at < borrowed_at {
        return Err(CostError::InvalidInterval {
            borrowed_at,
            returned_at,
        });
    }
    Ok(())
}

/// Polymorphic trade-cost strategy.
///
/// Every concrete strategy owns a human-readable name (fixed at
/// construction) and exactly one [`ParamStore`]. The simulation engine
/// holds models as `Box<dyn CostModel>`; each concurrent execution
/// context gets its own instance via [`CostModel::clone_box`] — shared
/// mutation of one instance is not part of the contract.
///
/// Preconditions common to the pricing operations: `price >= 0` and
/// `quantity >= 0`. A zero quantity must not fail.
pub trait CostModel: Send + Sync {
    /// Human-readable name, fixed at construction.
    fn name(&self) -> &str;

    /// Stable type tag of the concrete strategy, used by persistence.
    fn model_type(&self) -> &'static str;

    fn params(&self) -> &ParamStore;

    fn params_mut(&mut self) -> &mut ParamStore;

    /// Prototype clone: a new, independently owned instance of the same
    /// concrete type with an identical name and a deep copy of all
    /// parameters.
    fn clone_box(&self) -> Box<dyn CostModel>;

    /// Cost of acquiring `quantity` units of `instrument` at `price`.
    fn buy_cost(
        &self,
        at: DateTime<Utc>,
        instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError>;

    /// Cost of disposing of `quantity` units of `instrument` at `price`.
    fn sell_cost(
        &self,
        at: DateTime<Utc>,
        instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError>;

    /// Cost of borrowing `cash` at `at`. Free unless overridden.
    fn borrow_cash_cost(&self, _at: DateTime<Utc>, _cash: f64) -> Result<CostRecord, CostError> {
        Ok(CostRecord::zero())
    }

    /// Cost of returning previously borrowed `cash` over the holding
    /// interval `[borrowed_at, returned_at)`. Free unless overridden; the
    /// interval is validated either way.
    fn return_cash_cost(
        &self,
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
        _cash: f64,
    ) -> Result<CostRecord, CostError> {
        validate_interval(borrowed_at, returned_at)?;
        Ok(CostRecord::zero())
    }

    /// Cost of borrowing shares for a short position. Free unless
    /// overridden.
    fn borrow_stock_cost(
        &self,
        _at: DateTime<Utc>,
        _instrument: &Instrument,
        _price: f64,
        _quantity: f64,
    ) -> Result<CostRecord, CostError> {
        Ok(CostRecord::zero())
    }

    /// Cost of returning borrowed shares over the holding interval
    /// `[borrowed_at, returned_at)`. Free unless overridden; the interval
    /// is validated either way.
    fn return_stock_cost(
        &self,
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
        _instrument: &Instrument,
        _price: f64,
        _quantity: f64,
    ) -> Result<CostRecord, CostError> {
        validate_interval(borrowed_at, returned_at)?;
        Ok(CostRecord::zero())
    }

    /// Diagnostic form: `name(param: value, ...)`.
    ///
    /// For logging and display only; the persistence layer never parses
    /// this.
    fn describe(&self) -> String {
        if self.params().is_empty() {
            self.name().to_string()
        } else {
            format!("{}({})", self.name(), self.params())
        }
    }
}

impl Clone for Box<dyn CostModel> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
