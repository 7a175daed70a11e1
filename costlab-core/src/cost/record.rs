//! CostRecord — immutable breakdown of a single cost computation.

use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Cost of a single trade event, decomposed into named components.
///
/// The total is derived at construction and always equals the sum of the
/// components; fields are private so no code path can produce a record
/// whose total disagrees with its parts. Records are plain values: created
/// fresh on every computation, owned by the caller, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostRecord {
    commission: f64,
    tax: f64,
    transfer_fee: f64,
    other: f64,
    total: f64,
}

impl CostRecord {
    pub fn new(commission: f64, tax: f64, transfer_fee: f64, other: f64) -> Self {
        Self {
            commission,
            tax,
            transfer_fee,
            other,
            total: commission + tax + transfer_fee + other,
        }
    }

    /// Zero-cost record — what operations a strategy does not model return.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Record carrying a commission component only.
    pub fn commission_only(commission: f64) -> Self {
        Self::new(commission, 0.0, 0.0, 0.0)
    }

    pub fn commission(&self) -> f64 {
        self.commission
    }

    /// Tax/duty component (e.g. stamp tax on sells).
    pub fn tax(&self) -> f64 {
        self.tax
    }

    /// Transfer/exchange fee component.
    pub fn transfer_fee(&self) -> f64 {
        self.transfer_fee
    }

    /// Anything that is neither commission, tax, nor transfer fee
    /// (e.g. financing interest).
    pub fn other(&self) -> f64 {
        self.other
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_zero(&self) -> bool {
        self.commission == 0.0 && self.tax == 0.0 && self.transfer_fee == 0.0 && self.other == 0.0
    }
}

impl Add for CostRecord {
    type Output = CostRecord;

    fn add(self, rhs: CostRecord) -> CostRecord {
        CostRecord::new(
            self.commission + rhs.commission,
            self.tax + rhs.tax,
            self.transfer_fee + rhs.transfer_fee,
            self.other + rhs.other,
        )
    }
}

impl AddAssign for CostRecord {
    fn add_assign(&mut self, rhs: CostRecord) {
        *self = *self + rhs;
    }
}

impl Sum for CostRecord {
    fn sum<I: Iterator<Item = CostRecord>>(iter: I) -> CostRecord {
        iter.fold(CostRecord::zero(), Add::add)
    }
}
