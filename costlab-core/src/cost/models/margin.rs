//! Financing cost for borrowed cash and borrowed shares.

use chrono::{DateTime, Utc};

use crate::cost::model::{validate_interval, CostError, CostModel};
use crate::cost::params::ParamStore;
use crate::cost::record::CostRecord;
use crate::domain::Instrument;

const DAYS_PER_YEAR: f64 = 365.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Margin financing: interest accrues over the holding interval and is
/// charged on return. Borrowing itself is free, and buys and sells carry
/// no commission here.
///
/// Parameters (float, annualized rates):
/// - `cash_rate`: interest on borrowed cash.
/// - `stock_rate`: borrow fee on shorted shares, applied to the position
///   value at return.
///
/// Interest lands in the record's `other` component.
#[derive(Debug, Clone)]
pub struct MarginFinancing {
    name: String,
    params: ParamStore,
}

impl MarginFinancing {
    pub const MODEL_TYPE: &'static str = "margin_financing";

    pub const DEFAULT_CASH_RATE: f64 = 0.086;
    pub const DEFAULT_STOCK_RATE: f64 = 0.106;

    pub fn new(name: impl Into<String>) -> Self {
        let mut params = ParamStore::new();
        params.set("cash_rate", Self::DEFAULT_CASH_RATE);
        params.set("stock_rate", Self::DEFAULT_STOCK_RATE);
        Self {
            name: name.into(),
            params,
        }
    }

    pub(crate) fn restore(name: String, params: ParamStore) -> Self {
        Self { name, params }
    }

    fn accrued(
        &self,
        rate_name: &str,
        amount: f64,
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
    ) -> Result<CostRecord, CostError> {
        validate_interval(borrowed_at, returned_at)?;
        let rate = self.params.float(rate_name)?;
        let days = (returned_at - borrowed_at).num_seconds() as f64 / SECONDS_PER_DAY;
        let interest = amount * rate * days / DAYS_PER_YEAR;
        Ok(CostRecord::new(0.0, 0.0, 0.0, interest))
    }
}

impl CostModel for MarginFinancing {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_type(&self) -> &'static str {
        Self::MODEL_TYPE
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    fn clone_box(&self) -> Box<dyn CostModel> {
        Box::new(self.clone())
    }

    fn buy_cost(
        &self,
        _at: DateTime<Utc>,
        _instrument: &Instrument,
        _price: f64,
        _quantity: f64,
    ) -> Result<CostRecord, CostError> {
        Ok(CostRecord::zero())
    }

    fn sell_cost(
        &self,
        _at: DateTime<Utc>,
        _instrument: &Instrument,
        _price: f64,
        _quantity: f64,
    ) -> Result<CostRecord, CostError> {
        Ok(CostRecord::zero())
    }

    fn return_cash_cost(
        &self,
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
        cash: f64,
    ) -> Result<CostRecord, CostError> {
        self.accrued("cash_rate", cash, borrowed_at, returned_at)
    }

    fn return_stock_cost(
        &self,
        borrowed_at: DateTime<Utc>,
        returned_at: DateTime<Utc>,
        _instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.accrued("stock_rate", price * quantity, borrowed_at, returned_at)
    }
}
