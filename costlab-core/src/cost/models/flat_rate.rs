//! Flat-rate commission with a per-trade floor.

use chrono::{DateTime, Utc};

use crate::cost::model::{CostError, CostModel};
use crate::cost::params::ParamStore;
use crate::cost::record::CostRecord;
use crate::domain::Instrument;

/// Proportional commission `price * quantity * rate`, floored by
/// `min_fee`, charged symmetrically on buys and sells.
///
/// Parameters:
/// - `rate` (float): commission as a fraction of trade value.
/// - `min_fee` (float): minimum commission per non-empty trade.
///
/// A zero-quantity trade costs nothing; the floor applies only when
/// something actually trades.
#[derive(Debug, Clone)]
pub struct FlatRate {
    name: String,
    params: ParamStore,
}

impl FlatRate {
    pub const MODEL_TYPE: &'static str = "flat_rate";

    pub const DEFAULT_RATE: f64 = 0.001;
    pub const DEFAULT_MIN_FEE: f64 = 5.0;

    pub fn new(name: impl Into<String>) -> Self {
        let mut params = ParamStore::new();
        params.set("rate", Self::DEFAULT_RATE);
        params.set("min_fee", Self::DEFAULT_MIN_FEE);
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn with_rate(name: impl Into<String>, rate: f64, min_fee: f64) -> Self {
        let mut model = Self::new(name);
        model.params.set("rate", rate);
        model.params.set("min_fee", min_fee);
        model
    }

    pub(crate) fn restore(name: String, params: ParamStore) -> Self {
        Self { name, params }
    }

    fn commission(&self, price: f64, quantity: f64) -> Result<CostRecord, CostError> {
        if quantity <= 0.0 {
            return Ok(CostRecord::zero());
        }
        let rate = self.params.float("rate")?;
        let min_fee = self.params.float("min_fee")?;
        let commission = (price * quantity * rate).max(min_fee);
        Ok(CostRecord::commission_only(commission))
    }
}

impl CostModel for FlatRate {
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
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.commission(price, quantity)
    }

    fn sell_cost(
        &self,
        _at: DateTime<Utc>,
        _instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.commission(price, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn commission_is_value_times_rate() {
        let model = FlatRate::with_rate("flat", 0.001, 5.0);
        let spy = Instrument::equity("SPY");

        // 100.0 * 200 * 0.001 = 20.0, above the floor.
        let record = model.buy_cost(at(), &spy, 100.0, 200.0).unwrap();
        assert_eq!(record.commission(), 20.0);
        assert_eq!(record.total(), 20.0);
        assert_eq!(record.tax(), 0.0);
        assert_eq!(record.transfer_fee(), 0.0);
    }

    #[test]
    fn small_trades_pay_the_floor() {
        let model = FlatRate::with_rate("flat", 0.001, 5.0);
        let spy = Instrument::equity("SPY");

        // 100.0 * 10 * 0.001 = 1.0 → floored to 5.0.
        let record = model.sell_cost(at(), &spy, 100.0, 10.0).unwrap();
        assert_eq!(record.commission(), 5.0);
    }

    #[test]
    fn zero_quantity_costs_nothing() {
        let model = FlatRate::new("flat");
        let spy = Instrument::equity("SPY");
        assert!(model.buy_cost(at(), &spy, 100.0, 0.0).unwrap().is_zero());
    }

    #[test]
    fn reconfiguring_rate_changes_the_fee() {
        let mut model = FlatRate::with_rate("flat", 0.001, 0.0);
        let spy = Instrument::equity("SPY");

        model.params_mut().set("rate", 0.002);
        let record = model.buy_cost(at(), &spy, 100.0, 200.0).unwrap();
        assert_eq!(record.commission(), 40.0);
    }

    #[test]
    fn buys_and_sells_are_symmetric() {
        let model = FlatRate::new("flat");
        let spy = Instrument::equity("SPY");
        let buy = model.buy_cost(at(), &spy, 250.0, 40.0).unwrap();
        let sell = model.sell_cost(at(), &spy, 250.0, 40.0).unwrap();
        assert_eq!(buy, sell);
    }
}
