//! Exchange-style equity fee schedule: commission, stamp tax, transfer fee.

use chrono::{DateTime, Utc};

use crate::cost::model::{CostError, CostModel};
use crate::cost::params::ParamStore;
use crate::cost::record::CostRecord;
use crate::domain::{AssetClass, Instrument};

/// Brokerage schedule for cash equities.
///
/// Commission applies to both sides with a per-trade floor. Stamp tax is
/// levied on sells only, transfer fee on both sides; both surcharges
/// apply to equity instruments only — other asset classes pay commission
/// alone.
///
/// Parameters (all float):
/// - `commission_rate` / `min_commission`
/// - `stamp_tax_rate` (sell side)
/// - `transfer_fee_rate`
#[derive(Debug, Clone)]
pub struct EquityCommission {
    name: String,
    params: ParamStore,
}

impl EquityCommission {
    pub const MODEL_TYPE: &'static str = "equity_commission";

    pub const DEFAULT_COMMISSION_RATE: f64 = 0.0018;
    pub const DEFAULT_MIN_COMMISSION: f64 = 5.0;
    pub const DEFAULT_STAMP_TAX_RATE: f64 = 0.001;
    pub const DEFAULT_TRANSFER_FEE_RATE: f64 = 0.00002;

    pub fn new(name: impl Into<String>) -> Self {
        let mut params = ParamStore::new();
        params.set("commission_rate", Self::DEFAULT_COMMISSION_RATE);
        params.set("min_commission", Self::DEFAULT_MIN_COMMISSION);
        params.set("stamp_tax_rate", Self::DEFAULT_STAMP_TAX_RATE);
        params.set("transfer_fee_rate", Self::DEFAULT_TRANSFER_FEE_RATE);
        Self {
            name: name.into(),
            params,
        }
    }

    pub(crate) fn restore(name: String, params: ParamStore) -> Self {
        Self { name, params }
    }

    fn trade_cost(
        &self,
        instrument: &Instrument,
        price: f64,
        quantity: f64,
        is_sell: bool,
    ) -> Result<CostRecord, CostError> {
        if quantity <= 0.0 {
            return Ok(CostRecord::zero());
        }
        let value = price * quantity;
        let commission =
            (value * self.params.float("commission_rate")?).max(self.params.float("min_commission")?);

        if instrument.asset_class != AssetClass::Equity {
            return Ok(CostRecord::commission_only(commission));
        }

        let tax = if is_sell {
            value * self.params.float("stamp_tax_rate")?
        } else {
            0.0
        };
        let transfer_fee = value * self.params.float("transfer_fee_rate")?;
        Ok(CostRecord::new(commission, tax, transfer_fee, 0.0))
    }
}

impl CostModel for EquityCommission {
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
        instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.trade_cost(instrument, price, quantity, false)
    }

    fn sell_cost(
        &self,
        _at: DateTime<Utc>,
        instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.trade_cost(instrument, price, quantity, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 13, 0, 0).unwrap()
    }

    fn model() -> EquityCommission {
        EquityCommission::new("cn_equity")
    }

    #[test]
    fn buy_pays_commission_and_transfer_fee_but_no_tax() {
        let spy = Instrument::equity("600036");
        // value = 10.0 * 10_000 = 100_000
        let record = model().buy_cost(at(), &spy, 10.0, 10_000.0).unwrap();
        assert_eq!(record.commission(), 180.0); // 100_000 * 0.0018
        assert_eq!(record.tax(), 0.0);
        assert_eq!(record.transfer_fee(), 2.0); // 100_000 * 0.00002
        assert_eq!(record.total(), 182.0);
    }

    #[test]
    fn sell_adds_stamp_tax() {
        let spy = Instrument::equity("600036");
        let record = model().sell_cost(at(), &spy, 10.0, 10_000.0).unwrap();
        assert_eq!(record.commission(), 180.0);
        assert_eq!(record.tax(), 100.0); // 100_000 * 0.001
        assert_eq!(record.transfer_fee(), 2.0);
        assert_eq!(record.total(), 282.0);
    }

    #[test]
    fn commission_floor_applies_to_small_trades() {
        let spy = Instrument::equity("600036");
        // value = 10.0 * 100 = 1000 → commission 1.8 → floored to 5.0
        let record = model().buy_cost(at(), &spy, 10.0, 100.0).unwrap();
        assert_eq!(record.commission(), 5.0);
    }

    #[test]
    fn non_equity_instruments_pay_commission_only() {
        let fut = Instrument::new("ESZ5", "USD", AssetClass::Future);
        let record = model().sell_cost(at(), &fut, 10.0, 10_000.0).unwrap();
        assert_eq!(record.commission(), 180.0);
        assert_eq!(record.tax(), 0.0);
        assert_eq!(record.transfer_fee(), 0.0);
    }

    #[test]
    fn zero_quantity_costs_nothing() {
        let spy = Instrument::equity("600036");
        assert!(model().sell_cost(at(), &spy, 10.0, 0.0).unwrap().is_zero());
    }
}
