//! Zero-cost model — the frictionless default.

use chrono::{DateTime, Utc};

use crate::cost::model::{CostError, CostModel};
use crate::cost::params::ParamStore;
use crate::cost::record::CostRecord;
use crate::domain::Instrument;

/// Charges nothing for any trade event.
#[derive(Debug, Clone)]
pub struct ZeroCost {
    name: String,
    params: ParamStore,
}

impl ZeroCost {
    pub const MODEL_TYPE: &'static str = "zero";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: ParamStore::new(),
        }
    }

    pub(crate) fn restore(name: String, params: ParamStore) -> Self {
        Self { name, params }
    }
}

impl Default for ZeroCost {
    fn default() -> Self {
        Self::new("zero_cost")
    }
}

impl CostModel for ZeroCost {
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
}
