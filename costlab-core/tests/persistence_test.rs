//! Round-trip persistence of configured cost models, including
//! user-defined strategies registered under their own tag.

use chrono::{DateTime, TimeZone, Utc};
use costlab_core::cost::models::{EquityCommission, FlatRate, ZeroCost};
use costlab_core::{
    CostError, CostModel, CostModelRegistry, CostRecord, Instrument, ModelSnapshot, ParamStore,
    PersistError,
};

fn spy() -> Instrument {
    Instrument::equity("SPY")
}

fn t() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 14, 30, 0).unwrap()
}

// ── Round trips ──────────────────────────────────────────────────────

#[test]
fn roundtrip_preserves_identity_and_behavior() {
    let registry = CostModelRegistry::with_builtins();
    let mut model = FlatRate::with_rate("ib_flat", 0.0005, 1.0);
    model.params_mut().set("venue", "NYSE");

    let json = registry.serialize(&model).unwrap();
    let restored = registry.deserialize(&json).unwrap();

    assert_eq!(restored.name(), "ib_flat");
    assert_eq!(restored.model_type(), FlatRate::MODEL_TYPE);
    assert_eq!(restored.params(), model.params());

    // Behavioral equivalence on all six operations for a fixed input.
    assert_eq!(
        restored.buy_cost(t(), &spy(), 100.0, 200.0).unwrap(),
        model.buy_cost(t(), &spy(), 100.0, 200.0).unwrap()
    );
    assert_eq!(
        restored.sell_cost(t(), &spy(), 100.0, 200.0).unwrap(),
        model.sell_cost(t(), &spy(), 100.0, 200.0).unwrap()
    );
    assert_eq!(
        restored.borrow_cash_cost(t(), 10_000.0).unwrap(),
        model.borrow_cash_cost(t(), 10_000.0).unwrap()
    );
    let later = t() + chrono::Duration::days(30);
    assert_eq!(
        restored.return_cash_cost(t(), later, 10_000.0).unwrap(),
        model.return_cash_cost(t(), later, 10_000.0).unwrap()
    );
    assert_eq!(
        restored.borrow_stock_cost(t(), &spy(), 100.0, 50.0).unwrap(),
        model.borrow_stock_cost(t(), &spy(), 100.0, 50.0).unwrap()
    );
    assert_eq!(
        restored
            .return_stock_cost(t(), later, &spy(), 100.0, 50.0)
            .unwrap(),
        model
            .return_stock_cost(t(), later, &spy(), 100.0, 50.0)
            .unwrap()
    );
}

#[test]
fn roundtrip_preserves_every_parameter_kind() {
    let registry = CostModelRegistry::with_builtins();
    let mut model = ZeroCost::new("tagged");
    let params = model.params_mut();
    params.set("lots", 100_i64);
    params.set("enabled", true);
    params.set("rate", 0.25);
    params.set("venue", "SSE");

    let json = registry.serialize(&model).unwrap();
    let restored = registry.deserialize(&json).unwrap();

    assert_eq!(restored.params(), model.params());
    assert_eq!(restored.params().get("lots").unwrap().kind(), "int");
    assert_eq!(restored.params().get("enabled").unwrap().kind(), "bool");
    assert_eq!(restored.params().get("rate").unwrap().kind(), "float");
    assert_eq!(restored.params().get("venue").unwrap().kind(), "string");
}

#[test]
fn equity_schedule_survives_a_roundtrip() {
    let registry = CostModelRegistry::with_builtins();
    let mut model = EquityCommission::new("cn_equity");
    model.params_mut().set("stamp_tax_rate", 0.0005);

    let json = registry.serialize(&model).unwrap();
    let restored = registry.deserialize(&json).unwrap();

    let sh = Instrument::new("600036", "CNY", costlab_core::AssetClass::Equity);
    assert_eq!(
        restored.sell_cost(t(), &sh, 10.0, 10_000.0).unwrap(),
        model.sell_cost(t(), &sh, 10.0, 10_000.0).unwrap()
    );
}

// ── Refusals ─────────────────────────────────────────────────────────

#[test]
fn unregistered_tag_is_refused_not_defaulted() {
    let registry = CostModelRegistry::with_builtins();
    let json = r#"{"model_type": "proprietary", "name": "x", "params": {}}"#;
    match registry.deserialize(json).err().unwrap() {
        PersistError::UnknownType(tag) => assert_eq!(tag, "proprietary"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn empty_registry_restores_nothing() {
    let registry = CostModelRegistry::new();
    let snapshot = ModelSnapshot::of(&ZeroCost::default());
    assert!(matches!(
        registry.restore(snapshot).err().unwrap(),
        PersistError::UnknownType(_)
    ));
}

// ── User-defined strategies ──────────────────────────────────────────

/// Per-share fee, the kind of strategy a user plugs in from outside the
/// crate.
#[derive(Debug, Clone)]
struct PerShareFee {
    name: String,
    params: ParamStore,
}

impl PerShareFee {
    const MODEL_TYPE: &'static str = "per_share";

    fn new(name: &str, fee: f64) -> Self {
        let mut params = ParamStore::new();
        params.set("fee", fee);
        Self {
            name: name.to_string(),
            params,
        }
    }

    fn restore(name: String, params: ParamStore) -> Self {
        Self { name, params }
    }
}

impl CostModel for PerShareFee {
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
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        Ok(CostRecord::commission_only(
            quantity * self.params.float("fee")?,
        ))
    }

    fn sell_cost(
        &self,
        at: DateTime<Utc>,
        instrument: &Instrument,
        price: f64,
        quantity: f64,
    ) -> Result<CostRecord, CostError> {
        self.buy_cost(at, instrument, price, quantity)
    }
}

#[test]
fn user_strategy_roundtrips_once_registered() {
    let mut registry = CostModelRegistry::with_builtins();
    registry.register(PerShareFee::MODEL_TYPE, |snap| {
        Box::new(PerShareFee::restore(snap.name, snap.params))
    });

    let model = PerShareFee::new("cheap_broker", 0.005);
    let json = registry.serialize(&model).unwrap();
    let restored = registry.deserialize(&json).unwrap();

    assert_eq!(restored.name(), "cheap_broker");
    let record = restored.buy_cost(t(), &spy(), 100.0, 1_000.0).unwrap();
    assert_eq!(record.commission(), 5.0);
    assert_eq!(record.total(), 5.0);
}

#[test]
fn serializing_an_unregistered_model_still_works() {
    // Only restoration needs a builder.
    let registry = CostModelRegistry::with_builtins();
    let model = PerShareFee::new("cheap_broker", 0.005);
    let json = registry.serialize(&model).unwrap();
    assert!(json.contains("per_share"));
}
