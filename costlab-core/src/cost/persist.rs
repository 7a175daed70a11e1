//! Durable form and reconstruction of configured cost models.
//!
//! A model persists as a `(model_type, name, params)` snapshot; JSON is
//! the byte form. Reconstruction goes through a registry of builders
//! keyed by the model type tag — restoring an unregistered tag is
//! refused, never silently defaulted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::CostModel;
use super::models::{EquityCommission, FlatRate, MarginFinancing, ZeroCost};
use super::params::ParamStore;

/// Errors from the persistence adapter.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unknown cost model type '{0}'")]
    UnknownType(String),

    #[error("malformed cost model snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable record form of a configured model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub model_type: String,
    pub name: String,
    pub params: ParamStore,
}

impl ModelSnapshot {
    /// Capture a model's persistent state.
    pub fn of(model: &dyn CostModel) -> Self {
        Self {
            model_type: model.model_type().to_string(),
            name: model.name().to_string(),
            params: model.params().clone(),
        }
    }
}

type BuildFn = Box<dyn Fn(ModelSnapshot) -> Box<dyn CostModel> + Send + Sync>;

/// Registry of cost model builders, keyed by model type tag.
///
/// The persistence layer owns one of these. User-defined strategies
/// participate by registering a builder under their own tag.
pub struct CostModelRegistry {
    builders: HashMap<String, BuildFn>,
}

impl CostModelRegistry {
    /// Empty registry; nothing can be restored until tags are registered.
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry with every built-in model registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ZeroCost::MODEL_TYPE, |snap| {
            Box::new(ZeroCost::restore(snap.name, snap.params))
        });
        registry.register(FlatRate::MODEL_TYPE, |snap| {
            Box::new(FlatRate::restore(snap.name, snap.params))
        });
        registry.register(EquityCommission::MODEL_TYPE, |snap| {
            Box::new(EquityCommission::restore(snap.name, snap.params))
        });
        registry.register(MarginFinancing::MODEL_TYPE, |snap| {
            Box::new(MarginFinancing::restore(snap.name, snap.params))
        });
        registry
    }

    /// Register a builder for a model type tag. Re-registering a tag
    /// replaces the previous builder.
    pub fn register<F>(&mut self, model_type: impl Into<String>, build: F)
    where
        F: Fn(ModelSnapshot) -> Box<dyn CostModel> + Send + Sync + 'static,
    {
        self.builders.insert(model_type.into(), Box::new(build));
    }

    pub fn contains(&self, model_type: &str) -> bool {
        self.builders.contains_key(model_type)
    }

    /// Registered tags, sorted.
    pub fn model_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Rebuild a model from its durable record.
    pub fn restore(&self, snapshot: ModelSnapshot) -> Result<Box<dyn CostModel>, PersistError> {
        match self.builders.get(&snapshot.model_type) {
            Some(build) => Ok(build(snapshot)),
            None => Err(PersistError::UnknownType(snapshot.model_type)),
        }
    }

    /// Serialize a model to its JSON byte form.
    ///
    /// Registration is not required to serialize, only to restore.
    pub fn serialize(&self, model: &dyn CostModel) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&ModelSnapshot::of(model))?)
    }

    /// Rebuild a model from its JSON byte form.
    pub fn deserialize(&self, json: &str) -> Result<Box<dyn CostModel>, PersistError> {
        let snapshot: ModelSnapshot = serde_json::from_str(json)?;
        self.restore(snapshot)
    }
}

impl Default for CostModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
