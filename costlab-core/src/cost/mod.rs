//! Trade-cost computation: the cost model contract, parameter store,
//! cost records, and persistence of configured models.

pub mod model;
pub mod models;
pub mod params;
pub mod persist;
pub mod record;

pub use model::{validate_interval, CostError, CostModel};
pub use params::{ParamError, ParamStore, ParamValue};
pub use persist::{CostModelRegistry, ModelSnapshot, PersistError};
pub use record::CostRecord;
