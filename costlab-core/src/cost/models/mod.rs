//! Concrete cost strategies shipped with the crate.
//!
//! Each strategy keeps its tunables in its parameter store (seeded with
//! defaults at construction) and reads them back per call, so cloning
//! and persistence capture behavior wholesale.

pub mod equity;
pub mod flat_rate;
pub mod margin;
pub mod zero;

pub use equity::EquityCommission;
pub use flat_rate::FlatRate;
pub use margin::MarginFinancing;
pub use zero::ZeroCost;
