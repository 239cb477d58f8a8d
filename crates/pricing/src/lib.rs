//! Pricing engine.
//!
//! Pure, deterministic cost computation for a recorded set of work items:
//! labor lines, derived material lines and the three totals. No IO.

pub mod engine;

pub use engine::{price_order, LaborLine, MaterialLine, PricedOrder};
