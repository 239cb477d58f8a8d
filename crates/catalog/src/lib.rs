//! Work catalog module.
//!
//! Static price list of billable work types, the material rules that hang off
//! them, and the ordered work-item mapping an order accumulates. Pure data, no IO.

pub mod catalog;
pub mod defaults;
pub mod items;

pub use catalog::{MaterialRule, MaterialUnit, WorkCatalog, WorkCatalogEntry, WorkType};
pub use defaults::electrical_works;
pub use items::{WorkItem, WorkItems};
