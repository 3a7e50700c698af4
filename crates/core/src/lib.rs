//! Rateio
//!
//! Rateio apportions a multi-component water and sewage bill across the units
//! of a residential building: the fixed component is split equally per unit,
//! the variable component proportionally to residents, and a single correction
//! term makes the unrounded total reproduce the bill exactly.

pub mod allocation;
pub mod bill;
pub mod fixtures;
pub mod occupancy;
pub mod statement;
