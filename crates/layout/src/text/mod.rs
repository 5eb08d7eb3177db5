//! Text measurement and fitting for the standard PDF base fonts.

pub mod metrics;
pub mod wrapper;
