//! Inflation-adjusted retirement savings projection.

mod retirement_model;
mod retirement_service;

pub use retirement_model::{RetirementInput, RetirementProjection};
pub use retirement_service::project_retirement;
