//! Dollar-cost-average portfolio estimation.

mod dca_model;
mod dca_service;

pub use dca_model::{CurrentValuation, DcaEstimate, DcaRequest, InvestmentPlan};
pub use dca_service::DcaEstimator;
