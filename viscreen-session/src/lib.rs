pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod plan;
pub mod state;

pub use config::SessionConfig;
pub use error::SessionError;
pub use plan::{AcuityPlan, PlatePlan, ScreeningPlan};
pub use state::SessionEngine;
