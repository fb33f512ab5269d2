pub mod cli;
pub mod config;
pub mod correction;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod planner;
pub mod week;

pub use config::EngineConfig;
pub use error::{PlanError, Result};
pub use models::{AnomalyKind, AnomalyReport, DayOptions, DayPlan, Item, MacroTargets, Targets};
pub use pipeline::{DayOutcome, process_day, process_single_day};
