//! `stockroute` command-line front end: scenario loading and console report.

pub mod report;
pub mod scenario;

pub use report::{JsonReport, Report};
pub use scenario::{Scenario, ScenarioError};
