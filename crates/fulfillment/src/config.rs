//! Engine configuration.

use core::str::FromStr;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_WORKERS: &str = "STOCKROUTE_WORKERS";
pub const ENV_ON_UNEXPECTED: &str = "STOCKROUTE_ON_UNEXPECTED";
pub const ENV_ALLOCATION_ORDER: &str = "STOCKROUTE_ALLOCATION_ORDER";

/// What to do when admission hits faults that are not business failures.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnexpectedErrorPolicy {
    /// Record the faults on the result and allocate the surviving orders.
    #[default]
    Continue,
    /// Stop before allocation and return the faults as an error.
    Abort,
}

impl FromStr for UnexpectedErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "abort" => Ok(Self::Abort),
            other => Err(ConfigError::invalid(ENV_ON_UNEXPECTED, other, "expected `continue` or `abort`")),
        }
    }
}

/// Order in which admitted orders are allocated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOrder {
    /// Ascending order id, ties by batch position.
    #[default]
    OrderId,
    /// Batch position.
    Submission,
}

impl FromStr for AllocationOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "order_id" => Ok(Self::OrderId),
            "submission" => Ok(Self::Submission),
            other => Err(ConfigError::invalid(
                ENV_ALLOCATION_ORDER,
                other,
                "expected `order_id` or `submission`",
            )),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("workers must be at least 1")]
    ZeroWorkers,
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            reason,
        }
    }
}

/// Fulfillment engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Size of the admission worker pool.
    pub workers: usize,
    pub on_unexpected: UnexpectedErrorPolicy,
    pub allocation_order: AllocationOrder,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            on_unexpected: UnexpectedErrorPolicy::default(),
            allocation_order: AllocationOrder::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `STOCKROUTE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_WORKERS) {
            config.workers = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_WORKERS, raw.clone(), "expected a positive integer"))?;
        }
        if let Some(raw) = lookup(ENV_ON_UNEXPECTED) {
            config.on_unexpected = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_ALLOCATION_ORDER) {
            config.allocation_order = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_unexpected_policy(mut self, policy: UnexpectedErrorPolicy) -> Self {
        self.on_unexpected = policy;
        self
    }

    pub fn with_allocation_order(mut self, order: AllocationOrder) -> Self {
        self.allocation_order = order;
        self
    }
}
