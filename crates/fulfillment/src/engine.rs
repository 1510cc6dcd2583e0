//! Batch orchestration.
//!
//! - **Admission** fans out over a bounded rayon pool. Each order is validated
//!   and checked for aggregate feasibility against warehouses borrowed
//!   immutably; one result slot per batch position.
//! - **Allocation** starts only after every admission task has returned and
//!   walks the admitted orders one at a time with exclusive access to stock.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use chrono::Utc;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use stockroute_core::{find_by_id, BatchId, Entity, FulfillmentError, FulfillmentOutcome, WarehouseId};
use stockroute_inventory::{self as inventory, Warehouse};
use stockroute_products::Catalog;
use stockroute_sales::Order;

use crate::config::{AllocationOrder, ConfigError, EngineConfig, UnexpectedErrorPolicy};
use crate::feasibility;
use crate::planner;
use crate::result::{FulfillmentPlan, FulfillmentResult, OrderFailure, Phase, UnexpectedFault};
use crate::validator::{self, ValidatedOrder};

/// Batch-level engine error.
///
/// Per-order problems never show up here; they are [`OrderFailure`]s.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build admission worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Two warehouses share an id; shipments could not tell them apart.
    #[error("duplicate warehouse id '{0}'")]
    DuplicateWarehouse(WarehouseId),

    /// Raised instead of allocating when the policy is
    /// [`UnexpectedErrorPolicy::Abort`]. Stock is untouched.
    #[error("{} unexpected fault(s) during admission of batch {batch_id}", .faults.len())]
    UnexpectedFaults {
        batch_id: BatchId,
        faults: Vec<UnexpectedFault>,
    },
}

/// Owns the warehouses and processes order batches against them.
pub struct FulfillmentEngine {
    warehouses: Vec<Warehouse>,
    catalog: Option<Catalog>,
    config: EngineConfig,
    pool: rayon::ThreadPool,
}

impl core::fmt::Debug for FulfillmentEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FulfillmentEngine")
            .field("warehouses", &self.warehouses.len())
            .field("catalog", &self.catalog.as_ref().map(Catalog::len))
            .field("config", &self.config)
            .finish()
    }
}

impl FulfillmentEngine {
    /// Engine with the default configuration.
    pub fn new(warehouses: Vec<Warehouse>) -> Result<Self, EngineError> {
        Self::with_config(warehouses, EngineConfig::default())
    }

    pub fn with_config(warehouses: Vec<Warehouse>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut seen = HashSet::with_capacity(warehouses.len());
        if let Some(dup) = warehouses.iter().find(|w| !seen.insert(w.id())) {
            return Err(EngineError::DuplicateWarehouse(dup.id().clone()));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("stockroute-admission-{i}"))
            .build()?;

        Ok(Self {
            warehouses,
            catalog: None,
            config,
            pool,
        })
    }

    /// Reject orders that reference products outside `catalog`.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn warehouse(&self, id: &WarehouseId) -> FulfillmentOutcome<&Warehouse> {
        find_by_id(&self.warehouses, id)
            .ok_or_else(|| FulfillmentError::WarehouseDoesNotExist(id.clone()))
    }

    /// Units held across all warehouses.
    pub fn total_stock(&self) -> u128 {
        self.warehouses.iter().map(Warehouse::total_units).sum()
    }

    pub fn into_warehouses(self) -> Vec<Warehouse> {
        self.warehouses
    }

    /// Process one batch.
    ///
    /// Successful orders reduce stock; later batches see what is left.
    pub fn process(&mut self, orders: &[Order]) -> Result<FulfillmentResult, EngineError> {
        let batch_id = BatchId::new();
        let started_at = Utc::now();
        let span = tracing::info_span!("fulfillment.batch", batch_id = %batch_id, orders = orders.len());
        let _guard = span.enter();

        let mut failures = Vec::new();
        let mut unexpected = Vec::new();

        let admitted = self.admit(orders, &mut failures, &mut unexpected);
        info!(
            admitted = admitted.len(),
            rejected = failures.len(),
            unexpected = unexpected.len(),
            "admission finished"
        );

        if !unexpected.is_empty() && self.config.on_unexpected == UnexpectedErrorPolicy::Abort {
            error!(faults = unexpected.len(), "aborting batch before allocation");
            return Err(EngineError::UnexpectedFaults {
                batch_id,
                faults: unexpected,
            });
        }

        let plans = self.allocate(admitted, &mut failures, &mut unexpected);
        info!(
            planned = plans.len(),
            failed = failures.len(),
            unexpected = unexpected.len(),
            "allocation finished"
        );

        Ok(FulfillmentResult {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            plans,
            failures,
            unexpected,
        })
    }

    /// Admission phase. Returns admitted orders tagged with their batch position.
    fn admit(
        &self,
        orders: &[Order],
        failures: &mut Vec<OrderFailure>,
        unexpected: &mut Vec<UnexpectedFault>,
    ) -> Vec<(usize, ValidatedOrder)> {
        self.admit_with(orders, failures, unexpected, admit_one)
    }

    /// Runs `check` once per order on the worker pool. A panicking check fails
    /// only its own order, as `Unexpected`.
    fn admit_with<F>(
        &self,
        orders: &[Order],
        failures: &mut Vec<OrderFailure>,
        unexpected: &mut Vec<UnexpectedFault>,
        check: F,
    ) -> Vec<(usize, ValidatedOrder)>
    where
        F: Fn(&Order, &[Warehouse], Option<&Catalog>) -> FulfillmentOutcome<ValidatedOrder> + Sync,
    {
        let duplicates = duplicate_positions(orders);
        let warehouses = self.warehouses.as_slice();
        let catalog = self.catalog.as_ref();

        let outcomes: Vec<FulfillmentOutcome<ValidatedOrder>> = self.pool.install(|| {
            orders
                .par_iter()
                .zip(duplicates.par_iter())
                .map(|(order, &duplicate)| {
                    if duplicate {
                        return Err(FulfillmentError::invalid_order(format!(
                            "duplicate order id {} in batch",
                            order.id()
                        )));
                    }
                    panic::catch_unwind(AssertUnwindSafe(|| check(order, warehouses, catalog)))
                        .unwrap_or_else(|payload| Err(FulfillmentError::unexpected(panic_message(&*payload))))
                })
                .collect()
        });

        let mut admitted = Vec::with_capacity(orders.len());
        for (pos, (order, outcome)) in orders.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(validated) => admitted.push((pos, validated)),
                Err(err) => record_failure(order, err, Phase::Admission, failures, unexpected),
            }
        }
        admitted
    }

    /// Allocation phase: plan and commit one order at a time.
    fn allocate(
        &mut self,
        mut admitted: Vec<(usize, ValidatedOrder)>,
        failures: &mut Vec<OrderFailure>,
        unexpected: &mut Vec<UnexpectedFault>,
    ) -> Vec<FulfillmentPlan> {
        if self.config.allocation_order == AllocationOrder::OrderId {
            admitted.sort_by_key(|(pos, order)| (order.id(), *pos));
        }

        let mut plans = Vec::with_capacity(admitted.len());
        for (_, order) in admitted {
            match allocate_one(&mut self.warehouses, &order) {
                Ok(plan) => {
                    debug!(order_id = %order.id(), shipments = plan.shipments.len(), "order allocated");
                    plans.push(plan);
                }
                Err(err) => {
                    let failure = OrderFailure::new(order.id(), &err);
                    if err.is_unexpected() {
                        error!(order_id = %order.id(), error = %err, "unexpected allocation fault");
                        unexpected.push(UnexpectedFault {
                            order_id: order.id(),
                            phase: Phase::Allocation,
                            message: err.to_string(),
                        });
                    } else {
                        warn!(order_id = %order.id(), kind = %failure.kind, "allocation failed");
                    }
                    failures.push(failure);
                }
            }
        }
        plans
    }
}

fn admit_one(
    order: &Order,
    warehouses: &[Warehouse],
    catalog: Option<&Catalog>,
) -> FulfillmentOutcome<ValidatedOrder> {
    let validated = validator::validate(order)?;
    if let Some(catalog) = catalog {
        validator::check_catalog(&validated, catalog)?;
    }
    feasibility::check(&validated, warehouses)?;
    Ok(validated)
}

fn allocate_one(warehouses: &mut [Warehouse], order: &ValidatedOrder) -> FulfillmentOutcome<FulfillmentPlan> {
    let plan = planner::plan(order, warehouses)?;
    inventory::commit(warehouses, &plan.shipments)?;
    Ok(plan)
}

fn record_failure(
    order: &Order,
    err: FulfillmentError,
    phase: Phase,
    failures: &mut Vec<OrderFailure>,
    unexpected: &mut Vec<UnexpectedFault>,
) {
    if err.is_unexpected() {
        error!(order_id = %order.id(), %phase, error = %err, "unexpected fault");
        unexpected.push(UnexpectedFault {
            order_id: order.id(),
            phase,
            message: err.to_string(),
        });
    } else {
        debug!(order_id = %order.id(), %phase, kind = %err.kind(), reason = %err, "order rejected");
    }
    failures.push(OrderFailure::new(order.id(), &err));
}

/// `true` at every position whose order id already appeared earlier in the batch.
fn duplicate_positions(orders: &[Order]) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(orders.len());
    orders.iter().map(|o| !seen.insert(o.id())).collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}
