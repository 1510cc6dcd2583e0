use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use stockroute_cli::{JsonReport, Report, Scenario};
use stockroute_fulfillment::{EngineConfig, FulfillmentEngine};

#[derive(Parser, Debug)]
#[command(name = "stockroute")]
#[command(about = "Fulfill a batch of orders from shared warehouse stock")]
#[command(version)]
struct Args {
    /// JSON scenario file; the built-in demo batch runs when omitted
    scenario: Option<PathBuf>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Admission worker threads (overrides STOCKROUTE_WORKERS)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    stockroute_observability::init();
    let args = Args::parse();

    let mut config = EngineConfig::from_env().context("invalid engine configuration")?;
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let (scenario, catalog) = match &args.scenario {
        Some(path) => (Scenario::load(path)?, None),
        None => {
            let (scenario, catalog) = Scenario::demo();
            (scenario, Some(catalog))
        }
    };

    let mut engine = FulfillmentEngine::with_config(scenario.warehouses, config)?;
    if let Some(catalog) = catalog {
        engine = engine.with_catalog(catalog);
    }

    let result = engine.process(&scenario.orders)?;
    if result.has_unexpected_errors() {
        tracing::warn!(faults = result.unexpected.len(), "batch finished with unexpected faults");
    }

    if args.json {
        let report = JsonReport {
            result: &result,
            warehouses: engine.warehouses(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", Report::new(&result, engine.warehouses(), engine.catalog()));
    }
    Ok(())
}
