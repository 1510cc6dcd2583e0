use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stockroute_fulfillment::{EngineConfig, FulfillmentEngine};
use stockroute_inventory::Warehouse;
use stockroute_sales::Order;

const PRODUCTS: usize = 50;

/// Warehouses with uneven stock so both single-warehouse and split plans occur.
fn seed_warehouses(count: usize) -> Vec<Warehouse> {
    (0..count)
        .map(|w| {
            (0..PRODUCTS).fold(Warehouse::new(format!("W{w}")), |wh, p| {
                wh.with_stock(format!("P{p:03}"), ((w * 7 + p * 3) % 40) as u64 * 50)
            })
        })
        .collect()
}

fn make_orders(count: usize) -> Vec<Order> {
    (0..count)
        .map(|i| {
            let items = (0..3).map(|k| (format!("P{:03}", (i * 11 + k * 17) % PRODUCTS), (1 + (i + k) % 5) as i64));
            Order::from_items(i as i64, items)
        })
        .collect()
}

fn bench_batch_processing(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_processing");

    for batch_size in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_with_input(BenchmarkId::new("orders", batch_size), batch_size, |b, &size| {
            let orders = make_orders(size);
            b.iter_batched(
                || FulfillmentEngine::with_config(seed_warehouses(8), EngineConfig::default()).unwrap(),
                |mut engine| black_box(engine.process(black_box(&orders)).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_admission_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission_workers");
    let orders = make_orders(1000);
    group.throughput(Throughput::Elements(orders.len() as u64));

    for workers in [1usize, 2, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("workers", workers), workers, |b, &workers| {
            let config = EngineConfig::default().with_workers(workers);
            b.iter_batched(
                || FulfillmentEngine::with_config(seed_warehouses(8), config.clone()).unwrap(),
                |mut engine| black_box(engine.process(&orders).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_processing, bench_admission_workers);
criterion_main!(benches);
