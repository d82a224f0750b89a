//! Order placement throughput on a seeded store.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use sandwich_core::schema::{OrderCreate, OrderLine, ResourceUpdate, SandwichFilter};
use sandwich_core::{Money, Percent, Store};
use std::hint::black_box;

fn seeded_store(dir: &tempfile::TempDir) -> Store {
    let store = Store::open(dir.path().join("bench.redb")).unwrap();
    store.seed().unwrap();
    // Enough stock that the benchmark never runs dry.
    for resource in store.list_resources().unwrap() {
        store
            .update_resource(
                resource.id,
                ResourceUpdate {
                    item: None,
                    amount: Some(u64::MAX / 2),
                },
            )
            .unwrap();
    }
    store
}

fn bench_place_order(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let menu: Vec<u64> = store
        .list_sandwiches(&SandwichFilter::default())
        .unwrap()
        .iter()
        .map(|sandwich| sandwich.id)
        .collect();

    c.bench_function("orders.place.single_line", |b| {
        b.iter(|| {
            let request = OrderCreate::takeout("Bench", vec![OrderLine::new(menu[0], 1)]);
            black_box(store.place_order(request).unwrap())
        });
    });

    c.bench_function("orders.place.full_menu_with_promo", |b| {
        b.iter(|| {
            let lines = menu.iter().map(|&id| OrderLine::new(id, 2)).collect();
            let request = OrderCreate::takeout("Bench", lines).with_promo("SAVE10");
            black_box(store.place_order(request).unwrap())
        });
    });
}

fn bench_discount(c: &mut Criterion) {
    let percent = Percent::whole(15).unwrap();
    c.bench_function("money.discounted", |b| {
        b.iter(|| black_box(Money::from_cents(black_box(123_456)).discounted(percent)));
    });
}

criterion_group!(benches, bench_place_order, bench_discount);
criterion_main!(benches);
