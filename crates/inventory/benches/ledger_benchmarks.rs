use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use satchel_events::EventEnvelope;
use satchel_inventory::{InventoryLedger, ItemOperation};
use satchel_items::{CarryWeight, Item, PropertyBag, Taxonomy, TypeScope};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn fixture(distinct: usize) -> (TypeScope, Vec<Item>) {
    let mut b = Taxonomy::builder();
    let weapon = b.category("Weapon", None).unwrap();
    let sword = b.item_type("Sword", Some("Weapon")).unwrap();
    let axe = b.item_type("Axe", Some("Weapon")).unwrap();

    let items = (0..distinct)
        .map(|i| {
            let item_type = if i % 2 == 0 { sword.clone() } else { axe.clone() };
            let bag = PropertyBag::new().with(&CarryWeight::new((i % 11) as u32));
            Item::new(item_type, format!("item-{i}"), bag)
        })
        .collect();

    (TypeScope::new([weapon]), items)
}

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_add_remove");

    for distinct in [1, 10, 100].iter() {
        let (scope, items) = fixture(*distinct);
        group.throughput(Throughput::Elements(2 * *distinct as u64));

        group.bench_with_input(BenchmarkId::new("add_then_remove", distinct), &items, |b, items| {
            let mut ledger = InventoryLedger::new(scope.clone());
            b.iter(|| {
                for item in items {
                    black_box(ledger.add(3, item));
                }
                for item in items {
                    black_box(ledger.remove(3, item));
                }
            });
        });
    }

    group.finish();
}

fn bench_listener_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("listener_fan_out");
    group.throughput(Throughput::Elements(1));

    for listener_count in [0, 1, 8].iter() {
        let (scope, items) = fixture(1);
        let mut ledger = InventoryLedger::new(scope);
        let received = Arc::new(AtomicU64::new(0));
        for _ in 0..*listener_count {
            let received = Arc::clone(&received);
            ledger.subscribe(move |env: &EventEnvelope<ItemOperation>| {
                received.fetch_add(env.sequence_number(), Ordering::Relaxed);
            });
        }

        group.bench_with_input(
            BenchmarkId::new("add_one", listener_count),
            &items[0],
            |b, item| {
                b.iter(|| black_box(ledger.add_one(item)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_add_remove, bench_listener_fan_out);
criterion_main!(benches);
