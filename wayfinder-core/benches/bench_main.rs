use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use wayfinder_core::prelude::*;

const SIDE: usize = 15;
const FLOORS: i32 = 3;

fn id(floor: i32, row: usize, col: usize) -> String {
    format!("f{floor}-{row}-{col}")
}

/// Grid of corridors on every floor, stairs in one corner and an elevator in
/// the opposite one
fn grid_building() -> NavigationGraph {
    let mut locations = Vec::new();
    let mut connections = Vec::new();

    for floor in 1..=FLOORS {
        for row in 0..SIDE {
            for col in 0..SIDE {
                #[allow(clippy::cast_precision_loss)]
                let (x, y) = (col as f64 * 20.0, row as f64 * 20.0);
                locations.push(Location::new(
                    id(floor, row, col),
                    format!("Room {floor}{row:02}{col:02}"),
                    x,
                    y,
                    floor,
                    LocationKind::Connector,
                ));
                if col + 1 < SIDE {
                    connections.push(corridor(id(floor, row, col), id(floor, row, col + 1)));
                }
                if row + 1 < SIDE {
                    connections.push(corridor(id(floor, row, col), id(floor, row + 1, col)));
                }
            }
        }
        if floor < FLOORS {
            connections.push(ConnectionRecord {
                start: id(floor, 0, 0),
                end: id(floor + 1, 0, 0),
                kind: ConnectionType::Stairs,
            });
            connections.push(ConnectionRecord {
                start: id(floor, SIDE - 1, SIDE - 1),
                end: id(floor + 1, SIDE - 1, SIDE - 1),
                kind: ConnectionType::Elevator,
            });
        }
    }

    NavigationGraph::build(locations, connections).expect("grid building is consistent")
}

fn corridor(start: String, end: String) -> ConnectionRecord {
    ConnectionRecord {
        start,
        end,
        kind: ConnectionType::Corridor,
    }
}

fn bench_routing(c: &mut Criterion) {
    let graph = grid_building();
    let config = RoutingConfig::default();
    let start = id(1, SIDE / 2, 0);
    let destination = id(FLOORS, SIDE / 2, SIDE - 1);

    c.bench_function("request_route standard", |b| {
        b.iter(|| {
            request_route(
                black_box(&graph),
                black_box(&start),
                black_box(&destination),
                NavigationMode::STANDARD,
                &config,
            )
        });
    });

    c.bench_function("request_route accessible", |b| {
        b.iter(|| {
            request_route(
                black_box(&graph),
                black_box(&start),
                black_box(&destination),
                NavigationMode::ACCESSIBLE,
                &config,
            )
        });
    });

    let queries: Vec<RouteQuery> = (0..SIDE)
        .map(|row| {
            RouteQuery::new(
                id(1, row, 0),
                id(FLOORS, SIDE - 1 - row, SIDE - 1),
                NavigationMode::STANDARD,
            )
        })
        .collect();
    c.bench_function("route_batch", |b| {
        b.iter(|| route_batch(black_box(&graph), black_box(&queries), &config));
    });
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
