//! Benchmarks for the per-event paths: drag redraw and landmass projection.

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quake_map::chart::{BoundingBox, SymbolMap, SymbolRecord};
use quake_map::data::simple_world;
use quake_map::map::{GeoPath, Landmass, Projection};

fn quakes(n: usize) -> Vec<SymbolRecord> {
    (0..n)
        .map(|i| {
            let lon = (i as f64 * 37.0) % 360.0 - 180.0;
            let lat = (i as f64 * 13.0) % 170.0 - 85.0;
            SymbolRecord {
                value: Some((i % 9) as f64),
                depth: (i % 700) as f64,
                ..SymbolRecord::new(lon, lat)
            }
        })
        .collect()
}

/// Dense landmass: many short lines around the globe
fn dense_landmass(lines: usize) -> Landmass {
    Landmass::new(
        (0..lines)
            .map(|i| {
                let lat = (i as f64 * 7.0) % 160.0 - 80.0;
                (0..64)
                    .map(|j| (j as f64 * 5.0 - 160.0, lat + (j % 3) as f64))
                    .collect()
            })
            .collect(),
    )
}

fn bench_drag_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_redraw");
    let mut host = HashMap::new();
    host.insert("map".to_string(), BoundingBox::new(720.0, 360.0));

    for n in [100, 1_000, 10_000] {
        let mut chart = SymbolMap::new();
        chart.set_map(simple_world()).set_values(quakes(n));
        chart.draw(&host, "map");
        chart.pointer_down(0.0);

        let mut x = 0.0;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                x = (x + 1.0) % 720.0;
                chart.pointer_move(black_box(x), 0.0);
            })
        });
    }
    group.finish();
}

fn bench_landmass_path(c: &mut Criterion) {
    let mut projection = Projection::natural_earth();
    projection.set_scale(720.0 / std::f64::consts::TAU).set_translate((360.0, 180.0));

    for lines in [16, 256] {
        let landmass = dense_landmass(lines);
        c.bench_function(&format!("geo_path_{}_vertices", landmass.vertex_count()), |b| {
            b.iter(|| GeoPath::new(black_box(&projection)).render(&landmass))
        });
    }
}

criterion_group!(benches, bench_drag_redraw, bench_landmass_path);
criterion_main!(benches);
