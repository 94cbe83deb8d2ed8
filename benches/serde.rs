use criterion::{criterion_group, criterion_main, Criterion};
use geomserde::provider::memory::{CoordSeq, Geometry, MemoryProvider};
use geomserde::{CoordCopy, SerdeOptions};

/// A closed ring of `n` coordinates around a circle.
fn ring(n: usize, radius: f64) -> CoordSeq {
    let mut coords: Vec<[f64; 2]> = (0..n - 1)
        .map(|i| {
            let angle = i as f64 / (n - 1) as f64 * std::f64::consts::TAU;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect();
    coords.push(coords[0]);
    CoordSeq::xy(&coords)
}

fn polygon() -> Geometry {
    Geometry::polygon(vec![ring(1000, 10.), ring(100, 1.), ring(100, 2.)]).with_srid(4326)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let provider = MemoryProvider::new();
    let point = Geometry::point(1., 2.);
    let polygon = polygon();
    let point_buf = geomserde::serialize(&provider, &point).unwrap();
    let polygon_buf = geomserde::serialize(&provider, &polygon).unwrap();

    c.bench_function("serialize point", |b| {
        b.iter(|| geomserde::serialize(&provider, &point).unwrap())
    });
    c.bench_function("deserialize point", |b| {
        b.iter(|| geomserde::deserialize(&provider, &point_buf).unwrap())
    });

    for (name, coord_copy) in [("bulk", CoordCopy::Bulk), ("per ordinate", CoordCopy::PerOrdinate)] {
        let options = SerdeOptions::new(coord_copy);
        c.bench_function(&format!("serialize polygon ({name})"), |b| {
            b.iter(|| geomserde::serialize_with_options(&provider, &polygon, &options).unwrap())
        });
        c.bench_function(&format!("deserialize polygon ({name})"), |b| {
            b.iter(|| {
                geomserde::deserialize_with_options(&provider, &polygon_buf, &options).unwrap()
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
