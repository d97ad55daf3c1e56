use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo_country_enricher::geocoding::{GeocodeError, RateLimitedLookupClient, ReverseGeocoder};
use geo_country_enricher::models::Record;
use geo_country_enricher::processors::BatchProcessor;
use geo_country_enricher::utils::coordinates::normalize_coordinate;
use serde_json::{json, Value};
use std::time::Duration;

// Answers instantly so only pipeline overhead is measured
struct InstantGeocoder;

#[async_trait::async_trait]
impl ReverseGeocoder for InstantGeocoder {
    async fn reverse(&self, query: &str, _language: &str) -> Result<Option<Value>, GeocodeError> {
        let country = if query.starts_with('-') { "Australia" } else { "United Kingdom" };
        Ok(Some(json!({ "address": { "country": country } })))
    }
}

fn create_test_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            if i % 10 == 0 {
                Record::new(None)
            } else {
                let lat = if i % 2 == 0 { -33.8688 } else { 51.5074 };
                Record::new(Some(format!("({:.4}, {:.4})", lat, i as f64 * 0.001)))
            }
        })
        .collect()
}

fn benchmark_normalize(c: &mut Criterion) {
    let raw = create_test_records(1000);

    c.bench_function("normalize_coordinate", |b| {
        b.iter(|| {
            for record in &raw {
                if let Some(location) = record.raw_location.as_deref() {
                    black_box(normalize_coordinate(black_box(location)));
                }
            }
        })
    });
}

fn benchmark_batch_processor(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let client = RateLimitedLookupClient::new(InstantGeocoder).with_min_delay(Duration::ZERO);

    let mut group = c.benchmark_group("batch_processor");
    for batch_size in [1usize, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    let mut records = create_test_records(1000);
                    runtime
                        .block_on(
                            BatchProcessor::new(&client)
                                .with_batch_size(batch_size)
                                .process(&mut records, None),
                        )
                        .unwrap();
                    black_box(records)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_batch_processor);
criterion_main!(benches);
