use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maintenance_pipeline::models::{ProductType, SensorReading};
use maintenance_pipeline::processors::FeatureEngineer;
use maintenance_pipeline::readers::RawDataReader;
use maintenance_pipeline::writers::ProcessedCsvWriter;

const HEADER: &str = "UDI,Product ID,Type,Air temperature [K],Process temperature [K],Rotational speed [rpm],Torque [Nm],Tool wear [min]";

// Deterministic rows spread across all three product types
fn create_raw_csv(rows: usize) -> String {
    let mut csv = String::with_capacity(rows * 64);
    csv.push_str(HEADER);
    csv.push('\n');

    for i in 0..rows {
        let product_type = ProductType::ALL[i % 3];
        let air = 295.0 + (i % 50) as f64 * 0.1;
        let process = air + 8.0 + (i % 30) as f64 * 0.1;
        let speed = 1200 + (i % 1600);
        let torque = 20.0 + (i % 500) as f64 * 0.1;
        let wear = i % 250;

        csv.push_str(&format!(
            "{},{}{},{},{:.1},{:.1},{},{:.1},{}\n",
            i + 1,
            product_type.code(),
            10000 + i,
            product_type.code(),
            air,
            process,
            speed,
            torque,
            wear
        ));
    }

    csv
}

fn benchmark_feature_engineering(c: &mut Criterion) {
    let engineer = FeatureEngineer::new();
    let reading = SensorReading::new(ProductType::Medium, 298.1, 308.6, 1551.0, 42.8, 108.0);

    c.bench_function("engineer_single_reading", |b| {
        b.iter(|| engineer.engineer(black_box(&reading)))
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess_pipeline");

    for rows in [1_000, 10_000] {
        let raw = create_raw_csv(rows);

        group.bench_with_input(BenchmarkId::new("read_and_engineer", rows), &raw, |b, raw| {
            b.iter(|| {
                let table = RawDataReader::new().read_from(raw.as_bytes()).unwrap();
                FeatureEngineer::new().preprocess(black_box(table)).unwrap()
            })
        });

        let table = RawDataReader::new().read_from(raw.as_bytes()).unwrap();
        let processed = FeatureEngineer::new().preprocess(table).unwrap();
        group.bench_with_input(BenchmarkId::new("write_csv", rows), &processed, |b, processed| {
            b.iter(|| {
                let mut sink = Vec::with_capacity(rows * 128);
                ProcessedCsvWriter::new()
                    .write_to(black_box(processed), &mut sink)
                    .unwrap();
                sink
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_feature_engineering, benchmark_pipeline);
criterion_main!(benches);
