// benches/failure_formatting.rs
//! Benchmarks for failure construction and message derivation.
//!
//! Covers each derivation path: untranslated join, translated template,
//! template fallback, storage-backend document, and persisted round-trip.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use remote_failure::{ErrorFormatter, Failure, StaticCatalog, template};

fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with("VM_BAD_POWER_STATE", "VM {0} must be {1}, but it is {2}.")
        .with("HOST_OFFLINE", "Host {0} is offline.")
}

// ============================================================================
// Construction Paths
// ============================================================================

fn bench_construction_paths(c: &mut Criterion) {
    let catalog = catalog();
    let formatter = ErrorFormatter::with_catalog(&catalog);
    let mut group = c.benchmark_group("construction");

    group.bench_function("untranslated_join", |b| {
        b.iter(|| {
            black_box(Failure::with_formatter(
                black_box(["VDI_IN_USE", " vdi-3\n", "", "vm-9"]),
                &formatter,
            ))
        })
    });

    group.bench_function("translated_template", |b| {
        b.iter(|| {
            black_box(Failure::with_formatter(
                black_box(["VM_BAD_POWER_STATE", "vm-1", "running", "halted"]),
                &formatter,
            ))
        })
    });

    group.bench_function("template_fallback", |b| {
        b.iter(|| {
            black_box(Failure::with_formatter(
                black_box(["VM_BAD_POWER_STATE", "vm-1"]),
                &formatter,
            ))
        })
    });

    group.bench_function("backend_document", |b| {
        b.iter(|| {
            black_box(Failure::with_formatter(
                black_box([
                    "SR_BACKEND_FAILURE",
                    "TransportException",
                    r#"{"error": "Unable to connect to iSCSI service on target"}"#,
                ]),
                &formatter,
            ))
        })
    });

    group.bench_function("backend_plain_text", |b| {
        b.iter(|| {
            black_box(Failure::with_formatter(
                black_box(["SR_BACKEND_FAILURE", "X", "not json"]),
                &formatter,
            ))
        })
    });

    group.bench_function("wrap_local_fault", |b| {
        b.iter(|| black_box(Failure::wrap(black_box("Connection lost"), "reset by peer")))
    });

    group.finish();
}

// ============================================================================
// Template Rendering
// ============================================================================

fn bench_template_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render");

    for slots in [1usize, 4, 16] {
        let template_text: String = (0..slots).map(|i| format!("[{{{}}}] ", i)).collect();
        let args: Vec<String> = (0..slots).map(|i| format!("arg-{}", i)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(slots), &slots, |b, _| {
            b.iter(|| black_box(template::render(black_box(&template_text), &args)))
        });
    }

    group.finish();
}

// ============================================================================
// Persistence & Logging
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let failure = Failure::new(["HOST_OFFLINE", "xs-01", "maintenance"]);
    let json = serde_json::to_string(&failure).unwrap();

    c.bench_function("serialize", |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&failure)).unwrap()))
    });

    c.bench_function("deserialize", |b| {
        b.iter(|| black_box(serde_json::from_str::<Failure>(black_box(&json)).unwrap()))
    });
}

fn bench_log_write(c: &mut Criterion) {
    let failure = Failure::new(["HOST_OFFLINE", "xs-01", "maintenance"]);

    c.bench_function("log_entry_write_to", |b| {
        let mut buffer = String::with_capacity(256);
        b.iter(|| {
            buffer.clear();
            failure.log_entry().write_to(&mut buffer).unwrap();
            black_box(&buffer);
        })
    });
}

criterion_group!(
    construction_benches,
    bench_construction_paths,
    bench_template_scaling,
);

criterion_group!(persistence_benches, bench_round_trip, bench_log_write);

criterion_main!(construction_benches, persistence_benches);
