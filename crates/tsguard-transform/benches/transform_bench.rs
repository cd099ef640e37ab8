//! Transform Benchmark
//!
//! Measures end-to-end transform throughput (bytes/sec): parse, resolve, synthesize, print.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::path::Path;
use tsguard_transform::{MemoryModuleLoader, TransformOptions, transform_file};

// =============================================================================
// Test Sources
// =============================================================================

const UNTRACKED_SOURCE: &str = r#"
import { readFile } from './fs';

export async function load(path: string): Promise<string> {
    const text = await readFile(path);
    return text.trim();
}
"#;

const HANDLER_SOURCE: &str = r#"
import { is, MinLength, MaxLength, Minimum } from './tsguard';

type Name = string & MinLength<1> & MaxLength<64>;

interface Address {
    street: string;
    city: string;
    zip: [number, number];
}

interface Customer {
    id: number & Minimum<1>;
    name: Name;
    tier: 'free' | 'pro' | 'enterprise';
    addresses: Address[];
    tags?: string[];
}

export function handle(body: unknown) {
    if (!is<Customer>(body)) {
        throw new Error('invalid customer');
    }
    return body;
}
"#;

/// Generate a module with many generic declarations and one tracked call per declaration.
fn generate_large_source(declarations: usize) -> String {
    let mut source = String::with_capacity(declarations * 160);
    source.push_str("import { is } from './tsguard';\n\n");
    source.push_str("interface Box<T> { value: T; history: T[] }\n\n");
    for d in 0..declarations {
        source.push_str(&format!(
            "interface Record{d} {{\n    id: number;\n    label: string;\n    flags: boolean[];\n}}\n"
        ));
        source.push_str(&format!(
            "export const check{d} = (input: unknown) => is<Box<Record{d}>>(input);\n\n"
        ));
    }
    source
}

fn run(source: &str) -> String {
    let options = TransformOptions::default();
    let loader = MemoryModuleLoader::new(options.marker_module.as_str());
    transform_file(Path::new("/bench/main.ts"), source, &loader, &options).code
}

// =============================================================================
// Transform Benchmarks
// =============================================================================

/// Benchmark: file without a marker import (parse and bail)
fn bench_untracked(c: &mut Criterion) {
    c.bench_function("transform_untracked", |b| {
        b.iter(|| black_box(run(black_box(UNTRACKED_SOURCE))))
    });
}

/// Benchmark: one realistic request handler
fn bench_handler(c: &mut Criterion) {
    c.bench_function("transform_handler", |b| {
        b.iter(|| black_box(run(black_box(HANDLER_SOURCE))))
    });
}

/// Benchmark: throughput for growing numbers of call sites
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_throughput");

    for declarations in [10, 50, 200] {
        let source = generate_large_source(declarations);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("calls", declarations),
            &source,
            |b, source| b.iter(|| black_box(run(source))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_untracked, bench_handler, bench_throughput);
criterion_main!(benches);
