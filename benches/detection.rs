use charset_detector_rs::detect;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_detection(c: &mut Criterion) {
    let ascii = b"The quick brown fox jumps over the lazy dog. ".repeat(500);
    let utf16be: Vec<u8> = ascii.iter().flat_map(|&byte| [0u8, byte]).collect();
    let utf8: Vec<u8> = "Привет, мир! Это проверка детектора кодировок. "
        .repeat(200)
        .into_bytes();

    c.bench_function("detect ascii", |b| b.iter(|| detect(black_box(&ascii))));
    c.bench_function("detect utf16be", |b| b.iter(|| detect(black_box(&utf16be))));
    c.bench_function("detect utf8", |b| b.iter(|| detect(black_box(&utf8))));
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
