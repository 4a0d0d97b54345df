use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xmlpretty::{Document, FormatOptions, StyleResolver};

const SRC: &str = include_str!("../tests/good.xml");

fn parse_xml(src: &str) {
    let _ = Document::parse(src).unwrap();
}

fn format_xml(document: &Document<'_>, options: &FormatOptions) {
    let _ = document.to_lines(options).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_xml", |b| b.iter(|| parse_xml(black_box(SRC))));

    let document = Document::parse(SRC).unwrap();
    let plain = FormatOptions::default();
    let decorated = FormatOptions::new(StyleResolver::decorated());

    c.bench_function("format_plain", |b| {
        b.iter(|| format_xml(black_box(&document), &plain))
    });
    c.bench_function("format_decorated", |b| {
        b.iter(|| format_xml(black_box(&document), &decorated))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
