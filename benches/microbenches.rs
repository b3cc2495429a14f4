//! Criterion microbenches for annocat parsing and querying.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - VOC XML record parsing (parse_record_str)
//! - Category and dimension/flag searches over a synthetic catalog

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::path::Path;

use annocat::catalog::Catalog;
use annocat::query::{search_by_category, search_by_dimension_and_flags, DimensionQuery, TriState};
use annocat::record::io_voc_xml::parse_record_str;
use annocat::record::{BoundingBox, Detection, Dimensions, Record};
use annocat::stats::StatsAccumulator;

const VOC_FIXTURE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <folder>shapes</folder>
  <filename>shapes_0001.png</filename>
  <size>
    <width>640</width>
    <height>480</height>
    <depth>3</depth>
  </size>
  <object>
    <name>circle</name>
    <truncated>0</truncated>
    <difficult>0</difficult>
    <bndbox><xmin>10</xmin><ymin>20</ymin><xmax>110</xmax><ymax>120</ymax></bndbox>
  </object>
  <object>
    <name>square</name>
    <truncated>1</truncated>
    <difficult>0</difficult>
    <bndbox><xmin>200</xmin><ymin>200</ymin><xmax>260</xmax><ymax>260</ymax></bndbox>
  </object>
  <object>
    <name>triangle</name>
    <truncated>0</truncated>
    <difficult>1</difficult>
    <bndbox><xmin>300</xmin><ymin>50</ymin><xmax>420</xmax><ymax>170</ymax></bndbox>
  </object>
</annotation>
"#;

const CATEGORIES: [&str; 3] = ["circle", "square", "triangle"];

fn synthetic_catalog(size: usize) -> (Catalog, StatsAccumulator) {
    let mut catalog = Catalog::new();
    let mut stats = StatsAccumulator::new();

    for idx in 0..size {
        let detections = (0..(idx % 5))
            .map(|j| {
                Detection::new(
                    CATEGORIES[(idx + j) % CATEGORIES.len()],
                    (idx + j) % 3 == 0,
                    (idx + j) % 7 == 0,
                    BoundingBox::from_xyxy(0, 0, (j as i32 + 1) * 10, 20),
                )
            })
            .collect();
        let record = Record::new(
            format!("img_{idx:05}"),
            format!("img_{idx:05}.png"),
            Dimensions::new(100 + (idx as u32 % 900), 80 + (idx as u32 % 700), 3),
            detections,
        );
        stats.observe(&record);
        catalog.insert(record);
    }

    (catalog, stats)
}

/// Benchmark VOC XML record parsing from string.
fn bench_voc_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("voc_parse");
    group.throughput(Throughput::Bytes(VOC_FIXTURE.len() as u64));

    group.bench_function("parse_record_str", |b| {
        b.iter(|| {
            let record =
                parse_record_str("shapes_0001", black_box(VOC_FIXTURE), Path::new("bench.xml"))
                    .unwrap();
            black_box(record)
        })
    });

    group.finish();
}

/// Benchmark both search modes over 10k records.
fn bench_queries(c: &mut Criterion) {
    let (catalog, stats) = synthetic_catalog(10_000);
    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(catalog.len() as u64));

    group.bench_function("search_by_category", |b| {
        b.iter(|| black_box(search_by_category(&catalog, black_box("triangle"))))
    });

    let query = DimensionQuery {
        max_width: Some(600),
        ..Default::default()
    }
    .difficult(TriState::No)
    .truncated(TriState::Yes);

    group.bench_function("search_by_dimension_and_flags", |b| {
        b.iter(|| black_box(search_by_dimension_and_flags(&catalog, &stats, black_box(&query))))
    });

    group.finish();
}

criterion_group!(benches, bench_voc_parse, bench_queries);
criterion_main!(benches);
