#![allow(dead_code)]

use annocat::query::TriState;
use annocat::record::{BoundingBox, Detection, Dimensions, Record};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const CATEGORIES: [&str; 4] = ["circle", "square", "triangle", "Circle"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_bbox() -> impl Strategy<Value = BoundingBox> {
    (0i32..500, 0i32..500, 0i32..200, 0i32..200)
        .prop_map(|(x, y, w, h)| BoundingBox::from_xyxy(x, y, x + w, y + h))
}

pub fn arb_detection() -> impl Strategy<Value = Detection> {
    (
        proptest::sample::select(CATEGORIES.to_vec()),
        any::<bool>(),
        any::<bool>(),
        arb_bbox(),
    )
        .prop_map(|(category, truncated, difficult, bbox)| {
            Detection::new(category, truncated, difficult, bbox)
        })
}

pub fn arb_dimensions() -> impl Strategy<Value = Dimensions> {
    (1u32..2000, 1u32..2000, prop_oneof![Just(1u32), Just(3u32)])
        .prop_map(|(w, h, d)| Dimensions::new(w, h, d))
}

/// Records with keys `r0`, `r1`, ... drawn from a small pool so duplicates occur.
pub fn arb_records(max_records: usize, max_detections: usize) -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(
        (
            0usize..(max_records.max(1) * 2 / 3 + 1),
            arb_dimensions(),
            proptest::collection::vec(arb_detection(), 0..=max_detections),
        ),
        0..=max_records,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(key_idx, dims, detections)| {
                let key = format!("r{key_idx}");
                Record::new(key.clone(), format!("{key}.png"), dims, detections)
            })
            .collect()
    })
}

pub fn arb_tristate() -> impl Strategy<Value = TriState> {
    prop_oneof![Just(TriState::Any), Just(TriState::Yes), Just(TriState::No)]
}

/// Independent reading of a tri-state filter.
pub fn admits(filter: TriState, value: bool) -> bool {
    match filter {
        TriState::Any => true,
        TriState::Yes => value,
        TriState::No => !value,
    }
}
