//! Fuzz target for VOC record parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the VOC record parser and
//! folds every parsed record into statistics, checking for panics, crashes,
//! or hangs in both parsing and derived geometry.

#![no_main]

use annocat::record::io_voc_xml::fuzz_record_geometry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_record_geometry(data);
});
