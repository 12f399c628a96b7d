#![no_main]

use golden_runner::{clean_output, first_mismatch, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Treat the input as captured interpreter output, the way the runner decodes it
    let raw = String::from_utf8_lossy(data);
    let cleaned = clean_output(&raw);

    assert_eq!(normalize(&cleaned), cleaned);
    assert_eq!(first_mismatch(&cleaned, &cleaned), None);

    // Diff the cleaned text against the raw text; must never panic
    let _ = first_mismatch(&cleaned, &normalize(&raw));
});
