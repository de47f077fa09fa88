#![no_main]

use libfuzzer_sys::fuzz_target;

use formscore_core::AngleSeries;
use formscore_signal::{fuse, trim};

fuzz_target!(|input: (Vec<Option<f64>>, Vec<Option<f64>>, u8)| {
    let (left, right, fraction) = input;
    let left = AngleSeries::new(left);
    let right = AngleSeries::new(right);
    let fraction = f64::from(fraction % 50) / 100.0;

    let trimmed = trim(&left, fraction);
    assert_eq!(trimmed.len(), left.len());
    assert!(trimmed.present_count() <= left.present_count());

    let fused = fuse(&trimmed, &right);
    assert_eq!(fused.len(), left.len().min(right.len()));
});
