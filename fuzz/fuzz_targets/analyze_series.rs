#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use formscore_analysis::FormAnalyzer;
use formscore_core::{AngleName, AngleSeries, AngleSet, FrameCounts};

#[derive(Arbitrary, Debug)]
struct Input {
    series: Vec<(u8, Vec<Option<f64>>)>,
    frames_processed: u16,
}

fuzz_target!(|input: Input| {
    let names = AngleName::all();
    let mut angles = AngleSet::new();
    for (idx, values) in input.series {
        let name = names[idx as usize % names.len()];
        angles.insert(name, AngleSeries::new(values));
    }

    let frames = usize::from(input.frames_processed);
    let counts = FrameCounts::new(frames, frames.min(angles.frame_count()));

    let report = FormAnalyzer::default()
        .analyze(&angles, counts)
        .expect("rules only build valid violations");
    assert!(report.score() <= 100);
    assert!(report.feedback_summary().len() <= 5);
});
