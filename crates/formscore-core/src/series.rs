//! Angle series - per-frame joint angle measurements
//!
//! A series holds one entry per processed frame. An entry is `None` when the
//! landmarks behind the angle were not visible enough in that frame, so the
//! series is indexed by frame position and may contain gaps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FormscoreError, FormscoreResult};

/// Named joint angle produced by the angle-extraction stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleName {
    KneeLeft,
    KneeRight,
    HipLeft,
    HipRight,
    BackLeft,
    BackRight,
}

impl AngleName {
    /// All angle names in extraction order
    pub fn all() -> &'static [AngleName] {
        &[
            AngleName::KneeLeft,
            AngleName::KneeRight,
            AngleName::HipLeft,
            AngleName::HipRight,
            AngleName::BackLeft,
            AngleName::BackRight,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AngleName::KneeLeft => "knee_left",
            AngleName::KneeRight => "knee_right",
            AngleName::HipLeft => "hip_left",
            AngleName::HipRight => "hip_right",
            AngleName::BackLeft => "back_left",
            AngleName::BackRight => "back_right",
        }
    }
}

impl fmt::Display for AngleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleName {
    type Err = FormscoreError;

    fn from_str(s: &str) -> FormscoreResult<Self> {
        AngleName::all()
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FormscoreError::UnknownAngle(s.to_string()))
    }
}

/// Ordered per-frame angle measurements in degrees, with gaps
///
/// Non-finite measurements are stored as missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleSeries(Vec<Option<f64>>);

impl AngleSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()))
                .collect(),
        )
    }

    /// Series with every frame present
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().map(|&v| Some(v)).collect())
    }

    /// Number of frames (present or missing)
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Measurement at a frame index, `None` if missing or out of range
    pub fn get(&self, frame: usize) -> Option<f64> {
        self.0.get(frame).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }

    /// Present values in frame order
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(|v| *v)
    }

    pub fn present_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    /// Smallest present value
    pub fn min(&self) -> Option<f64> {
        self.present().reduce(f64::min)
    }

    /// Largest present value
    pub fn max(&self) -> Option<f64> {
        self.present().reduce(f64::max)
    }

    /// Spread of present values (max - min)
    pub fn range(&self) -> Option<f64> {
        Some(self.max()? - self.min()?)
    }
}

impl From<Vec<Option<f64>>> for AngleSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Option<f64>> for AngleSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Mapping from angle name to its series for one video
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AngleSet {
    series: BTreeMap<AngleName, AngleSeries>,
}

impl AngleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string-keyed series, rejecting unknown names
    pub fn from_named<S, I>(entries: I) -> FormscoreResult<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, AngleSeries)>,
    {
        let mut set = AngleSet::new();
        for (name, series) in entries {
            set.insert(name.as_ref().parse()?, series);
        }
        Ok(set)
    }

    /// Set a series
    pub fn with(mut self, name: AngleName, series: AngleSeries) -> Self {
        self.insert(name, series);
        self
    }

    pub fn insert(&mut self, name: AngleName, series: AngleSeries) {
        self.series.insert(name, series);
    }

    /// Raw access, including empty series
    pub fn get(&self, name: AngleName) -> Option<&AngleSeries> {
        self.series.get(&name)
    }

    /// Series usable as a signal: present and holding at least one frame
    pub fn signal(&self, name: AngleName) -> Option<&AngleSeries> {
        self.get(name).filter(|s| !s.is_empty())
    }

    pub fn names(&self) -> impl Iterator<Item = AngleName> + '_ {
        self.series.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Longest series length
    pub fn frame_count(&self) -> usize {
        self.series.values().map(AngleSeries::len).max().unwrap_or(0)
    }
}
