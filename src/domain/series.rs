// Series domain models - one comparison year per series
use std::collections::BTreeMap;

use serde::Deserialize;

/// One point on a category x axis. `y` is `None` where the server sent a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: String,
    pub y: Option<f64>,
}

impl Sample {
    pub fn new(x: impl Into<String>, y: Option<f64>) -> Self {
        Self { x: x.into(), y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// Color requested by the payload; the renderer picks one otherwise.
    pub color: Option<String>,
    /// Plotly `type` and `mode` from the payload, e.g. `bar` or `markers`.
    pub trace_type: Option<String>,
    pub mode: Option<String>,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            color: None,
            trace_type: None,
            mode: None,
            samples,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_shape(mut self, trace_type: Option<String>, mode: Option<String>) -> Self {
        self.trace_type = trace_type;
        self.mode = mode;
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Series rendered together in one panel, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: Vec<Series>,
}

impl SeriesSet {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn into_inner(self) -> Vec<Series> {
        self.series
    }
}

impl FromIterator<Series> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Inclusive sample range of a secondary series where the onset threshold holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThresholdAnnotation {
    pub start_index: usize,
    pub end_index: usize,
}

impl ThresholdAnnotation {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// Samples covered by this annotation, or `None` when the range does not fit.
    pub fn slice<'a>(&self, series: &'a Series) -> Option<&'a [Sample]> {
        if self.start_index > self.end_index || self.end_index >= series.len() {
            return None;
        }
        Some(&series.samples[self.start_index..=self.end_index])
    }
}

/// Series name -> annotation.
pub type ThresholdMap = BTreeMap<String, ThresholdAnnotation>;
