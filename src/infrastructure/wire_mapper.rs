// Mapper from the server's Plotly-shaped JSON to domain types
use crate::domain::error::Result;
use crate::domain::series::{Sample, Series, SeriesSet, ThresholdMap};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct WireTrace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: Vec<Value>,
    #[serde(default)]
    y: Vec<Value>,
    #[serde(default, rename = "type")]
    trace_type: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    line: Option<WireLine>,
}

#[derive(Debug, Deserialize)]
struct WireLine {
    #[serde(default)]
    color: Option<String>,
}

/// Decode a JSON-encoded array of traces (`ndvi_data`, `temp_data`, `pollen_data`)
pub fn decode_series_set(payload: &str) -> Result<SeriesSet> {
    let traces: Vec<WireTrace> = serde_json::from_str(payload)?;
    Ok(traces.into_iter().map(trace_to_series).collect())
}

/// Decode the JSON-encoded `threshold_dates` map
pub fn decode_thresholds(payload: &str) -> Result<ThresholdMap> {
    Ok(serde_json::from_str(payload)?)
}

fn trace_to_series(trace: WireTrace) -> Series {
    // Plotly draws min(len(x), len(y)) points
    let samples = trace
        .x
        .into_iter()
        .zip(trace.y)
        .map(|(x, y)| Sample::new(category_label(x), y.as_f64()))
        .collect();

    let series = Series::new(trace.name, samples).with_shape(trace.trace_type, trace.mode);
    match trace.line.and_then(|line| line.color) {
        Some(color) => series.with_color(color),
        None => series,
    }
}

fn category_label(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DashboardError;
    use crate::domain::series::ThresholdAnnotation;

    #[test]
    fn test_decode_series_set_keeps_order_and_gaps() {
        let payload = r##"[
            {"name": "2023", "x": ["03-01", "03-02", "03-03"], "y": [4.25, null, 6.5], "mode": "lines"},
            {"name": "2024", "x": [1, 2], "y": [0.5, 0.75], "line": {"color": "#ff0000"}}
        ]"##;

        let set = decode_series_set(payload).unwrap();

        assert_eq!(set.len(), 2);
        let first = set.get(0).unwrap();
        assert_eq!(first.name, "2023");
        assert_eq!(first.samples[1], Sample::new("03-02", None));
        assert_eq!(first.color, None);

        let second = set.get(1).unwrap();
        assert_eq!(second.samples[0], Sample::new("1", Some(0.5)));
        assert_eq!(second.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_decode_series_set_keeps_trace_shape() {
        let set = decode_series_set(
            r#"[
                {"name": "Breza", "type": "bar", "x": ["10-03"], "y": [42]},
                {"name": "Trávy", "mode": "lines+markers", "x": ["10-03"], "y": [7]},
                {"name": "Lipa", "x": ["10-03"], "y": [1]}
            ]"#,
        )
        .unwrap();

        assert_eq!(set.get(0).unwrap().trace_type.as_deref(), Some("bar"));
        assert_eq!(set.get(0).unwrap().mode, None);
        assert_eq!(set.get(1).unwrap().mode.as_deref(), Some("lines+markers"));
        assert_eq!(set.get(2).unwrap().trace_type, None);
    }

    #[test]
    fn test_decode_series_set_truncates_to_shorter_axis() {
        let set = decode_series_set(r#"[{"name": "a", "x": ["p1", "p2", "p3"], "y": [1.0]}]"#)
            .unwrap();
        assert_eq!(set.get(0).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_thresholds() {
        let map = decode_thresholds(
            r#"{"2023": {"start_index": 12, "end_index": 16}, "2024": {"start_index": 3, "end_index": 7}}"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["2024"], ThresholdAnnotation::new(3, 7));
    }

    #[test]
    fn test_negative_threshold_index_is_malformed() {
        let err =
            decode_thresholds(r#"{"2023": {"start_index": -1, "end_index": 4}}"#).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedPayload(_)));
    }
}
