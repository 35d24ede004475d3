//! Read-side records.
//!
//! Both records carry exactly the fields the dashboard renders. Values are kept
//! as raw JSON so whatever the sensor command printed is relayed unchanged,
//! while the field set stays identical to the fallback's.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate usage metrics shown in the dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatus {
    /// Spraying duration, e.g. `"2h 15m"`.
    pub summary_time: Value,
    /// Pesticide volume used, in litres.
    pub dosage_used: Value,
    /// Area covered, in acres.
    pub area_covered: Value,
    /// Battery charge in percent.
    pub battery_level: Value,
}

/// Tank level and weather readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    /// Tank fill level, e.g. `"47%"`.
    pub tank_level: Value,
    /// Short weather label.
    pub weather_value: Value,
    /// Spraying advice derived from the weather.
    pub weather_note: Value,
}

impl SensorData {
    /// Tank level as a percentage clamped to `0..=100`, if it can be read as
    /// a number. Accepts `47`, `47.5`, `"47%"` and `"47 %"`.
    pub fn tank_percent(&self) -> Option<u8> {
        let level = match &self.tank_level {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !level.is_finite() {
            return None;
        }
        Some(level.clamp(0.0, 100.0).round() as u8)
    }
}
