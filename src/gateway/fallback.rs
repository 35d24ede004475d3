//! Canned payloads returned when a command gives no usable data.
//!
//! Every call builds a fresh record. Dashboard metrics are drawn at random
//! within plausible bounds so the summary does not look frozen.

use rand::Rng;
use serde_json::{Map, Value, json};

use crate::models::{ControlAck, ControlOperation, DashboardStatus, SensorData};

/// Randomized dashboard metrics using the thread-local generator.
pub fn dashboard_status() -> DashboardStatus {
    dashboard_status_with(&mut rand::thread_rng())
}

/// Randomized dashboard metrics drawn from `rng`.
///
/// Hours fall in `1..=5`, minutes in `0..=59`, dosage in `1.0..=5.0` litres,
/// area in `1.0..=6.0` acres and battery in `30..=95` percent. Decimals are
/// rounded to one place.
pub fn dashboard_status_with<R: Rng>(rng: &mut R) -> DashboardStatus {
    let hours: u8 = rng.gen_range(1..=5);
    let minutes: u8 = rng.gen_range(0..=59);
    let dosage = f64::from(rng.gen_range(10u8..=50)) / 10.0;
    let area = f64::from(rng.gen_range(10u8..=60)) / 10.0;
    let battery: u8 = rng.gen_range(30..=95);

    DashboardStatus {
        summary_time: json!(format!("{hours}h {minutes}m")),
        dosage_used: json!(dosage),
        area_covered: json!(area),
        battery_level: json!(battery),
    }
}

/// Fixed placeholder sensor readings.
pub fn sensor_data() -> SensorData {
    SensorData {
        tank_level: json!("47%"),
        weather_value: json!("dhoop"),
        weather_note: json!("chidkav ke liye anukool"),
    }
}

/// `{success: false, message}` for a control command that did not go through.
pub fn control_ack(operation: ControlOperation) -> ControlAck {
    let mut map = Map::new();
    map.insert("success".into(), Value::Bool(false));
    map.insert("message".into(), Value::String(operation.failure_message().into()));
    ControlAck(map)
}
