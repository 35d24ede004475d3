//! Data models exchanged between the gateway, its capabilities and clients.

pub mod control;
pub mod telemetry;

pub use control::{ControlAck, ControlOperation};
pub use telemetry::{DashboardStatus, SensorData};
