//! Typed capabilities of the spraying robot.
//!
//! Gateway code talks to the robot only through [`Telemetry`] and
//! [`SprayControl`]. [`ProcessDevice`] implements both by running the
//! configured scripts; a direct hardware driver can implement them later
//! without touching the fallback policy.

mod process_device;
mod traits;

pub use process_device::ProcessDevice;
#[cfg(test)]
pub use traits::{MockSprayControl, MockTelemetry};
pub use traits::{SprayControl, Telemetry};
