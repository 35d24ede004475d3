use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mutating hardware command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOperation {
    /// Begin spraying.
    SystemOn,
    /// Stop spraying.
    SystemOff,
    /// Halt immediately.
    EmergencyStop,
}

impl ControlOperation {
    /// Stable identifier used in logs and the status endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            ControlOperation::SystemOn => "system_on",
            ControlOperation::SystemOff => "system_off",
            ControlOperation::EmergencyStop => "emergency_stop",
        }
    }

    /// User-facing text sent when the command could not be carried out.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ControlOperation::SystemOn => {
                "System chalu nahi ho paya. Kripya dobara koshish karein."
            }
            ControlOperation::SystemOff => {
                "System band nahi ho paya. Kripya dobara koshish karein."
            }
            ControlOperation::EmergencyStop => {
                "Emergency stop nahi ho paya. Robot ko haath se band karein."
            }
        }
    }
}

impl fmt::Display for ControlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The object a control command printed, relayed as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlAck(pub Map<String, Value>);

impl ControlAck {
    /// The `success` flag, if present and boolean.
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    /// The `message` field, if present and a string.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for ControlAck {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
