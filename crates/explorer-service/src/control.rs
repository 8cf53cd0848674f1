//! Vehicle control commands.
//!
//! The control panel sends movement, audio and camera commands here. The
//! vehicle link itself is not implemented: accepted commands are validated,
//! logged and acknowledged, and nothing is forwarded to hardware.
//!
//! Commands are tagged JSON objects:
//!
//! ```json
//! {"command": "move", "direction": "forward", "active": true}
//! {"command": "speed", "percent": 60}
//! {"command": "camera_connect", "address": "192.168.1.40"}
//! {"command": "flash"}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Movement direction for [`ControlCommand::Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

fn default_active() -> bool {
    true
}

/// A command for the vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Press (`active = true`) or release a movement button.
    Move {
        direction: Direction,
        #[serde(default = "default_active")]
        active: bool,
    },
    /// Set drive speed.
    Speed { percent: u8 },
    /// Start or stop the audio stream.
    Audio { streaming: bool },
    /// Set audio volume.
    Volume { percent: u8 },
    /// Mute or unmute audio.
    Mute { muted: bool },
    /// Enable or disable one microphone.
    Microphone { id: String, enabled: bool },
    /// Point the camera view at an IP camera.
    CameraConnect { address: String },
    /// Toggle the camera flash.
    Flash,
    /// Capture a still photo.
    Capture,
}

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ControlError {
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: u8 },
    #[error("Camera address cannot be empty")]
    EmptyAddress,
    #[error("Microphone id cannot be empty")]
    EmptyMicrophoneId,
}

impl ControlCommand {
    /// Check command arguments.
    pub fn validate(&self) -> Result<(), ControlError> {
        match self {
            ControlCommand::Speed { percent } if *percent > 100 => {
                Err(ControlError::PercentOutOfRange {
                    field: "speed",
                    value: *percent,
                })
            }
            ControlCommand::Volume { percent } if *percent > 100 => {
                Err(ControlError::PercentOutOfRange {
                    field: "volume",
                    value: *percent,
                })
            }
            ControlCommand::Microphone { id, .. } if id.trim().is_empty() => {
                Err(ControlError::EmptyMicrophoneId)
            }
            ControlCommand::CameraConnect { address } if address.trim().is_empty() => {
                Err(ControlError::EmptyAddress)
            }
            _ => Ok(()),
        }
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        let on_off = |on: bool| if on { "on" } else { "off" };
        match self {
            ControlCommand::Move { direction, active } => {
                format!("move {:?} {}", direction, on_off(*active)).to_lowercase()
            }
            ControlCommand::Speed { percent } => format!("speed set to {}%", percent),
            ControlCommand::Audio { streaming } => format!("audio stream {}", on_off(*streaming)),
            ControlCommand::Volume { percent } => format!("volume set to {}%", percent),
            ControlCommand::Mute { muted } => {
                if *muted { "audio muted" } else { "audio unmuted" }.to_string()
            }
            ControlCommand::Microphone { id, enabled } => {
                format!("microphone {} {}", id, on_off(*enabled))
            }
            ControlCommand::CameraConnect { address } => format!("camera connect to {}", address),
            ControlCommand::Flash => "camera flash toggled".to_string(),
            ControlCommand::Capture => "photo capture requested".to_string(),
        }
    }
}

/// Acknowledgement returned for an accepted command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlAck {
    pub accepted: bool,
    pub command: ControlCommand,
    pub description: String,
}

/// Validate and log a command.
pub fn dispatch(command: ControlCommand) -> Result<ControlAck, ControlError> {
    command.validate()?;
    let description = command.describe();
    info!(target: "explorer_service::control", "Vehicle command: {}", description);
    Ok(ControlAck {
        accepted: true,
        command,
        description,
    })
}
