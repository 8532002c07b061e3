use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sent to the trainer once per simulation step. Velocity and acceleration
/// are expressed in the vehicle's own reference frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryMsg {
    pub acceleration: Vec2,
    pub angular_velocity: f64,
    pub linear_velocity: Vec2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_to_wall: Option<bool>,
}

/// A motor level as it appears on the wire. The trainer sends either JSON
/// numbers or numeric strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Level {
    Number(f64),
    Text(String),
}

impl Level {
    /// Coerce to an integer motor level. Strings that fail to parse and
    /// non-finite numbers yield None.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Level::Number(n) if n.is_finite() => Some(*n as i32),
            Level::Number(_) => None,
            Level::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| n as i32),
        }
    }
}

/// Received from the trainer. All fields are optional; absent power levels
/// leave the previous motor command unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommandMsg {
    #[serde(default)]
    pub left_power_level: Option<Level>,
    #[serde(default)]
    pub right_power_level: Option<Level>,
    #[serde(default)]
    pub reset: bool,
    #[serde(default)]
    pub keys_pressed: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_telemetry_wire_shape() {
        let msg = TelemetryMsg {
            acceleration: Vec2::new(1.0, -2.0),
            angular_velocity: 0.5,
            linear_velocity: Vec2::new(3.0, 4.0),
            close_to_wall: None,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "acceleration": {"x": 1.0, "y": -2.0},
                "angularVelocity": 0.5,
                "linearVelocity": {"x": 3.0, "y": 4.0},
            })
        );

        let msg = TelemetryMsg {
            close_to_wall: Some(true),
            ..msg
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["closeToWall"], serde_json::json!(true));
    }

    #[test]
    fn test_command_string_coercion() {
        let cmd: CommandMsg =
            serde_json::from_str(r#"{"leftPowerLevel": "64", "rightPowerLevel": "0"}"#).unwrap();
        assert_eq!(cmd.left_power_level.unwrap().as_i32(), Some(64));
        assert_eq!(cmd.right_power_level.unwrap().as_i32(), Some(0));
        assert!(!cmd.reset);
    }

    #[test]
    fn test_command_numeric_levels() {
        let cmd: CommandMsg =
            serde_json::from_str(r#"{"leftPowerLevel": -127, "rightPowerLevel": 42.9}"#).unwrap();
        assert_eq!(cmd.left_power_level.unwrap().as_i32(), Some(-127));
        assert_eq!(cmd.right_power_level.unwrap().as_i32(), Some(42));
    }

    #[test]
    fn test_command_partial_fields() {
        let cmd: CommandMsg = serde_json::from_str(r#"{"reset": true}"#).unwrap();
        assert!(cmd.reset);
        assert!(cmd.left_power_level.is_none());
        assert!(cmd.right_power_level.is_none());
        assert!(cmd.keys_pressed.is_empty());

        let cmd: CommandMsg = serde_json::from_str(r#"{"keysPressed": ["r", "w"]}"#).unwrap();
        assert_eq!(cmd.keys_pressed, vec!["r", "w"]);
    }

    #[test]
    fn test_bad_level_text() {
        let cmd: CommandMsg = serde_json::from_str(r#"{"leftPowerLevel": "fast"}"#).unwrap();
        assert_eq!(cmd.left_power_level.unwrap().as_i32(), None);
    }
}
