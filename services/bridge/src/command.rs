use aerostat_proto::{CommandMsg, Level};
use aerostat_simulator::simulation::Simulation;

/// Key token that triggers a reset when forwarded in `keysPressed`.
pub const RESET_KEY: &str = "r";

fn coerce(level: &Option<Level>, side: &str) -> Option<i32> {
    match level {
        Some(level) => match level.as_i32() {
            Some(value) => Some(value),
            None => {
                log::warn!("ignoring unparseable {side} power level {level:?}");
                None
            }
        },
        None => None,
    }
}

/// Apply the latest inbound command to the simulation at a step boundary.
/// Absent power-level fields leave the previous motor command unchanged.
pub fn apply(sim: &mut Simulation, cmd: &CommandMsg) {
    let left = coerce(&cmd.left_power_level, "left");
    let right = coerce(&cmd.right_power_level, "right");
    if left.is_some() || right.is_some() {
        let (current_left, current_right) = sim.vehicle().motor_levels();
        sim.vehicle_mut().set_motor_levels(
            left.unwrap_or(current_left),
            right.unwrap_or(current_right),
        );
    }

    if cmd.reset || cmd.keys_pressed.iter().any(|k| k == RESET_KEY) {
        sim.reset();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use aerostat_simulator::vehicle;
    use nalgebra::vector;
    use test_log::test;

    #[test]
    fn test_string_levels_coerced() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        let cmd: CommandMsg =
            serde_json::from_str(r#"{"leftPowerLevel": "64", "rightPowerLevel": "0"}"#).unwrap();
        apply(&mut sim, &cmd);
        assert_eq!(sim.vehicle().motor_levels(), (64, 0));
    }

    #[test]
    fn test_absent_levels_keep_previous() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        sim.vehicle_mut().set_motor_levels(10, 20);
        apply(
            &mut sim,
            &CommandMsg {
                right_power_level: Some(Level::Number(-50.0)),
                ..Default::default()
            },
        );
        assert_eq!(sim.vehicle().motor_levels(), (10, -50));
    }

    #[test]
    fn test_out_of_range_levels_clamped() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        let cmd: CommandMsg =
            serde_json::from_str(r#"{"leftPowerLevel": 500, "rightPowerLevel": "-500"}"#).unwrap();
        apply(&mut sim, &cmd);
        assert_eq!(sim.vehicle().motor_levels(), (127, -127));
    }

    #[test]
    fn test_unparseable_level_ignored() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        sim.vehicle_mut().set_motor_levels(10, 20);
        let cmd: CommandMsg = serde_json::from_str(r#"{"leftPowerLevel": "fast"}"#).unwrap();
        apply(&mut sim, &cmd);
        assert_eq!(sim.vehicle().motor_levels(), (10, 20));
    }

    #[test]
    fn test_reset_flag() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        sim.vehicle_mut().body().set_translation(vector![123.0, 45.0], true);
        sim.vehicle_mut().body().set_linvel(vector![5.0, 5.0], true);
        apply(&mut sim, &serde_json::from_str(r#"{"reset": true}"#).unwrap());
        let vehicle = sim.vehicle();
        assert_eq!(vehicle.position(), vector![400.0, 300.0]);
        assert_eq!(vehicle.velocity(), vector![0.0, 0.0]);
    }

    #[test]
    fn test_reset_key_token() {
        let mut sim = Simulation::new(0, vehicle::blimp());
        sim.vehicle_mut().body().set_translation(vector![1.0, 2.0], true);
        apply(
            &mut sim,
            &serde_json::from_str(r#"{"keysPressed": ["w", "r"]}"#).unwrap(),
        );
        assert_eq!(sim.vehicle().position(), vector![400.0, 300.0]);
    }
}
