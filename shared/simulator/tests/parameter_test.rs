use aerostat_simulator::simulation::Simulation;
use aerostat_simulator::vehicle;
use approx::assert_abs_diff_eq;
use nalgebra::vector;
use test_log::test;

#[test]
fn test_set_air_resistance_changes_decay() {
    let coast = |air_resistance: f64| {
        let mut sim = Simulation::new(0, vehicle::blimp());
        sim.vehicle_mut().set_air_resistance(air_resistance);
        sim.vehicle_mut()
            .body()
            .set_linvel(vector![10.0, 0.0], true);
        for _ in 0..120 {
            sim.step();
        }
        sim.vehicle().velocity().magnitude()
    };

    let default_speed = coast(0.02);
    let draggy_speed = coast(0.5);
    assert!(draggy_speed < default_speed);
    assert!(draggy_speed > 0.0);
}

#[test]
fn test_set_air_resistance_updates_data() {
    let mut sim = Simulation::new(0, vehicle::blimp());
    sim.vehicle_mut().set_air_resistance(0.1);
    assert_abs_diff_eq!(sim.vehicle().data().air_resistance, 0.1);
}

#[test]
fn test_set_wind_speed() {
    let mut sim = Simulation::new(0, vehicle::blimp());
    assert_abs_diff_eq!(sim.wind().speed, 0.0);

    sim.set_wind_speed(0.0001);
    assert_abs_diff_eq!(sim.wind().speed, 0.0001);
    sim.step();
    assert_abs_diff_eq!(sim.forces().wind.magnitude(), 0.0001, epsilon = 1e-15);
}
