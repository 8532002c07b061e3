use aerostat_simulator::collision;
use aerostat_simulator::simulation::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use aerostat_simulator::vehicle;
use nalgebra::vector;
use test_log::test;

#[test]
fn test_close_to_wall_thresholds() {
    let mut sim = Simulation::new(0, vehicle::blimp());
    collision::add_walls(&mut sim);

    assert_eq!(sim.close_to_wall(), Some(false));

    for (x, y, expected) in [
        (50.0, 300.0, true),
        (750.0, 300.0, true),
        (400.0, 50.0, true),
        (400.0, 550.0, true),
        (150.0, 150.0, false),
        (650.0, 450.0, false),
    ] {
        sim.vehicle_mut().body().set_translation(vector![x, y], true);
        assert_eq!(sim.close_to_wall(), Some(expected), "at ({x}, {y})");
    }
}

#[test]
fn test_vehicle_stays_in_arena() {
    let mut sim = Simulation::new(0, vehicle::blimp());
    collision::add_walls(&mut sim);

    sim.vehicle_mut()
        .body()
        .set_linvel(vector![-200.0, 130.0], true);
    for _ in 0..600 {
        sim.step();
    }

    let radius = sim.vehicle().data().radius;
    let position = sim.vehicle().position();
    assert!(position.x >= radius - 1.0 && position.x <= ARENA_WIDTH - radius + 1.0);
    assert!(position.y >= radius - 1.0 && position.y <= ARENA_HEIGHT - radius + 1.0);
}
