use crate::simulation::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use nalgebra::vector;
use rapier2d_f64::prelude::*;
use std::f64::consts::FRAC_PI_2;

const WALL_THICKNESS: f64 = 60.0;

/// Add static walls around the arena. Also enables `close_to_wall` telemetry.
pub fn add_walls(sim: &mut Simulation) {
    let mut make_edge = |x: f64, y: f64, a: f64| {
        let edge_length = ARENA_WIDTH.max(ARENA_HEIGHT) + 2.0 * WALL_THICKNESS;
        let edge_width = WALL_THICKNESS;
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![x, y])
            .rotation(a)
            .build();
        let body_handle = sim.bodies.insert(rigid_body);
        let collider = ColliderBuilder::cuboid(edge_length / 2.0, edge_width / 2.0)
            .restitution(1.0)
            .build();
        sim.colliders
            .insert_with_parent(collider, body_handle, &mut sim.bodies);
    };
    make_edge(ARENA_WIDTH / 2.0, -WALL_THICKNESS / 2.0, 0.0);
    make_edge(ARENA_WIDTH / 2.0, ARENA_HEIGHT + WALL_THICKNESS / 2.0, 0.0);
    make_edge(-WALL_THICKNESS / 2.0, ARENA_HEIGHT / 2.0, FRAC_PI_2);
    make_edge(ARENA_WIDTH + WALL_THICKNESS / 2.0, ARENA_HEIGHT / 2.0, FRAC_PI_2);
    sim.has_walls = true;
}
