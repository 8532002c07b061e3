use crate::debug::Line;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Read-only view of the simulation for a presentation layer (canvas
/// overlay, recorder). Not part of the trainer wire contract.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub tick: u32,
    pub time: f64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub angular_velocity: f64,
    pub acceleration: Vector2<f64>,
    pub speed: f64,
    pub reward: f64,
    pub left_motor_level: i32,
    pub right_motor_level: i32,
    pub close_to_wall: Option<bool>,
    pub debug_lines: Vec<Line>,
}

/// Heuristic station-keeping score shown by the overlay: 1 minus penalties
/// for speed, acceleration, and spin.
pub fn reward(speed: f64, acceleration_magnitude: f64, angular_velocity: f64) -> f64 {
    1.0 - (4.0 * speed).powi(2)
        - (100_000.0 * acceleration_magnitude).powi(2)
        - (100.0 * angular_velocity).powi(2)
}
