use crate::simulation::Simulation;
use nalgebra::{vector, Point2, Vector4};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Line {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
    pub color: Vector4<f32>,
}

// Forces are tiny in world units and unreadable unscaled.
const VELOCITY_SCALE: f64 = 100.0;
const MOTOR_FORCE_SCALE: f64 = 300_000.0;
const WIND_FORCE_SCALE: f64 = 900_000.0;

pub fn emit_vehicle(sim: &Simulation) -> Vec<Line> {
    let vehicle = sim.vehicle();
    let forces = sim.forces();
    let p = Point2::from(vehicle.position());
    let left = Point2::from(forces.left_point);
    let right = Point2::from(forces.right_point);
    let wind = Point2::from(forces.wind_point);
    vec![
        Line {
            a: p,
            b: p + vehicle.velocity() * VELOCITY_SCALE,
            color: vector![0.0, 1.0, 1.0, 1.0],
        },
        Line {
            a: left,
            b: left + forces.left * MOTOR_FORCE_SCALE,
            color: vector![1.0, 0.0, 1.0, 1.0],
        },
        Line {
            a: right,
            b: right + forces.right * MOTOR_FORCE_SCALE,
            color: vector![1.0, 0.0, 1.0, 1.0],
        },
        Line {
            a: wind,
            b: wind + forces.wind * WIND_FORCE_SCALE,
            color: vector![1.0, 1.0, 1.0, 1.0],
        },
    ]
}
