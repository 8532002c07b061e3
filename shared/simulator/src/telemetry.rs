use crate::simulation::{Simulation, PHYSICS_TICK_LENGTH};
use nalgebra::{vector, Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of velocity samples retained for acceleration estimation.
pub const VELOCITY_WINDOW: usize = 5;

/// Per-step sensor readings, expressed in the vehicle's own reference frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Telemetry {
    pub acceleration: Vector2<f64>,
    pub angular_velocity: f64,
    pub linear_velocity: Vector2<f64>,
    pub close_to_wall: Option<bool>,
}

/// Smoothed finite-difference accelerometer over a bounded FIFO window of
/// world-frame velocity samples.
#[derive(Clone, Debug)]
pub struct Accelerometer {
    window: VecDeque<Vector2<f64>>,
    capacity: usize,
}

impl Accelerometer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2);
        Accelerometer {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, velocity: Vector2<f64>) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(velocity);
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// (newest - oldest retained) / (dt * n), where n is the current window
    /// length. Zero until at least two samples have arrived.
    pub fn estimate(&self, dt: f64) -> Vector2<f64> {
        match (self.window.front(), self.window.back()) {
            (Some(oldest), Some(newest)) if self.window.len() >= 2 => {
                (newest - oldest) / (dt * self.window.len() as f64)
            }
            _ => vector![0.0, 0.0],
        }
    }
}

/// Rotate a world-frame vector into the body frame of a vehicle at `heading`.
pub fn to_body_frame(heading: f64, v: &Vector2<f64>) -> Vector2<f64> {
    Rotation2::new(-heading).transform_vector(v)
}

pub(crate) fn read(sim: &Simulation) -> Telemetry {
    let vehicle = sim.vehicle();
    let heading = vehicle.body().rotation().angle();
    let acceleration = sim.accelerometer.estimate(PHYSICS_TICK_LENGTH);
    Telemetry {
        acceleration: to_body_frame(heading, &acceleration),
        angular_velocity: vehicle.angular_velocity(),
        linear_velocity: to_body_frame(heading, &vehicle.velocity()),
        close_to_wall: sim.close_to_wall(),
    }
}
