use crate::rng::SeededRng;
use nalgebra::{vector, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Wind speed band used when reinitializing after a reset.
pub const RESET_WIND_SPEED_MIN: f64 = 0.00002;
pub const RESET_WIND_SPEED_MAX: f64 = 0.00005;

/// Ambient wind, applied as a constant force at a fixed point on the
/// vehicle's rim. `speed` is the force magnitude; `application_angle` is the
/// world-frame angle of the application point around the body center.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WindState {
    pub speed: f64,
    pub direction: f64,
    pub application_angle: f64,
}

impl WindState {
    pub fn calm(rng: &mut SeededRng) -> Self {
        WindState {
            speed: 0.0,
            ..WindState::randomized(rng)
        }
    }

    pub fn randomized(rng: &mut SeededRng) -> Self {
        WindState {
            speed: rng.gen_range(RESET_WIND_SPEED_MIN..RESET_WIND_SPEED_MAX),
            direction: rng.gen_range(0.0..TAU),
            application_angle: rng.gen_range(0.0..TAU),
        }
    }

    pub fn force(&self) -> Vector2<f64> {
        self.speed * vector![self.direction.cos(), self.direction.sin()]
    }
}
