use crate::simulation::Simulation;
use nalgebra::{vector, Point2, Vector2};
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Motor levels are device-bounded to a signed 8-bit-ish range.
pub const MOTOR_LEVEL_LIMIT: i32 = 127;

#[derive(Clone, Debug)]
pub struct VehicleData {
    pub radius: f64,
    pub density: f64,
    pub restitution: f64,
    pub air_resistance: f64,
    /// Force per motor level unit.
    pub force_scale: f64,
    /// Thrust direction relative to the heading.
    pub mounting_angle: f64,
    /// Distance from the body center to each thruster's application point.
    pub thruster_offset: f64,
    pub left_motor_level: i32,
    pub right_motor_level: i32,
    pub reset_position: Vector2<f64>,
    pub reset_heading: f64,
}

pub fn blimp() -> VehicleData {
    VehicleData {
        radius: 30.0,
        density: 0.001,
        restitution: 1.0,
        air_resistance: 0.02,
        force_scale: 0.00005 / 127.0,
        mounting_angle: 0.0,
        thruster_offset: 20.0,
        left_motor_level: 0,
        right_motor_level: 0,
        reset_position: vector![400.0, 300.0],
        reset_heading: -FRAC_PI_2,
    }
}

pub(crate) fn create(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    data: &VehicleData,
) -> RigidBodyHandle {
    let rigid_body = RigidBodyBuilder::dynamic()
        .translation(data.reset_position)
        .rotation(data.reset_heading)
        .linear_damping(data.air_resistance)
        .angular_damping(data.air_resistance)
        .ccd_enabled(true)
        .build();
    let body_handle = bodies.insert(rigid_body);
    let collider = ColliderBuilder::ball(data.radius)
        .density(data.density)
        .restitution(data.restitution)
        .build();
    colliders.insert_with_parent(collider, body_handle, bodies);
    body_handle
}

/// The forces applied during the most recent step, with their world-frame
/// application points. Read-only; a presentation layer may poll this for
/// debug vector overlays.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ForceBreakdown {
    pub left: Vector2<f64>,
    pub right: Vector2<f64>,
    pub wind: Vector2<f64>,
    pub left_point: Vector2<f64>,
    pub right_point: Vector2<f64>,
    pub wind_point: Vector2<f64>,
}

impl ForceBreakdown {
    pub fn net(&self) -> Vector2<f64> {
        self.left + self.right + self.wind
    }
}

impl Default for ForceBreakdown {
    fn default() -> Self {
        ForceBreakdown {
            left: vector![0.0, 0.0],
            right: vector![0.0, 0.0],
            wind: vector![0.0, 0.0],
            left_point: vector![0.0, 0.0],
            right_point: vector![0.0, 0.0],
            wind_point: vector![0.0, 0.0],
        }
    }
}

/// Recompute and apply thruster and wind forces for this tick. Forces are
/// applied at offset points, so asymmetric thrust induces torque without any
/// separate torque computation.
pub(crate) fn apply_forces(sim: &mut Simulation) -> ForceBreakdown {
    let data = sim.vehicle_data.clone();
    let wind = sim.wind;
    let body = sim.bodies.get_mut(sim.vehicle).unwrap();
    let angle = body.rotation().angle();
    let center = body.position().translation.vector;

    let thrust_angle = angle + data.mounting_angle;
    let thrust_dir = vector![thrust_angle.cos(), thrust_angle.sin()];
    let left = thrust_dir * (data.left_motor_level as f64 * data.force_scale);
    let right = thrust_dir * (data.right_motor_level as f64 * data.force_scale);

    let offset = |a: f64, r: f64| center + r * vector![a.cos(), a.sin()];
    let forces = ForceBreakdown {
        left,
        right,
        wind: wind.force(),
        left_point: offset(angle + FRAC_PI_2, data.thruster_offset),
        right_point: offset(angle - FRAC_PI_2, data.thruster_offset),
        wind_point: offset(wind.application_angle, data.radius),
    };

    body.reset_forces(false);
    body.reset_torques(false);
    body.add_force_at_point(forces.left, Point2::from(forces.left_point), true);
    body.add_force_at_point(forces.right, Point2::from(forces.right_point), true);
    body.add_force_at_point(forces.wind, Point2::from(forces.wind_point), true);

    forces
}

pub struct VehicleAccessor<'a> {
    pub(crate) simulation: &'a Simulation,
}

impl<'a> VehicleAccessor<'a> {
    pub fn body(&self) -> &'a RigidBody {
        self.simulation.bodies.get(self.simulation.vehicle).unwrap()
    }

    pub fn position(&self) -> Vector2<f64> {
        self.body().position().translation.vector
    }

    pub fn velocity(&self) -> Vector2<f64> {
        *self.body().linvel()
    }

    pub fn heading(&self) -> f64 {
        self.body().rotation().angle().rem_euclid(TAU)
    }

    pub fn angular_velocity(&self) -> f64 {
        self.body().angvel()
    }

    pub fn mass(&self) -> f64 {
        self.body().mass()
    }

    pub fn data(&self) -> &'a VehicleData {
        &self.simulation.vehicle_data
    }

    pub fn motor_levels(&self) -> (i32, i32) {
        (self.data().left_motor_level, self.data().right_motor_level)
    }
}

pub struct VehicleAccessorMut<'a> {
    pub(crate) simulation: &'a mut Simulation,
}

impl<'a: 'b, 'b> VehicleAccessorMut<'a> {
    pub fn readonly(&self) -> VehicleAccessor {
        VehicleAccessor {
            simulation: self.simulation,
        }
    }

    pub fn body(&'b mut self) -> &'b mut RigidBody {
        self.simulation
            .bodies
            .get_mut(self.simulation.vehicle)
            .unwrap()
    }

    pub fn data(&self) -> &VehicleData {
        &self.simulation.vehicle_data
    }

    pub fn data_mut(&mut self) -> &mut VehicleData {
        &mut self.simulation.vehicle_data
    }

    pub fn set_motor_levels(&mut self, left: i32, right: i32) {
        let clamp = |level: i32, side: &str| {
            if !(-MOTOR_LEVEL_LIMIT..=MOTOR_LEVEL_LIMIT).contains(&level) {
                log::warn!("{side} motor level {level} out of range, clamping");
            }
            level.clamp(-MOTOR_LEVEL_LIMIT, MOTOR_LEVEL_LIMIT)
        };
        self.data_mut().left_motor_level = clamp(left, "left");
        self.data_mut().right_motor_level = clamp(right, "right");
    }

    pub fn set_air_resistance(&mut self, value: f64) {
        self.data_mut().air_resistance = value;
        let body = self.body();
        body.set_linear_damping(value);
        body.set_angular_damping(value);
    }
}
