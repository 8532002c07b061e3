use crate::rng::{new_rng, SeededRng};
use crate::snapshot::{self, Snapshot};
use crate::telemetry::{self, Accelerometer, Telemetry, VELOCITY_WINDOW};
use crate::vehicle::{self, ForceBreakdown, VehicleAccessor, VehicleAccessorMut, VehicleData};
use crate::wind::WindState;
use crate::debug;
use nalgebra::{vector, Point2};
use rapier2d_f64::prelude::*;

pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 600.0;
pub const WALL_MARGIN: f64 = 100.0;
pub const PHYSICS_TICK_LENGTH: f64 = 1.0 / 60.0;

pub struct Simulation {
    pub(crate) vehicle: RigidBodyHandle,
    pub(crate) vehicle_data: VehicleData,
    pub(crate) wind: WindState,
    pub(crate) forces: ForceBreakdown,
    pub(crate) accelerometer: Accelerometer,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    pub(crate) has_walls: bool,
    tick: u32,
    seed: u32,
    rng: SeededRng,
}

impl Simulation {
    pub fn new(seed: u32, data: VehicleData) -> Box<Simulation> {
        log::info!("seed {seed}");
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut rng = new_rng(seed);
        let vehicle = vehicle::create(&mut bodies, &mut colliders, &data);
        Box::new(Simulation {
            vehicle,
            vehicle_data: data,
            wind: WindState::calm(&mut rng),
            forces: ForceBreakdown::default(),
            accelerometer: Accelerometer::new(VELOCITY_WINDOW),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            integration_parameters: IntegrationParameters {
                dt: PHYSICS_TICK_LENGTH,
                max_ccd_substeps: 2,
                ..Default::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            has_walls: false,
            tick: 0,
            seed,
            rng,
        })
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.tick as f64 * PHYSICS_TICK_LENGTH
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn vehicle(&self) -> VehicleAccessor {
        VehicleAccessor { simulation: self }
    }

    pub fn vehicle_mut(&mut self) -> VehicleAccessorMut {
        VehicleAccessorMut { simulation: self }
    }

    pub fn step(&mut self) {
        self.forces = vehicle::apply_forces(self);

        let gravity = vector![0.0, 0.0];
        let physics_hooks = ();
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &(),
        );

        let velocity = self.vehicle().velocity();
        self.accelerometer.push(velocity);
        self.tick += 1;
    }

    pub fn telemetry(&self) -> Telemetry {
        telemetry::read(self)
    }

    pub fn forces(&self) -> ForceBreakdown {
        self.forces
    }

    pub fn wind(&self) -> WindState {
        self.wind
    }

    pub fn set_wind(&mut self, wind: WindState) {
        self.wind = wind;
    }

    pub fn set_wind_speed(&mut self, speed: f64) {
        self.wind.speed = speed;
    }

    pub fn has_walls(&self) -> bool {
        self.has_walls
    }

    pub fn close_to_wall(&self) -> Option<bool> {
        if !self.has_walls {
            return None;
        }
        let p = self.vehicle().position();
        Some(
            p.x < WALL_MARGIN
                || p.x > ARENA_WIDTH - WALL_MARGIN
                || p.y < WALL_MARGIN
                || p.y > ARENA_HEIGHT - WALL_MARGIN,
        )
    }

    /// Reinitialize the vehicle to its canonical pose and re-randomize wind.
    pub fn reset(&mut self) {
        let position = self.vehicle_data.reset_position;
        let heading = self.vehicle_data.reset_heading;
        {
            let body = self.bodies.get_mut(self.vehicle).unwrap();
            body.set_position(Isometry::new(position, heading), true);
            body.set_linvel(vector![0.0, 0.0], true);
            body.set_angvel(0.0, true);
            body.reset_forces(true);
            body.reset_torques(true);
        }
        self.wind = WindState::randomized(&mut self.rng);
        self.accelerometer.clear();
        self.forces = ForceBreakdown::default();
        log::info!("vehicle reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        let vehicle = self.vehicle();
        let velocity = vehicle.velocity();
        let speed = velocity.magnitude();
        let acceleration = self.accelerometer.estimate(PHYSICS_TICK_LENGTH);
        let angular_velocity = vehicle.angular_velocity();
        Snapshot {
            tick: self.tick,
            time: self.time(),
            position: Point2::from(vehicle.position()),
            velocity,
            heading: vehicle.heading(),
            angular_velocity,
            acceleration,
            speed,
            reward: snapshot::reward(speed, acceleration.magnitude(), angular_velocity),
            left_motor_level: self.vehicle_data.left_motor_level,
            right_motor_level: self.vehicle_data.right_motor_level,
            close_to_wall: self.close_to_wall(),
            debug_lines: debug::emit_vehicle(self),
        }
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        let vehicle = self.vehicle();
        s.write_i64(fixedpoint(vehicle.position().x));
        s.write_i64(fixedpoint(vehicle.position().y));
        s.write_i64(fixedpoint(vehicle.heading()));
        s.write_i64(fixedpoint(vehicle.velocity().x));
        s.write_i64(fixedpoint(vehicle.velocity().y));
        s.write_i64(fixedpoint(vehicle.angular_velocity()));
        s.finish()
    }
}
