pub mod collision;
pub mod debug;
pub mod rng;
pub mod simulation;
pub mod snapshot;
pub mod telemetry;
pub mod vehicle;
pub mod wind;
