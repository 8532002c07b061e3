use crate::command;
use aerostat_proto::{CommandMsg, TelemetryMsg, Vec2};
use aerostat_simulator::simulation::{Simulation, PHYSICS_TICK_LENGTH};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

pub fn telemetry_msg(sim: &Simulation) -> TelemetryMsg {
    let telemetry = sim.telemetry();
    TelemetryMsg {
        acceleration: Vec2::new(telemetry.acceleration.x, telemetry.acceleration.y),
        angular_velocity: telemetry.angular_velocity,
        linear_velocity: Vec2::new(telemetry.linear_velocity.x, telemetry.linear_velocity.y),
        close_to_wall: telemetry.close_to_wall,
    }
}

/// Drive the simulation at a fixed wall-clock rate. Commands are applied at
/// step boundaries; only the most recent command is seen. Telemetry is sent
/// best-effort and dropped when the transport side falls behind.
pub async fn run(
    mut sim: Box<Simulation>,
    mut commands: watch::Receiver<CommandMsg>,
    telemetry: mpsc::Sender<TelemetryMsg>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(PHYSICS_TICK_LENGTH));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if commands.has_changed().unwrap_or(false) {
            let cmd = commands.borrow_and_update().clone();
            command::apply(&mut sim, &cmd);
        }
        sim.step();
        if telemetry.try_send(telemetry_msg(&sim)).is_err() {
            log::debug!("telemetry channel full, dropping sample");
        }
    }
}
