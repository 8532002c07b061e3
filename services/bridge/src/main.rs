use aerostat_bridge_service::{stepper, transport};
use aerostat_proto::CommandMsg;
use aerostat_simulator::{collision, simulation::Simulation, vehicle};
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() {
    env_logger::init();

    let endpoint =
        std::env::var("AEROSTAT_ENDPOINT").unwrap_or_else(|_| "ws://localhost:5005".to_string());

    let mut seed: u32 = 0;
    match std::env::var("AEROSTAT_SEED") {
        Ok(s) => {
            match s.parse::<u32>() {
                Ok(n) => {
                    seed = n;
                }
                Err(_e) => {}
            };
        }
        Err(_e) => {}
    };

    let walls = std::env::var("AEROSTAT_WALLS").is_ok();

    log::info!("Starting aerostat_bridge_service");
    log::info!("Using endpoint {endpoint}");

    let mut sim = Simulation::new(seed, vehicle::blimp());
    if walls {
        collision::add_walls(&mut sim);
    }

    let (telemetry_tx, telemetry_rx) = mpsc::channel(16);
    let (command_tx, command_rx) = watch::channel(CommandMsg::default());

    tokio::spawn(transport::run(endpoint, telemetry_rx, command_tx));
    stepper::run(sim, command_rx, telemetry_tx).await;
}
