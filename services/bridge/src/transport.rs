use aerostat_proto::{CommandMsg, TelemetryMsg};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Maintain a WebSocket connection to the trainer, streaming telemetry out
/// and forwarding inbound commands. Reconnects forever with capped backoff.
/// Returns when the telemetry channel closes.
pub async fn run(
    endpoint: String,
    mut telemetry: mpsc::Receiver<TelemetryMsg>,
    commands: watch::Sender<CommandMsg>,
) {
    let mut backoff = INITIAL_BACKOFF;
    loop {
        match connect_async(endpoint.as_str()).await {
            Ok((stream, _)) => {
                log::info!("connected to {endpoint}");
                backoff = INITIAL_BACKOFF;
                // Drop samples that accumulated while disconnected.
                while telemetry.try_recv().is_ok() {}
                let (mut sink, mut source) = stream.split();
                loop {
                    tokio::select! {
                        msg = telemetry.recv() => match msg {
                            Some(msg) => {
                                let json = match serde_json::to_string(&msg) {
                                    Ok(json) => json,
                                    Err(e) => {
                                        log::error!("failed to serialize telemetry: {e}");
                                        continue;
                                    }
                                };
                                if let Err(e) = sink.send(Message::Text(json)).await {
                                    log::warn!("send failed: {e}");
                                    break;
                                }
                            }
                            None => return,
                        },
                        msg = source.next() => match msg {
                            Some(Ok(Message::Text(text))) => {
                                match serde_json::from_str::<CommandMsg>(&text) {
                                    Ok(cmd) => {
                                        let _ = commands.send(cmd);
                                    }
                                    Err(e) => log::warn!("malformed command {text:?}: {e}"),
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                log::warn!("connection to {endpoint} closed");
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(e)) => {
                                log::warn!("receive failed: {e}");
                                break;
                            }
                        },
                    }
                }
            }
            Err(e) => {
                log::warn!("connection to {endpoint} failed: {e}");
            }
        }
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}
