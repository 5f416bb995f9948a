//! Daemon run loop: spawn pipelines, start the monitor, wait for ctrl-c.

use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, info_span, warn, Instrument};

use clip_app::{
    AlertActionHandler, InboundSyncPipeline, OutboundSyncPipeline, PasteboardMonitor, SyncTimings,
};
use clip_core::pasteboard::AlertActivation;
use clip_core::SyncConfig;
use clip_platform::PasteboardWatcher;

use super::config::load_config;
use super::wiring::{wire_dependencies, WiredDaemon};

/// Pasteboard signals queue here while the gate task is busy.
const GATE_CHANNEL_CAPACITY: usize = 64;
const REFRESH_CHANNEL_CAPACITY: usize = 8;
const ALERT_CHANNEL_CAPACITY: usize = 8;

/// Runs until ctrl-c, then tears everything down.
pub async fn run_daemon(config_path: PathBuf) -> anyhow::Result<()> {
    let config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        warn!(
            path = %config_path.display(),
            "Config file not found, starting with defaults"
        );
        SyncConfig::default()
    };

    let (actions_tx, actions_rx) = mpsc::channel(ALERT_CHANNEL_CAPACITY);
    let WiredDaemon { deps, alerts } =
        wire_dependencies(&config_path, &config, actions_tx).context("wire dependencies")?;
    let timings = SyncTimings::default();

    let (outbound, outbound_join) = OutboundSyncPipeline::spawn(&deps, timings);
    let (inbound, inbound_join) = InboundSyncPipeline::spawn(&deps, timings);

    let (gate_tx, gate_rx) = mpsc::channel(GATE_CHANNEL_CAPACITY);
    let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_CHANNEL_CAPACITY);

    let (activate_tx, mut activate_rx) =
        mpsc::channel::<AlertActivation>(ALERT_CHANNEL_CAPACITY);

    let action_task =
        AlertActionHandler::new(deps.pasteboard.clone(), gate_tx.clone()).spawn(actions_rx);
    let activation_task = tokio::spawn(
        async move {
            while activate_rx.recv().await.is_some() {
                alerts.activate_latest().await;
            }
        }
        .instrument(info_span!("alert.activation")),
    );

    let monitor = PasteboardMonitor::new(deps, outbound.clone(), inbound.clone());
    let tasks = monitor
        .start(gate_rx, refresh_rx)
        .instrument(info_span!("daemon.start"))
        .await
        .context("pasteboard monitor already started")?;

    #[cfg(unix)]
    let signal_task =
        clip_platform::signals::spawn_signal_listener(clip_platform::signals::SignalTargets {
            gate: gate_tx.clone(),
            refresh: refresh_tx,
            activate: activate_tx,
        })
        .context("install signal handlers")?;
    #[cfg(not(unix))]
    drop((refresh_tx, activate_tx));

    // Without a desktop session the clipboard watch is unavailable; the
    // signal channel still works.
    let pasteboard_watcher = match PasteboardWatcher::start(gate_tx) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            warn!(error = %err, "Pasteboard watcher unavailable, relying on signals");
            None
        }
    };

    info!(
        config = %config_path.display(),
        outbound_monitoring = tasks.outbound_monitoring,
        inbound_monitoring = tasks.inbound_monitoring,
        "clip-sync running"
    );

    tokio::signal::ctrl_c()
        .await
        .context("wait for shutdown signal")?;
    info!("Shutdown requested");

    if let Some(watcher) = pasteboard_watcher {
        watcher.stop().await;
    }
    #[cfg(unix)]
    signal_task.abort();

    outbound.shutdown().await;
    inbound.shutdown().await;
    tasks.gate.abort();
    tasks.refresh.abort();
    activation_task.abort();
    action_task.abort();

    for (name, join) in [("outbound", outbound_join), ("inbound", inbound_join)] {
        if let Err(err) = join.await {
            warn!(pipeline = name, error = %err, "Pipeline task ended abnormally");
        }
    }

    info!("clip-sync stopped");
    Ok(())
}
