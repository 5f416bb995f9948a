use anyhow::{Context, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use clip_core::pasteboard::{AlertActivation, PasteboardSignal, RefreshSignal};

use super::SignalTargets;

/// Installs the handlers and forwards every delivery until a receiver is
/// gone.
pub fn spawn_signal_listener(targets: SignalTargets) -> Result<JoinHandle<()>> {
    let SignalTargets {
        gate,
        refresh,
        activate,
    } = targets;

    let mut changed = signal(SignalKind::user_defined1()).context("install SIGUSR1 handler")?;
    let mut ignore_next =
        signal(SignalKind::user_defined2()).context("install SIGUSR2 handler")?;
    let mut hangup = signal(SignalKind::hangup()).context("install SIGHUP handler")?;
    let mut alarm = signal(SignalKind::alarm()).context("install SIGALRM handler")?;

    info!(
        "Signal listener installed (USR1=changed, USR2=ignore-next, HUP=refresh, ALRM=activate-alert)"
    );

    Ok(tokio::spawn(async move {
        loop {
            let sent = tokio::select! {
                Some(()) = changed.recv() => {
                    debug!("SIGUSR1 received");
                    gate.send(PasteboardSignal::Changed).await.is_ok()
                }
                Some(()) = ignore_next.recv() => {
                    debug!("SIGUSR2 received");
                    gate.send(PasteboardSignal::IgnoreNextChange).await.is_ok()
                }
                Some(()) = hangup.recv() => {
                    debug!("SIGHUP received");
                    refresh.send(RefreshSignal).await.is_ok()
                }
                Some(()) = alarm.recv() => {
                    debug!("SIGALRM received");
                    activate.send(AlertActivation).await.is_ok()
                }
                else => false,
            };

            if !sent {
                warn!("Signal consumer gone, stopping signal listener");
                break;
            }
        }
    }))
}
