//! User control surface - quit and reset over a channel
//!
//! The loop drains this channel once per tick; events are applied at tick
//! boundaries only. Feeds: stdin lines (`r` resets, `q` quits) and ctrl-c.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Quit,
    Reset,
}

pub struct Controls {
    rx: mpsc::Receiver<ControlEvent>,
}

impl Controls {
    /// Wrap an existing channel (tests drive this directly)
    pub fn from_channel(rx: mpsc::Receiver<ControlEvent>) -> Self {
        Self { rx }
    }

    /// Spawn the stdin reader and ctrl-c listener feeding one channel
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(16);

        let stdin_tx = tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let event = match line.trim() {
                    "r" | "R" => Some(ControlEvent::Reset),
                    "q" | "Q" => Some(ControlEvent::Quit),
                    _ => None,
                };
                if let Some(event) = event {
                    debug!(?event, "control input");
                    if stdin_tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        });

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received ctrl-c, quitting");
                let _ = tx.send(ControlEvent::Quit).await;
            }
        });

        Self { rx }
    }

    /// Drain all pending events without blocking
    pub fn poll(&mut self) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn poll_drains_pending_events_in_order() {
        let (tx, rx) = mpsc::channel(16);
        let mut controls = Controls::from_channel(rx);
        tx.send(ControlEvent::Reset).await.unwrap();
        tx.send(ControlEvent::Quit).await.unwrap();

        assert_eq!(
            controls.poll(),
            vec![ControlEvent::Reset, ControlEvent::Quit]
        );
        assert!(controls.poll().is_empty());
    }
}
