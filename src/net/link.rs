//! The in-process endpoints of the remote service channel.

use bevy::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use super::messages::{Directive, StatusReport};

/// The game's half of the channel. Optional: when the resource is
/// absent the simulation runs exactly the same, just unreported.
#[derive(Resource)]
pub struct RemoteLink {
    outbound: Sender<StatusReport>,
    inbound: Mutex<Receiver<Directive>>,
    /// Set after the first failed send so a dead peer warns once.
    send_failed: bool,
}

/// The host's half - wire it to a socket, or drive it from a test.
pub struct RemoteEndpoint {
    pub reports: Receiver<StatusReport>,
    pub directives: Sender<Directive>,
}

impl RemoteLink {
    /// Create a connected link/endpoint pair.
    pub fn pair() -> (Self, RemoteEndpoint) {
        let (report_tx, report_rx) = channel();
        let (directive_tx, directive_rx) = channel();
        (
            Self {
                outbound: report_tx,
                inbound: Mutex::new(directive_rx),
                send_failed: false,
            },
            RemoteEndpoint {
                reports: report_rx,
                directives: directive_tx,
            },
        )
    }

    /// Send a report; a hung-up peer downgrades to a warn-once no-op.
    pub fn send_report(&mut self, report: StatusReport) {
        if self.outbound.send(report).is_err() && !self.send_failed {
            self.send_failed = true;
            warn!("remote link peer is gone; reports are now dropped");
        }
    }

    /// Drain all pending directives.
    pub fn drain_directives(&self) -> Vec<Directive> {
        match self.inbound.lock() {
            Ok(inbound) => inbound.try_iter().collect(),
            Err(_) => Vec::new(),
        }
    }
}
