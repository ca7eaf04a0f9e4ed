//! Typed messages carried over the remote link.
//!
//! Transport is out of scope: these are the payloads a host hands to
//! whatever socket it owns. Both directions are plain serde types.

use serde::{Deserialize, Serialize};

use crate::enemies::WavePlacement;

/// Periodic report of local counters, sent outbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Player light pool
    pub light: u32,
    /// Player dark pool
    pub dark: u32,
    /// Live enemy count
    pub enemy_count: usize,
}

/// Authoritative difficulty and wave updates, received inbound.
///
/// Directives map onto the same vocabulary the orchestrator already
/// consumes; the link does no game logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Change the spawn cadence top-up target.
    SetSpawnTarget(usize),
    /// Spawn a choreographed wave.
    TriggerWave {
        count: u32,
        placement: WavePlacement,
    },
    /// Tune the player's invulnerability window, in seconds.
    SetInvulnWindow(f32),
}
