//! Net plugin - periodic status reports out, difficulty directives in.

use bevy::prelude::*;

use super::link::RemoteLink;
use super::messages::{Directive, StatusReport};
use crate::combat::{CombatConfig, Resolve};
use crate::enemies::{AiState, Darkling, SpawnCadence, SpawnWave, WaveSpawnPlan};
use crate::core::GameState;
use crate::player::Player;

/// Seconds between outbound status reports.
const REPORT_INTERVAL_SECS: f32 = 2.0;

/// Bounds for the remotely tuned invulnerability window.
const INVULN_WINDOW_RANGE: (f32, f32) = (1.0, 6.0);

#[derive(Resource)]
struct ReportTimer(Timer);

impl Default for ReportTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(REPORT_INTERVAL_SECS, TimerMode::Repeating))
    }
}

/// Net plugin - the optional remote service integration.
///
/// The link resource is injected by the host (or a test); without it
/// every system here is a no-op and local play is unaffected.
pub struct NetPlugin;

impl Plugin for NetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ReportTimer>().add_systems(
            Update,
            (report_status, apply_directives).run_if(in_state(GameState::InGame)),
        );
    }
}

/// Periodically report local counters over the link.
fn report_status(
    time: Res<Time>,
    mut timer: ResMut<ReportTimer>,
    link: Option<ResMut<RemoteLink>>,
    player_query: Query<&Resolve, With<Player>>,
    darklings: Query<&AiState, With<Darkling>>,
) {
    let Some(mut link) = link else {
        return;
    };
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let Ok(resolve) = player_query.get_single() else {
        warn!("status report due but no player resolve, skipping");
        return;
    };
    let enemy_count = darklings
        .iter()
        .filter(|state| **state != AiState::Dying)
        .count();

    link.send_report(StatusReport {
        light: resolve.light(),
        dark: resolve.dark(),
        enemy_count,
    });
}

/// Map inbound directives onto the orchestrator's own vocabulary.
fn apply_directives(
    link: Option<Res<RemoteLink>>,
    mut cadence: ResMut<SpawnCadence>,
    mut config: ResMut<CombatConfig>,
    mut waves: EventWriter<SpawnWave>,
) {
    let Some(link) = link else {
        return;
    };

    for directive in link.drain_directives() {
        match directive {
            Directive::SetSpawnTarget(target) => {
                info!("remote directive: spawn target {}", target);
                cadence.target = target;
            }
            Directive::TriggerWave { count, placement } => {
                info!("remote directive: wave of {}", count);
                waves.send(SpawnWave {
                    plan: WaveSpawnPlan { count, placement },
                });
            }
            Directive::SetInvulnWindow(secs) => {
                config.invuln_window_secs =
                    secs.clamp(INVULN_WINDOW_RANGE.0, INVULN_WINDOW_RANGE.1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::WavePlacement;

    #[test]
    fn directives_round_trip_through_ron() {
        let directive = Directive::TriggerWave {
            count: 8,
            placement: WavePlacement::StaggeredRows,
        };
        let text = ron::to_string(&directive).expect("serialize");
        let back: Directive = ron::from_str(&text).expect("deserialize");
        assert_eq!(back, directive);
    }

    #[test]
    fn dropped_endpoint_does_not_poison_the_link() {
        let (mut link, endpoint) = RemoteLink::pair();
        drop(endpoint);
        // Both sends are silent no-ops after the peer hangs up.
        link.send_report(StatusReport {
            light: 57,
            dark: 43,
            enemy_count: 0,
        });
        link.send_report(StatusReport {
            light: 10,
            dark: 43,
            enemy_count: 2,
        });
        assert!(link.drain_directives().is_empty());
    }
}
