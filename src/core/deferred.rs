//! Deferred event delivery - the scheduled-callback primitive.
//!
//! A [`Deferred`] entity carries an event and a one-shot timer; when the
//! timer finishes the event is sent and the entity despawned. This is
//! how the core expresses "fire X after N seconds" without blocking or
//! calling back into the presentation layer directly (roll recovery,
//! reposition phases). Delivery order between independent timers is
//! only "no earlier than the configured delay".

use bevy::prelude::*;

/// A pending event, delivered when the timer finishes.
#[derive(Component)]
pub struct Deferred<E: Event + Clone + Send + Sync + 'static> {
    timer: Timer,
    event: E,
}

impl<E: Event + Clone + Send + Sync + 'static> Deferred<E> {
    pub fn new(delay_secs: f32, event: E) -> Self {
        Self {
            timer: Timer::from_seconds(delay_secs, TimerMode::Once),
            event,
        }
    }
}

/// Tick pending timers and deliver finished events.
pub fn fire_deferred<E: Event + Clone + Send + Sync + 'static>(
    mut commands: Commands,
    time: Res<Time>,
    mut writer: EventWriter<E>,
    mut query: Query<(Entity, &mut Deferred<E>)>,
) {
    for (entity, mut deferred) in query.iter_mut() {
        deferred.timer.tick(time.delta());
        if deferred.timer.finished() {
            writer.send(deferred.event.clone());
            commands.entity(entity).despawn();
        }
    }
}

/// App extension for registering a deferrable event type.
pub trait DeferredAppExt {
    fn add_deferred_event<E: Event + Clone + Send + Sync + 'static>(&mut self) -> &mut Self;
}

impl DeferredAppExt for App {
    fn add_deferred_event<E: Event + Clone + Send + Sync + 'static>(&mut self) -> &mut Self {
        self.add_event::<E>()
            .add_systems(Update, fire_deferred::<E>)
    }
}
