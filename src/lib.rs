//! Nocturne - a 2D action platformer with a light/dark transform mechanic.
//!
//! This crate is the game's simulation core: character actions, enemy
//! AI, combat resolution, and the dual-pool resource model, driven by a
//! cooperative single-threaded loop. Rendering, audio, and animation
//! playback are external collaborators that subscribe to the core's
//! signals and answer started actions with completions.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, deferred signals
//! - **Input**: Semantic command routing scoped by active context
//! - **Player**: The actor state machine and bounded attack queue
//! - **Combat**: Dual-pool resolve model, strikes, damage, pickups
//! - **Enemies**: Darkling spawning, waves, and AI
//! - **Net**: Optional remote service channel
//! - **UI**: HUD display adapters

pub mod combat;
pub mod core;
pub mod enemies;
pub mod input;
pub mod net;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct NocturnePlugin;

impl Plugin for NocturnePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Command routing
            .add_plugins(input::InputPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Remote service integration
            .add_plugins(net::NetPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatConfig, Invulnerability, Resolve};
    use crate::core::{
        ActionCompleted, ActionKind, ActorDepleted, AttackId, DamageEvent, DarklingDefeated,
        Form, GameState, PlayState, ResourceDepleted, TransformRequest,
    };
    use crate::enemies::{
        spawn_darkling, AiState, AiTickTimer, Darkling, DarklingRegistry, SpawnCadence,
    };
    use crate::input::Command;
    use crate::player::{ActorState, AttackQueue, Kinematics, MoveConfig, Player};

    /// Headless app with the simulation core and no presentation.
    ///
    /// Jumps straight into gameplay: states are forced past the menu so
    /// systems gated on InGame run from the first update.
    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(bevy::state::app::StatesPlugin)
            .add_plugins(core::CorePlugin)
            .add_plugins(input::InputPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin);
        app.insert_state(GameState::InGame);
        // Flush the state transition so OnEnter(InGame) spawns run.
        app.update();
        app
    }

    fn player_entity(app: &mut App) -> Entity {
        let mut query = app.world_mut().query_filtered::<Entity, With<Player>>();
        query.single(app.world())
    }

    fn send_command(app: &mut App, command: Command) {
        app.world_mut().send_event(command);
        app.update();
    }

    fn complete(app: &mut App, actor: Entity, action: ActionKind) {
        app.world_mut().send_event(ActionCompleted { actor, action });
        app.update();
    }

    fn drain<E: Event + Clone>(app: &mut App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }

    #[test]
    fn player_spawns_with_full_pools_in_light_form() {
        let mut app = headless_app();
        let player = player_entity(&mut app);
        let resolve = app.world().get::<Resolve>(player).unwrap();
        assert_eq!(resolve.light(), Resolve::LIGHT_MAX);
        assert_eq!(resolve.dark(), Resolve::DARK_MAX);
        assert_eq!(resolve.form(), Form::Light);
    }

    #[test]
    fn overkill_hit_flips_form_and_fires_each_signal_once() {
        // Scenario 1: 60 damage on full pools.
        let mut app = headless_app();
        let player = player_entity(&mut app);

        app.world_mut().send_event(DamageEvent {
            target: player,
            source: player,
            amount: 60,
        });
        app.update();

        let resolve = app.world().get::<Resolve>(player).unwrap();
        assert_eq!(resolve.light(), 0);
        assert_eq!(resolve.dark(), 40);

        assert_eq!(drain::<ResourceDepleted>(&mut app).len(), 1);
        let requests = drain::<TransformRequest>(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].form, Form::Dark);

        // The wind-up has started; completing both phases lands in dark form.
        complete(&mut app, player, ActionKind::TransformWindUp);
        complete(&mut app, player, ActionKind::TransformResolve);
        let resolve = app.world().get::<Resolve>(player).unwrap();
        assert_eq!(resolve.form(), Form::Dark);
        let state = app.world().get::<ActorState>(player).unwrap();
        assert!(!state.transforming);
    }

    #[test]
    fn invulnerability_window_swallows_the_second_hit() {
        let mut app = headless_app();
        let player = player_entity(&mut app);

        for _ in 0..2 {
            app.world_mut().send_event(DamageEvent {
                target: player,
                source: player,
                amount: 10,
            });
            app.update();
        }

        let resolve = app.world().get::<Resolve>(player).unwrap();
        assert_eq!(resolve.light(), Resolve::LIGHT_MAX - 10);
        assert!(app.world().get::<Invulnerability>(player).unwrap().active());
    }

    #[test]
    fn attack_commands_queue_and_advance_on_completion() {
        let mut app = headless_app();
        let player = player_entity(&mut app);

        // Five rapid presses: one starts, three queue, the fifth drops.
        for id in [
            AttackId::Attack1,
            AttackId::Attack2,
            AttackId::Attack3,
            AttackId::Attack1,
            AttackId::Attack2,
        ] {
            send_command(&mut app, Command::Attack(id));
        }

        let queue = app.world().get::<AttackQueue>(player).unwrap();
        assert_eq!(queue.len(), AttackQueue::CAPACITY);
        assert!(app.world().get::<ActorState>(player).unwrap().attacking);

        // Completions drain the queue in order, then drop `attacking`.
        for id in [AttackId::Attack1, AttackId::Attack2, AttackId::Attack3] {
            complete(&mut app, player, ActionKind::Attack(id));
        }
        assert!(app.world().get::<AttackQueue>(player).unwrap().is_empty());
        assert!(app.world().get::<ActorState>(player).unwrap().attacking);
        complete(&mut app, player, ActionKind::Attack(AttackId::Attack1));
        assert!(!app.world().get::<ActorState>(player).unwrap().attacking);
    }

    #[test]
    fn roll_drops_attack_transform_and_dash_until_recover() {
        // Scenario 5.
        let mut app = headless_app();
        let player = player_entity(&mut app);

        send_command(&mut app, Command::Roll);
        assert!(app.world().get::<ActorState>(player).unwrap().rolling);

        send_command(&mut app, Command::Attack(AttackId::Attack1));
        send_command(&mut app, Command::Transform);
        send_command(&mut app, Command::Dash);

        let state = app.world().get::<ActorState>(player).unwrap();
        assert!(!state.attacking);
        assert!(!state.transforming);
        assert!(!state.dashing);
        assert!(app.world().get::<AttackQueue>(player).unwrap().is_empty());

        send_command(&mut app, Command::Recover);
        assert!(!app.world().get::<ActorState>(player).unwrap().rolling);
        send_command(&mut app, Command::Attack(AttackId::Attack1));
        assert!(app.world().get::<ActorState>(player).unwrap().attacking);
    }

    #[test]
    fn transform_to_current_form_is_a_no_op() {
        let mut app = headless_app();
        let player = player_entity(&mut app);

        app.world_mut().send_event(TransformRequest {
            actor: player,
            form: Form::Light,
        });
        app.update();

        let state = app.world().get::<ActorState>(player).unwrap();
        assert!(!state.transforming);
    }

    #[test]
    fn strikes_defeat_a_darkling_after_ten_first_attacks() {
        // Scenario 2, driven through the queue: 20 damage per Attack1.
        let mut app = headless_app();
        let player = player_entity(&mut app);

        let enemy = {
            let registry = DarklingRegistry::default();
            let mut commands_queue = bevy::ecs::world::CommandQueue::default();
            let mut commands = Commands::new(&mut commands_queue, app.world());
            let enemy = spawn_darkling(&mut commands, &registry, Vec2::new(30.0, 0.0), None);
            commands_queue.apply(app.world_mut());
            enemy
        };

        // Seven hits leave it standing at 60.
        for _ in 0..7 {
            send_command(&mut app, Command::Attack(AttackId::Attack1));
            complete(&mut app, player, ActionKind::Attack(AttackId::Attack1));
        }
        drain::<DarklingDefeated>(&mut app);
        assert_eq!(app.world().get::<Darkling>(enemy).unwrap().hp(), 60);

        // Three more land exactly on zero; defeat fires exactly once.
        for _ in 0..3 {
            send_command(&mut app, Command::Attack(AttackId::Attack1));
            complete(&mut app, player, ActionKind::Attack(AttackId::Attack1));
        }
        assert_eq!(app.world().get::<Darkling>(enemy).unwrap().hp(), 0);
        assert_eq!(drain::<DarklingDefeated>(&mut app).len(), 1);
        // One extra frame lets the removal sequence pick the event up.
        app.update();
        assert_eq!(*app.world().get::<AiState>(enemy).unwrap(), AiState::Dying);
    }

    #[test]
    fn cadence_tops_up_to_target_and_no_further() {
        // Scenario 3: two alive, target five.
        let mut app = headless_app();

        {
            let registry = DarklingRegistry::default();
            let mut commands_queue = bevy::ecs::world::CommandQueue::default();
            let mut commands = Commands::new(&mut commands_queue, app.world());
            spawn_darkling(&mut commands, &registry, Vec2::new(30.0, 0.0), None);
            spawn_darkling(&mut commands, &registry, Vec2::new(-30.0, 0.0), None);
            commands_queue.apply(app.world_mut());
        }

        let count = |app: &mut App| {
            let mut query = app.world_mut().query::<&Darkling>();
            query.iter(app.world()).count()
        };
        assert_eq!(count(&mut app), 2);

        // Force the cadence to fire on the next frame.
        let expire = |app: &mut App| {
            let mut cadence = app.world_mut().resource_mut::<SpawnCadence>();
            let remaining = cadence.timer.duration() - cadence.timer.elapsed();
            cadence.timer.tick(remaining - std::time::Duration::from_nanos(1));
            app.update();
        };
        expire(&mut app);
        assert_eq!(count(&mut app), 5);

        // A second cadence at target spawns nothing.
        expire(&mut app);
        assert_eq!(count(&mut app), 5);
    }

    #[test]
    fn out_of_range_darkling_repositions_exactly_once() {
        // Scenario 4: crossing the chase threshold outward starts one
        // disappear/reappear cycle, with no retrigger on later ticks.
        let mut app = headless_app();

        let enemy = {
            let registry = DarklingRegistry::default();
            let mut commands_queue = bevy::ecs::world::CommandQueue::default();
            let mut commands = Commands::new(&mut commands_queue, app.world());
            let enemy = spawn_darkling(&mut commands, &registry, Vec2::new(500.0, 0.0), None);
            commands_queue.apply(app.world_mut());
            enemy
        };

        // Force several AI ticks while the enemy is beyond threshold.
        let force_tick = |app: &mut App| {
            let mut tick = app.world_mut().resource_mut::<AiTickTimer>();
            let remaining = tick.0.duration() - tick.0.elapsed();
            tick.0.tick(remaining - std::time::Duration::from_nanos(1));
            app.update();
        };
        force_tick(&mut app);
        assert_eq!(
            *app.world().get::<AiState>(enemy).unwrap(),
            AiState::Reposition
        );
        let started = drain::<core::ActionStarted>(&mut app);
        let disappears = |events: &[core::ActionStarted]| {
            events
                .iter()
                .filter(|e| e.action == ActionKind::Disappear)
                .count()
        };
        assert_eq!(disappears(&started), 1);

        // Further ticks while the cycle runs do not retrigger it.
        force_tick(&mut app);
        force_tick(&mut app);
        let started = drain::<core::ActionStarted>(&mut app);
        assert_eq!(disappears(&started), 0);
    }

    #[test]
    fn depleted_player_force_clears_the_queue() {
        let mut app = headless_app();
        let player = player_entity(&mut app);

        send_command(&mut app, Command::Attack(AttackId::Attack1));
        send_command(&mut app, Command::Attack(AttackId::Attack2));
        assert!(app.world().get::<ActorState>(player).unwrap().attacking);

        app.world_mut().send_event(ActorDepleted { actor: player });
        app.update();

        assert!(!app.world().get::<ActorState>(player).unwrap().attacking);
        assert!(app.world().get::<AttackQueue>(player).unwrap().is_empty());
    }

    #[test]
    fn run_and_jump_shape_the_velocity_intent() {
        let mut app = headless_app();
        let player = player_entity(&mut app);

        send_command(&mut app, Command::Run(core::Facing::Right));
        let state = app.world().get::<ActorState>(player).unwrap();
        assert!(state.running);
        let config = MoveConfig::default();
        assert!(state.horizontal_intent(&config) > 0.0);

        send_command(&mut app, Command::Jump);
        send_command(&mut app, Command::Jump);
        send_command(&mut app, Command::Jump);
        let state = app.world().get::<ActorState>(player).unwrap();
        assert_eq!(state.jump_count, config.max_jumps);
        let kinematics = app.world().get::<Kinematics>(player).unwrap();
        assert!(kinematics.velocity.y > 0.0);

        send_command(&mut app, Command::RunRelease);
        let state = app.world().get::<ActorState>(player).unwrap();
        assert!(!state.running);
        assert_eq!(state.horizontal_intent(&config), 0.0);
    }

    #[test]
    fn remote_directives_steer_the_orchestrator() {
        let mut app = headless_app();
        app.add_plugins(net::NetPlugin);
        let (link, endpoint) = net::RemoteLink::pair();
        app.insert_resource(link);

        endpoint
            .directives
            .send(net::Directive::SetSpawnTarget(9))
            .unwrap();
        endpoint
            .directives
            .send(net::Directive::SetInvulnWindow(0.2))
            .unwrap();
        app.update();

        assert_eq!(app.world().resource::<SpawnCadence>().target, 9);
        // Window clamps into its tunable range.
        let config = app.world().resource::<CombatConfig>();
        assert_eq!(config.invuln_window_secs, 1.0);
    }

    #[test]
    fn pause_and_resume_round_trip_through_commands() {
        let mut app = headless_app();

        send_command(&mut app, Command::Pause);
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Paused
        );

        send_command(&mut app, Command::Resume);
        app.update();
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::InGame
        );
        assert_eq!(
            *app.world().resource::<State<PlayState>>().get(),
            PlayState::Exploring
        );
    }
}
