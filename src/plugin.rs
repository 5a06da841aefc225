//! Bevy integration - runs the world on the fixed 60 Hz schedule
//!
//! Hosts write [`StepInput`] each tick and read the tick's events from
//! [`EventBus::processed`] afterwards. Rendering and audio stay outside.

use bevy::prelude::*;

use crate::ai::EnemyProfiles;
use crate::events::{EventBuffer, EventBus};
use crate::input::StepInput;
use crate::levels::LevelDatabase;
use crate::snapshot::{SnapshotConfig, save_snapshot, snapshot_trigger};
use crate::tuning::GameplayTuning;
use crate::world::GameWorld;

/// Fixed simulation rate
pub const STEP_HZ: f64 = 60.0;

/// Installs the world and its per-tick systems.
///
/// If the levels fail validation the plugin logs the error and inserts no
/// [`GameWorld`]; the systems then never run.
#[derive(Clone, Default)]
pub struct ShadowSplitPlugin {
    pub levels: LevelDatabase,
    pub tuning: GameplayTuning,
    pub profiles: EnemyProfiles,
}

impl ShadowSplitPlugin {
    pub fn new(levels: LevelDatabase, tuning: GameplayTuning) -> Self {
        Self {
            levels,
            tuning,
            profiles: EnemyProfiles::default(),
        }
    }

    pub fn with_profiles(mut self, profiles: EnemyProfiles) -> Self {
        self.profiles = profiles;
        self
    }
}

/// Events of the current session, kept for the compact log
#[derive(Resource, Default)]
pub struct SessionLog {
    pub buffer: EventBuffer,
    pub enabled: bool,
}

impl Plugin for ShadowSplitPlugin {
    fn build(&self, app: &mut App) {
        match GameWorld::with_profiles(
            self.levels.clone(),
            self.tuning.clone(),
            self.profiles.clone(),
        ) {
            Ok(world) => {
                app.insert_resource(world);
            }
            Err(e) => error!("{}", e),
        }

        app.init_resource::<StepInput>();
        app.insert_resource(EventBus::new());
        app.init_resource::<SessionLog>();
        app.init_resource::<SnapshotConfig>();
        app.insert_resource(Time::<Fixed>::from_hz(STEP_HZ));

        app.add_systems(
            FixedUpdate,
            (step_world, record_session)
                .chain()
                .run_if(resource_exists::<GameWorld>),
        );
    }
}

/// One simulation step per fixed tick
pub fn step_world(
    mut world: ResMut<GameWorld>,
    mut input: ResMut<StepInput>,
    mut bus: ResMut<EventBus>,
) {
    bus.clear_processed();
    world.step(&input);
    input.clear_edges();
    bus.set_frame(world.frame());
    bus.forward(world.drain_events());
}

/// Move this tick's events into the session log and take any snapshot
/// they trigger
pub fn record_session(
    world: Res<GameWorld>,
    mut bus: ResMut<EventBus>,
    mut session: ResMut<SessionLog>,
    snapshots: Res<SnapshotConfig>,
) {
    let events = bus.drain();
    if events.is_empty() {
        return;
    }

    if snapshots.enabled {
        if let Some(trigger) = snapshot_trigger(&snapshots, &events) {
            match save_snapshot(&world.snapshot(), &trigger, &snapshots.dir) {
                Ok(path) => debug!("Snapshot saved: {}", path.display()),
                Err(e) => warn!("{}", e),
            }
        }
    }

    if session.enabled {
        session.buffer.import(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::simulation::HeadlessAppBuilder;

    fn tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    #[test]
    fn test_plugin_steps_world_each_tick() {
        let mut app = HeadlessAppBuilder::new().build();
        for _ in 0..5 {
            tick(&mut app);
        }
        assert_eq!(app.world().resource::<GameWorld>().frame(), 5);
    }

    #[test]
    fn test_edge_flags_cleared_after_step() {
        let mut app = HeadlessAppBuilder::new().build();
        app.world_mut().resource_mut::<StepInput>().toggle_shadow = true;
        tick(&mut app);

        assert!(!app.world().resource::<StepInput>().toggle_shadow);
        assert!(app.world().resource::<GameWorld>().shadow.is_some());
        let bus = app.world().resource::<EventBus>();
        assert!(
            bus.processed()
                .iter()
                .any(|e| e.event == GameEvent::ShadowCreated && e.frame == 1)
        );

        // Next tick sees a cleared flag, so the shadow stays
        tick(&mut app);
        assert!(app.world().resource::<GameWorld>().shadow.is_some());
    }

    #[test]
    fn test_session_log_collects_events() {
        let mut app = HeadlessAppBuilder::new().build();
        app.world_mut().resource_mut::<SessionLog>().enabled = true;
        app.world_mut().resource_mut::<StepInput>().toggle_shadow = true;
        tick(&mut app);
        tick(&mut app);

        let log = app.world().resource::<SessionLog>();
        assert!(log.buffer.serialize().contains("F:000001|S+"));
    }

    #[test]
    fn test_invalid_levels_insert_no_world() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ShadowSplitPlugin::new(
            LevelDatabase { levels: Vec::new() },
            GameplayTuning::default(),
        ));
        tick(&mut app);
        assert!(!app.world().contains_resource::<GameWorld>());
    }
}
