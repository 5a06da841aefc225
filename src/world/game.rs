//! GameWorld - the single aggregate the simulation steps

use bevy::prelude::*;
use serde::Serialize;

use super::{Collectible, Platform};
use crate::actions::{
    ActionEffect, ActionKind, ActionLog, ActionRecorder, AvatarParams, apply_action,
};
use crate::ai::{EnemyProfiles, update_enemy};
use crate::body::{Body, Faction, Shooter};
use crate::combat::{
    level_cleared, remove_stray_bullets, resolve_avatar_hits, resolve_collectibles,
    resolve_enemy_hits,
};
use crate::error::LevelConfigError;
use crate::events::{Avatar, BusEvent, EventBus, GameEvent, HitCause, HitTarget};
use crate::input::StepInput;
use crate::levels::{LevelDatabase, build_layout};
use crate::physics::{
    CollisionPolicy, PhysicsParams, StepOutcome, VelocityAxisPolicy, advance_bullet, integrate,
};
use crate::scoring::Score;
use crate::shadow::Shadow;
use crate::snapshot::WorldSnapshot;
use crate::tuning::GameplayTuning;

/// Run state. Only `Playing` mutates bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Playing,
    Paused,
    /// Countdown after a cleared level before the next one loads
    LevelTransition { remaining: u32 },
    Victory,
    GameOver,
}

/// Everything the simulation owns. Observers read it between steps.
///
/// The frame counter advances on every [`GameWorld::step`], paused or not.
/// Body mutation and shadow replay only happen while `Playing`; replay
/// frames that fall inside a pause are skipped rather than replayed late.
#[derive(Resource)]
pub struct GameWorld {
    tuning: GameplayTuning,
    physics: PhysicsParams,
    avatar: AvatarParams,
    profiles: EnemyProfiles,
    levels: LevelDatabase,
    level_index: usize,
    state: GameState,
    frame: u64,
    pub score: Score,
    pub player: Body,
    pub shadow: Option<Shadow>,
    pub enemies: Vec<Body>,
    pub bullets: Vec<Body>,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    log: ActionLog,
    recorder: ActionRecorder,
    policy: Box<dyn CollisionPolicy>,
    events: EventBus,
    last_recorded: Vec<ActionKind>,
    last_replayed: Vec<ActionKind>,
}

impl GameWorld {
    /// Validate the levels and load the first one
    pub fn new(levels: LevelDatabase, tuning: GameplayTuning) -> Result<Self, LevelConfigError> {
        Self::with_profiles(levels, tuning, EnemyProfiles::default())
    }

    pub fn with_profiles(
        levels: LevelDatabase,
        tuning: GameplayTuning,
        profiles: EnemyProfiles,
    ) -> Result<Self, LevelConfigError> {
        levels.validate()?;
        let tuning = tuning.sanitized();

        let mut world = Self {
            physics: PhysicsParams::from_tuning(&tuning),
            avatar: AvatarParams::from_tuning(&tuning),
            player: Body::avatar(Faction::Player, Vec2::ZERO, &tuning),
            log: ActionLog::with_capacity(tuning.log_capacity),
            tuning,
            profiles,
            levels,
            level_index: 0,
            state: GameState::Playing,
            frame: 0,
            score: Score::default(),
            shadow: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            recorder: ActionRecorder::new(),
            policy: Box::new(VelocityAxisPolicy),
            events: EventBus::new(),
            last_recorded: Vec::new(),
            last_replayed: Vec::new(),
        };
        world.load_level(0)?;
        Ok(world)
    }

    /// Swap the platform resolution strategy
    pub fn with_policy(mut self, policy: impl CollisionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Run one fixed simulation step. Never fails.
    pub fn step(&mut self, input: &StepInput) {
        self.frame += 1;
        self.events.set_frame(self.frame);
        self.last_recorded.clear();
        self.last_replayed.clear();

        match self.state {
            GameState::Playing => {
                if input.pause {
                    self.state = GameState::Paused;
                    self.events.emit(GameEvent::Paused);
                    debug!("Paused at frame {}", self.frame);
                } else {
                    self.simulate(input);
                    return;
                }
            }
            GameState::Paused => {
                if input.pause {
                    self.state = GameState::Playing;
                    self.events.emit(GameEvent::Resumed);
                    debug!("Resumed at frame {}", self.frame);
                }
            }
            GameState::LevelTransition { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.advance_level();
                } else {
                    self.state = GameState::LevelTransition { remaining };
                }
            }
            GameState::Victory | GameState::GameOver => {
                if input.restart {
                    self.restart();
                }
            }
        }

        // Buttons held through a frozen step are not fresh presses later
        self.recorder.observe(input);
    }

    /// recorder -> shadow replay -> enemy AI -> physics -> combat
    fn simulate(&mut self, input: &StepInput) {
        if input.toggle_shadow {
            self.toggle_shadow();
        }

        let recorded = self.recorder.record(input, self.frame, &mut self.log);
        perform(
            &mut self.player,
            Avatar::Player,
            &recorded,
            &self.avatar,
            &mut self.bullets,
            &mut self.events,
        );
        self.last_recorded = recorded;

        if let Some(shadow) = self.shadow.as_mut() {
            let due = shadow.due_actions(self.frame, &self.log);
            perform(
                &mut shadow.body,
                Avatar::Shadow,
                &due,
                &self.avatar,
                &mut self.bullets,
                &mut self.events,
            );
            self.last_replayed = due;
        }

        self.update_enemies();
        self.integrate_bodies();
        self.resolve_combat();
    }

    fn update_enemies(&mut self) {
        let shadow = self.shadow.as_ref().map(|s| &s.body);
        for enemy in &mut self.enemies {
            let Faction::Enemy(kind) = enemy.faction() else {
                continue;
            };
            let intent = update_enemy(
                enemy,
                &self.player,
                shadow,
                self.frame,
                self.profiles.get(kind),
                self.tuning.bullet_speed,
            );
            if let Some(bullet) = intent.bullet {
                self.events.emit(GameEvent::Shoot {
                    shooter: Shooter::Enemy(kind),
                });
                self.bullets.push(bullet);
            }
        }
    }

    fn integrate_bodies(&mut self) {
        let policy = self.policy.as_ref();

        let outcome = integrate(&mut self.player, &self.platforms, &self.physics, policy);
        report_fall(Avatar::Player, outcome, &mut self.events);

        if let Some(shadow) = self.shadow.as_mut() {
            let outcome = integrate(&mut shadow.body, &self.platforms, &self.physics, policy);
            report_fall(Avatar::Shadow, outcome, &mut self.events);
        }

        for enemy in &mut self.enemies {
            integrate(enemy, &self.platforms, &self.physics, policy);
        }

        for bullet in &mut self.bullets {
            advance_bullet(bullet);
        }
    }

    fn resolve_combat(&mut self) {
        remove_stray_bullets(&mut self.bullets, &self.physics);
        resolve_enemy_hits(
            &mut self.bullets,
            &mut self.enemies,
            &self.profiles,
            &mut self.score,
            &mut self.events,
        );
        resolve_avatar_hits(
            &mut self.bullets,
            &mut self.player,
            self.shadow.as_mut().map(|s| &mut s.body),
            self.tuning.enemy_bullet_damage,
            &mut self.events,
        );
        resolve_collectibles(
            &mut self.collectibles,
            &self.player,
            self.shadow.as_ref().map(|s| &s.body),
            &mut self.score,
            &mut self.events,
        );

        if self.shadow.as_ref().is_some_and(|s| !s.body.is_alive()) {
            self.dismiss_shadow();
        }

        if !self.player.is_alive() {
            self.state = GameState::GameOver;
            self.events.emit(GameEvent::GameOver {
                level: self.level_number(),
                score: self.score.total,
            });
            info!(
                "Game over on level {} with score {}",
                self.level_number(),
                self.score.total
            );
            return;
        }

        if level_cleared(&self.enemies, &self.collectibles) {
            self.score.level_completed(self.tuning.completion_bonus);
            self.events.emit(GameEvent::LevelComplete {
                level: self.level_number(),
                score: self.score.total,
            });
            info!(
                "Level {} complete, score {}",
                self.level_number(),
                self.score.total
            );
            self.state = GameState::LevelTransition {
                remaining: self.tuning.transition_frames,
            };
        }
    }

    // =========================================================================
    // Level flow
    // =========================================================================

    /// Load a level: fresh player, no shadow, empty action log, no bullets
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelConfigError> {
        let level = self
            .levels
            .get(index)
            .ok_or(LevelConfigError::LevelIndexOutOfRange {
                index,
                count: self.levels.len(),
            })?;
        let layout = build_layout(level, self.tuning.playfield(), &self.profiles);

        self.platforms = layout.platforms;
        self.enemies = layout.enemies;
        self.collectibles = layout.collectibles;
        self.player = Body::avatar(Faction::Player, layout.player_spawn, &self.tuning);
        self.shadow = None;
        self.bullets.clear();
        self.log.clear();
        self.recorder.reset();
        self.level_index = index;
        self.state = GameState::Playing;

        self.events.emit(GameEvent::LevelStart {
            level: index as u32 + 1,
            name: level.name.clone(),
        });
        info!("Level {}: {} loaded", index + 1, level.name);
        Ok(())
    }

    fn advance_level(&mut self) {
        let next = self.level_index + 1;
        if next >= self.levels.len() {
            self.state = GameState::Victory;
            self.events.emit(GameEvent::Victory {
                score: self.score.total,
            });
            info!("Victory with score {}", self.score.total);
            return;
        }
        if let Err(e) = self.load_level(next) {
            warn!("{}, ending run", e);
            self.state = GameState::Victory;
        }
    }

    /// Back to level 1 with a zero score. The frame counter keeps counting.
    pub fn restart(&mut self) {
        self.score = Score::default();
        if let Err(e) = self.load_level(0) {
            warn!("Restart failed: {}", e);
        }
    }

    // =========================================================================
    // Shadow
    // =========================================================================

    fn toggle_shadow(&mut self) {
        if !self.dismiss_shadow() {
            self.spawn_shadow();
        }
    }

    /// Create the shadow on top of the player. False if one already exists.
    pub fn spawn_shadow(&mut self) -> bool {
        if self.shadow.is_some() {
            return false;
        }
        self.shadow = Some(Shadow::spawn_at(&self.player, self.frame, &self.tuning));
        self.events.emit(GameEvent::ShadowCreated);
        debug!("Shadow created at frame {}", self.frame);
        true
    }

    /// Remove the shadow immediately. False if there was none.
    pub fn dismiss_shadow(&mut self) -> bool {
        if self.shadow.take().is_none() {
            return false;
        }
        self.events.emit(GameEvent::ShadowDestroyed);
        debug!("Shadow dismissed at frame {}", self.frame);
        true
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }

    /// Events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<BusEvent> {
        self.events.take()
    }

    pub fn pending_events(&self) -> &[BusEvent] {
        self.events.peek()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// 1-based level number, as shown to players
    pub fn level_number(&self) -> u32 {
        self.level_index as u32 + 1
    }

    pub fn level_name(&self) -> &str {
        self.levels
            .get(self.level_index)
            .map_or("", |l| l.name.as_str())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn tuning(&self) -> &GameplayTuning {
        &self.tuning
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Player intents recorded on the latest step
    pub fn last_recorded(&self) -> &[ActionKind] {
        &self.last_recorded
    }

    /// Actions the shadow replayed on the latest step
    pub fn last_replayed(&self) -> &[ActionKind] {
        &self.last_replayed
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

/// Apply a frame's actions to an avatar, then tick its cooldown
fn perform(
    body: &mut Body,
    avatar: Avatar,
    actions: &[ActionKind],
    params: &AvatarParams,
    bullets: &mut Vec<Body>,
    bus: &mut EventBus,
) {
    for &kind in actions {
        match apply_action(body, kind, params) {
            ActionEffect::Jumped => bus.emit(GameEvent::Jump { avatar }),
            ActionEffect::Shot(bullet) => {
                if let Faction::Bullet(shooter) = bullet.faction() {
                    bus.emit(GameEvent::Shoot { shooter });
                }
                bullets.push(bullet);
            }
            ActionEffect::Moved | ActionEffect::Blocked => {}
        }
    }
    body.tick_cooldown();
}

fn report_fall(avatar: Avatar, outcome: StepOutcome, bus: &mut EventBus) {
    if outcome.damage > 0 {
        bus.emit(GameEvent::Hit {
            target: HitTarget::Avatar(avatar),
            cause: HitCause::Fall,
        });
    }
}
