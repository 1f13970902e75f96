//! Match state and the fixed-tick game loop

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::audio::{AudioCue, AudioSink};
use crate::input::{ControlEvent, Controls};
use crate::render::{Renderer, SceneBuilder};
use crate::util::time::{TICK_DURATION_MICROS, TICK_STEP_MS};
use crate::vision::{Camera, DetectedHand, HandDetector};

use super::combat::{CombatResolver, CombatTuning, GameEvent};
use super::effects::Effects;
use super::fighter::{Fighter, Role};
use super::gesture::{GestureClassifier, GestureSample};
use super::Vec2;

/// Displayed round countdown; display only, never ends the match
pub const ROUND_SECONDS: u64 = 60;

pub const MAX_HP: u32 = 100;

/// Spark burst spawn points, relative to each fighter's feet (upper body)
const ENEMY_IMPACT_OFFSET: Vec2 = Vec2::new(-50.0, -140.0);
const PLAYER_IMPACT_OFFSET: Vec2 = Vec2::new(40.0, -140.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    None,
    Player,
    Enemy,
}

/// Authoritative per-match state. Mutated only by the combat resolver;
/// reinitialized in place on reset.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub combo: u32,
    /// Stamped on each landed player hit; `None` until the first
    pub combo_window_start: Option<u64>,
    pub round_start: u64,
    pub intro_start: u64,
    pub game_over: bool,
    pub winner: Winner,
}

impl MatchState {
    pub fn new(now: u64) -> Self {
        Self {
            player_hp: MAX_HP,
            enemy_hp: MAX_HP,
            combo: 0,
            combo_window_start: None,
            round_start: now,
            intro_start: now,
            game_over: false,
            winner: Winner::None,
        }
    }

    pub fn reset(&mut self, now: u64) {
        *self = Self::new(now);
    }
}

/// The complete simulation for one match: state, fighters, classifier,
/// resolver, and effects, advanced one tick at a time on a deterministic
/// 16ms clock. Presentation and collaborators live in [`GameLoop`].
pub struct GameMatch {
    state: MatchState,
    player: Fighter,
    enemy: Fighter,
    classifier: GestureClassifier,
    resolver: CombatResolver,
    effects: Effects,
    tick: u64,
    now: u64,
}

impl GameMatch {
    pub fn new(seed: u64) -> Self {
        Self {
            state: MatchState::new(0),
            player: Fighter::new(Role::Player),
            enemy: Fighter::new(Role::Enemy),
            classifier: GestureClassifier::new(),
            resolver: CombatResolver::new(CombatTuning::default(), seed),
            effects: Effects::new(seed.wrapping_add(1)),
            tick: 0,
            now: 0,
        }
    }

    /// Atomic reinit of match state, cooldowns, fighters, wrist history and
    /// effects; applied at a tick boundary before the next sample is read
    pub fn reset(&mut self) {
        self.state.reset(self.now);
        self.resolver.reset(self.now);
        self.player.reset(self.now);
        self.enemy.reset(self.now);
        self.classifier.reset();
        self.effects.reset();
    }

    /// Advance the simulation clock; the returned timestamp doubles as the
    /// strictly increasing detector timestamp
    pub fn begin_tick(&mut self) -> u64 {
        self.tick += 1;
        self.now += TICK_STEP_MS;
        self.now
    }

    /// One simulation tick: classify, resolve (unless the match is over),
    /// settle animations, step effects
    pub fn advance_tick(&mut self, hands: &[DetectedHand]) -> Vec<GameEvent> {
        let sample = GestureSample::from_hands(hands, self.now);
        let signal = self.classifier.classify(&sample);

        let events = if self.state.game_over {
            Vec::new()
        } else {
            self.resolver.resolve_tick(
                &mut self.state,
                &mut self.player,
                &mut self.enemy,
                signal,
                self.now,
            )
        };

        for event in &events {
            self.apply_event_effects(event);
        }

        // Timeout transitions run even after game over so in-flight
        // animations settle
        self.player.advance(self.now, self.state.game_over);
        self.enemy.advance(self.now, self.state.game_over);
        self.effects.step();

        events
    }

    fn apply_event_effects(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerPunch { .. } => {
                self.effects.note_enemy_hit(self.now);
                self.effects.burst_at(Vec2::new(
                    self.enemy.pos.x + ENEMY_IMPACT_OFFSET.x,
                    self.enemy.pos.y + ENEMY_IMPACT_OFFSET.y,
                ));
            }
            GameEvent::EnemyAttack { blocked: false, .. } => {
                self.effects.note_player_hit(self.now);
                self.effects.burst_at(Vec2::new(
                    self.player.pos.x + PLAYER_IMPACT_OFFSET.x,
                    self.player.pos.y + PLAYER_IMPACT_OFFSET.y,
                ));
            }
            GameEvent::EnemyAttack { blocked: true, .. } | GameEvent::Knockout { .. } => {}
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Disjoint borrows for the scene builder
    pub fn render_parts(&mut self) -> (&MatchState, &Fighter, &Fighter, &mut Effects) {
        (&self.state, &self.player, &self.enemy, &mut self.effects)
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    #[cfg(test)]
    pub fn player(&self) -> &Fighter {
        &self.player
    }

    #[cfg(test)]
    pub fn enemy(&self) -> &Fighter {
        &self.enemy
    }

    #[cfg(test)]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    /// The capture collaborator stopped producing frames; fatal, no retry
    #[error("camera produced no frame")]
    CameraClosed,
}

/// Fixed-rate orchestrator: one tick pulls controls, a camera frame and a
/// detector sample, advances the simulation, and issues one render pass.
/// Single-threaded by design; every stage runs in sequence.
pub struct GameLoop {
    game: GameMatch,
    camera: Box<dyn Camera>,
    detector: Box<dyn HandDetector>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    controls: Controls,
    scene: SceneBuilder,
}

impl GameLoop {
    pub fn new(
        game: GameMatch,
        camera: Box<dyn Camera>,
        detector: Box<dyn HandDetector>,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioSink>,
        controls: Controls,
        scene: SceneBuilder,
    ) -> Self {
        Self {
            game,
            camera,
            detector,
            renderer,
            audio,
            controls,
            scene,
        }
    }

    /// Run until quit (Ok) or camera loss (Err)
    pub async fn run(mut self) -> Result<(), LoopError> {
        info!("match started");

        let tick_duration = Duration::from_micros(TICK_DURATION_MICROS);
        let mut tick_interval = interval(tick_duration);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            for event in self.controls.poll() {
                match event {
                    ControlEvent::Quit => {
                        info!(tick = self.game.tick(), "quit requested");
                        return Ok(());
                    }
                    ControlEvent::Reset => {
                        info!(tick = self.game.tick(), "match reset");
                        self.game.reset();
                    }
                }
            }

            let frame = self.camera.capture().ok_or(LoopError::CameraClosed)?;
            let now = self.game.begin_tick();
            let hands = self.detector.detect(&frame, now);
            let events = self.game.advance_tick(&hands);

            for event in &events {
                play_cues(self.audio.as_mut(), event);
            }

            let tick = self.game.tick();
            let (state, player, enemy, fx) = self.game.render_parts();
            let scene = self.scene.build(tick, now, state, player, enemy, fx);
            self.renderer.present(&scene);
        }
    }
}

/// Map resolution events to audio cues
fn play_cues(audio: &mut dyn AudioSink, event: &GameEvent) {
    match event {
        GameEvent::PlayerPunch { .. } => {
            audio.play(AudioCue::PlayerPunch);
            audio.play(AudioCue::Hit);
        }
        GameEvent::EnemyAttack { blocked, .. } => {
            audio.play(AudioCue::EnemyPunch);
            if !blocked {
                audio.play(AudioCue::Hit);
            }
        }
        GameEvent::Knockout { .. } => {
            audio.play(AudioCue::Ko);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::game::effects::SPARK_BURST_SIZE;
    use crate::game::fighter::AnimState;
    use crate::render::NullRenderer;
    use crate::vision::{ScriptedDetector, SyntheticCamera};
    use tokio::sync::mpsc;

    fn hand(x: f32, y: f32) -> DetectedHand {
        DetectedHand {
            wrist_x: x,
            wrist_y: y,
        }
    }

    const GUARD: [DetectedHand; 2] = [
        DetectedHand {
            wrist_x: 0.35,
            wrist_y: 0.65,
        },
        DetectedHand {
            wrist_x: 0.65,
            wrist_y: 0.65,
        },
    ];

    const RAISED: [DetectedHand; 2] = [
        DetectedHand {
            wrist_x: 0.35,
            wrist_y: 0.2,
        },
        DetectedHand {
            wrist_x: 0.65,
            wrist_y: 0.2,
        },
    ];

    #[test]
    fn seventy_unit_jab_lands_for_ten_damage() {
        let mut game = GameMatch::new(42);

        game.begin_tick();
        game.advance_tick(&[hand(0.35, 0.65), hand(0.65, 0.65)]);
        // Right hand travels 70 arena units (0.07 * 1000), past the 60 threshold
        game.begin_tick();
        let events = game.advance_tick(&[hand(0.35, 0.65), hand(0.72, 0.65)]);

        assert!(matches!(
            events[0],
            GameEvent::PlayerPunch {
                damage: 10,
                combo: 1,
                enemy_hp: 90
            }
        ));
        assert_eq!(game.state().enemy_hp, 90);
        assert_eq!(game.state().combo, 1);
        assert_eq!(game.enemy().anim, AnimState::Hit);
        assert_eq!(game.effects().sparks().len(), SPARK_BURST_SIZE);
    }

    #[test]
    fn raised_guard_blocks_the_enemy_attack() {
        let mut game = GameMatch::new(42);

        // Hold the guard past the enemy's 1.7s cooldown (107 ticks at 16ms)
        let mut all_events = Vec::new();
        for _ in 0..120 {
            game.begin_tick();
            all_events.extend(game.advance_tick(&RAISED));
        }

        assert_eq!(game.state().player_hp, 100);
        assert!(all_events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyAttack {
                blocked: true,
                damage: 0,
                ..
            }
        )));
        // Cooldown was consumed: exactly one attack fits in 1.92s
        let attacks = all_events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyAttack { .. }))
            .count();
        assert_eq!(attacks, 1);
    }

    #[test]
    fn knockout_stops_enemy_attacks_until_reset() {
        let mut game = GameMatch::new(42);
        game.state_mut().enemy_hp = 10;

        game.begin_tick();
        game.advance_tick(&GUARD);
        game.begin_tick();
        let events = game.advance_tick(&[hand(0.35, 0.65), hand(0.72, 0.65)]);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Knockout {
                winner: Winner::Player
            })
        ));
        assert_eq!(game.enemy().anim, AnimState::Ko);

        // Run well past the enemy cooldown; no attacks resolve
        for _ in 0..200 {
            game.begin_tick();
            let events = game.advance_tick(&GUARD);
            assert!(events.is_empty());
        }
        assert_eq!(game.state().player_hp, 100);
        assert_eq!(game.enemy().anim, AnimState::Ko);

        game.reset();
        assert_eq!(game.state().enemy_hp, 100);
        assert!(!game.state().game_over);
        assert_eq!(game.state().winner, Winner::None);
        assert_eq!(game.state().combo, 0);
        assert_eq!(game.enemy().anim, AnimState::Idle);
    }

    #[test]
    fn enemy_attacks_damage_an_unguarded_player() {
        let mut game = GameMatch::new(42);
        for _ in 0..120 {
            game.begin_tick();
            game.advance_tick(&GUARD);
        }
        assert!(game.state().player_hp < 100);
        assert!(game.state().player_hp >= 85);
    }

    #[test]
    fn hp_stays_in_bounds_over_a_long_scripted_match() {
        let mut game = GameMatch::new(7);
        let mut camera = SyntheticCamera::new();
        let mut detector = ScriptedDetector::new(7);

        for _ in 0..2000 {
            let frame = camera.capture().unwrap();
            let now = game.begin_tick();
            let hands = detector.detect(&frame, now);
            game.advance_tick(&hands);

            assert!(game.state().player_hp <= 100);
            assert!(game.state().enemy_hp <= 100);
            assert_eq!(
                game.state().game_over,
                game.state().player_hp == 0 || game.state().enemy_hp == 0
            );
            if game.state().game_over {
                break;
            }
        }
    }

    #[test]
    fn audio_cues_follow_events() {
        let mut audio = RecordingAudio::default();
        play_cues(
            &mut audio,
            &GameEvent::PlayerPunch {
                damage: 10,
                combo: 1,
                enemy_hp: 90,
            },
        );
        assert_eq!(audio.played, vec![AudioCue::PlayerPunch, AudioCue::Hit]);

        audio.played.clear();
        play_cues(
            &mut audio,
            &GameEvent::EnemyAttack {
                damage: 0,
                blocked: true,
                player_hp: 100,
            },
        );
        assert_eq!(audio.played, vec![AudioCue::EnemyPunch]);

        audio.played.clear();
        play_cues(
            &mut audio,
            &GameEvent::Knockout {
                winner: Winner::Enemy,
            },
        );
        assert_eq!(audio.played, vec![AudioCue::Ko]);
    }

    #[tokio::test]
    async fn camera_loss_is_fatal() {
        let (_tx, rx) = mpsc::channel(4);
        let game_loop = GameLoop::new(
            GameMatch::new(1),
            Box::new(SyntheticCamera::limited(3)),
            Box::new(ScriptedDetector::new(1)),
            Box::new(NullRenderer),
            Box::new(crate::audio::NullAudio),
            Controls::from_channel(rx),
            SceneBuilder::new(1),
        );
        assert!(matches!(game_loop.run().await, Err(LoopError::CameraClosed)));
    }

    #[tokio::test]
    async fn quit_request_ends_the_loop_cleanly() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(ControlEvent::Quit).await.unwrap();
        let game_loop = GameLoop::new(
            GameMatch::new(1),
            Box::new(SyntheticCamera::new()),
            Box::new(ScriptedDetector::new(1)),
            Box::new(NullRenderer),
            Box::new(crate::audio::NullAudio),
            Controls::from_channel(rx),
            SceneBuilder::new(1),
        );
        assert!(game_loop.run().await.is_ok());
    }
}
