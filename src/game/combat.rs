//! Combat resolution - damage, cooldowns, combos, knockouts

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fighter::{AnimState, Fighter};
use super::r#match::{MatchState, Winner};
use super::ActionSignal;

/// Combat tuning constants
#[derive(Debug, Clone, Copy)]
pub struct CombatTuning {
    /// Fixed damage per landed player punch
    pub punch_damage: u32,
    /// Minimum spacing between committed player punches (ms)
    pub punch_cooldown_ms: u64,
    /// Sliding re-arm window for the combo counter (ms)
    pub combo_window_ms: u64,
    /// Spacing between enemy attacks (ms)
    pub enemy_cooldown_ms: u64,
    /// Enemy damage roll, inclusive
    pub enemy_damage_min: u32,
    pub enemy_damage_max: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            punch_damage: 10,
            punch_cooldown_ms: 400,
            combo_window_ms: 1200,
            enemy_cooldown_ms: 1700,
            enemy_damage_min: 8,
            enemy_damage_max: 15,
        }
    }
}

/// Action-eligibility timestamps, owned by the resolver
#[derive(Debug, Clone, Copy)]
pub struct CooldownTimers {
    /// `None` until the first punch of the round
    pub last_player_punch: Option<u64>,
    /// Stamped at round start so the first enemy attack waits a full cooldown
    pub enemy_last_attack: u64,
}

impl CooldownTimers {
    pub fn new(now: u64) -> Self {
        Self {
            last_player_punch: None,
            enemy_last_attack: now,
        }
    }

    fn player_punch_ready(&self, now: u64, cooldown_ms: u64) -> bool {
        self.last_player_punch
            .map_or(true, |last| now.saturating_sub(last) > cooldown_ms)
    }
}

/// Events produced by one resolution pass. The orchestrator maps these to
/// spark bursts, flash/shake timers, and audio cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Player punch landed on the enemy
    PlayerPunch {
        damage: u32,
        combo: u32,
        enemy_hp: u32,
    },

    /// Enemy attack resolved; `blocked` means zero damage but the cooldown
    /// was still consumed
    EnemyAttack {
        damage: u32,
        blocked: bool,
        player_hp: u32,
    },

    /// A fighter reached zero HP
    Knockout { winner: Winner },
}

/// Applies player and enemy actions to match state once per tick.
///
/// Both branches run unconditionally every tick while the match is live; the
/// player branch resolves first, so a punch that knocks the enemy out skips
/// the enemy's attack that same tick.
pub struct CombatResolver {
    tuning: CombatTuning,
    timers: CooldownTimers,
    rng: ChaCha8Rng,
}

impl CombatResolver {
    pub fn new(tuning: CombatTuning, seed: u64) -> Self {
        Self {
            tuning,
            timers: CooldownTimers::new(0),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rearm both cooldowns for a new round
    pub fn reset(&mut self, now: u64) {
        self.timers = CooldownTimers::new(now);
    }

    /// Resolve one tick. Callers must not invoke this once `game_over` is
    /// set; the loop gates on it.
    pub fn resolve_tick(
        &mut self,
        state: &mut MatchState,
        player: &mut Fighter,
        enemy: &mut Fighter,
        signal: ActionSignal,
        now: u64,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        // Player branch, strict priority: block > punch > idle intent
        if signal.block {
            player.set_anim(AnimState::Block, now);
        } else if signal.any_punch()
            && self
                .timers
                .player_punch_ready(now, self.tuning.punch_cooldown_ms)
        {
            self.timers.last_player_punch = Some(now);
            player.set_anim(AnimState::Punch, now);

            let damage = self.tuning.punch_damage;
            state.enemy_hp = state.enemy_hp.saturating_sub(damage);
            enemy.set_anim(AnimState::Hit, now);

            // Combo is only read and reset at the moment of a hit
            state.combo = match state.combo_window_start {
                Some(start) if now.saturating_sub(start) < self.tuning.combo_window_ms => {
                    state.combo + 1
                }
                _ => 1,
            };
            state.combo_window_start = Some(now);

            debug!(damage, combo = state.combo, enemy_hp = state.enemy_hp, "player punch landed");
            events.push(GameEvent::PlayerPunch {
                damage,
                combo: state.combo,
                enemy_hp: state.enemy_hp,
            });

            if state.enemy_hp == 0 {
                state.game_over = true;
                state.winner = Winner::Player;
                enemy.set_anim(AnimState::Ko, now);
                info!(winner = ?state.winner, "knockout");
                events.push(GameEvent::Knockout {
                    winner: Winner::Player,
                });
            }
        } else {
            // Idle intent: drops an active block, leaves in-flight
            // punch/hit animations to their timeouts
            player.release_block(now);
        }

        // Enemy branch. Skipped once the match ended this tick, which gives
        // the player branch precedence on a double knockout.
        if !state.game_over
            && now.saturating_sub(self.timers.enemy_last_attack) > self.tuning.enemy_cooldown_ms
        {
            self.timers.enemy_last_attack = now;
            enemy.set_anim(AnimState::Punch, now);

            if signal.block {
                // Block negates the damage but not the cooldown
                debug!(player_hp = state.player_hp, "enemy attack blocked");
                events.push(GameEvent::EnemyAttack {
                    damage: 0,
                    blocked: true,
                    player_hp: state.player_hp,
                });
            } else {
                let damage = self
                    .rng
                    .gen_range(self.tuning.enemy_damage_min..=self.tuning.enemy_damage_max);
                state.player_hp = state.player_hp.saturating_sub(damage);
                player.set_anim(AnimState::Hit, now);

                debug!(damage, player_hp = state.player_hp, "enemy attack landed");
                events.push(GameEvent::EnemyAttack {
                    damage,
                    blocked: false,
                    player_hp: state.player_hp,
                });

                if state.player_hp == 0 {
                    state.game_over = true;
                    state.winner = Winner::Enemy;
                    player.set_anim(AnimState::Ko, now);
                    info!(winner = ?state.winner, "knockout");
                    events.push(GameEvent::Knockout {
                        winner: Winner::Enemy,
                    });
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fighter::Role;

    const PUNCH: ActionSignal = ActionSignal {
        punch_left: false,
        punch_right: true,
        block: false,
    };
    const BLOCK: ActionSignal = ActionSignal {
        punch_left: false,
        punch_right: false,
        block: true,
    };
    const IDLE: ActionSignal = ActionSignal {
        punch_left: false,
        punch_right: false,
        block: false,
    };

    fn setup() -> (CombatResolver, MatchState, Fighter, Fighter) {
        (
            CombatResolver::new(CombatTuning::default(), 7),
            MatchState::new(0),
            Fighter::new(Role::Player),
            Fighter::new(Role::Enemy),
        )
    }

    #[test]
    fn punch_deals_fixed_damage_and_starts_combo() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);

        assert_eq!(state.enemy_hp, 90);
        assert_eq!(state.combo, 1);
        assert_eq!(player.anim, AnimState::Punch);
        assert_eq!(enemy.anim, AnimState::Hit);
        assert!(matches!(
            events[0],
            GameEvent::PlayerPunch {
                damage: 10,
                combo: 1,
                enemy_hp: 90
            }
        ));
    }

    #[test]
    fn punch_cooldown_gates_repeat_punches() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);
        // 400ms not yet elapsed
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 400);
        assert_eq!(state.enemy_hp, 90);
        // Strictly past the cooldown
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 417);
        assert_eq!(state.enemy_hp, 80);
    }

    #[test]
    fn combo_increments_inside_window_and_drops_after() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);
        assert_eq!(state.combo, 1);

        // 500ms later: inside the 1.2s window
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 516);
        assert_eq!(state.combo, 2);

        // 1.2s gap: combo drops back to 1 on the next hit, not on timeout
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 1716);
        assert_eq!(state.combo, 1);
    }

    #[test]
    fn block_suppresses_punch_and_consumes_no_cooldown() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        let both = ActionSignal {
            punch_left: true,
            punch_right: true,
            block: true,
        };
        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, both, 16);

        assert!(events.is_empty());
        assert_eq!(state.enemy_hp, 100);
        assert_eq!(player.anim, AnimState::Block);
        // Cooldown untouched: an immediate follow-up punch still lands
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 32);
        assert_eq!(state.enemy_hp, 90);
    }

    #[test]
    fn enemy_attacks_after_cooldown_and_respects_spacing() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        // Not yet eligible
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 1700);
        assert_eq!(state.player_hp, 100);

        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 1716);
        assert_eq!(events.len(), 1);
        let hp_after_first = state.player_hp;
        assert!(hp_after_first <= 92 && hp_after_first >= 85);
        assert_eq!(enemy.anim, AnimState::Punch);
        assert_eq!(player.anim, AnimState::Hit);

        // No second attack until another full cooldown elapses
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 3416);
        assert_eq!(state.player_hp, hp_after_first);
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 3433);
        assert!(state.player_hp < hp_after_first);
    }

    #[test]
    fn block_negates_enemy_damage_but_not_cooldown() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, BLOCK, 1716);

        assert_eq!(state.player_hp, 100);
        assert_eq!(enemy.anim, AnimState::Punch);
        assert_eq!(player.anim, AnimState::Block);
        assert!(matches!(
            events[0],
            GameEvent::EnemyAttack {
                damage: 0,
                blocked: true,
                ..
            }
        ));

        // Cooldown was consumed: no attack right after the block drops
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 1732);
        assert_eq!(state.player_hp, 100);
    }

    #[test]
    fn player_knockout_sets_winner_once_and_flags_game_over() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        state.enemy_hp = 10;

        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);
        assert_eq!(state.enemy_hp, 0);
        assert!(state.game_over);
        assert_eq!(state.winner, Winner::Player);
        assert_eq!(enemy.anim, AnimState::Ko);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Knockout {
                winner: Winner::Player
            })
        ));
    }

    #[test]
    fn double_knockout_resolves_player_first() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        state.enemy_hp = 10;
        state.player_hp = 5;

        // Enemy cooldown is also due, but the player's punch ends the match
        // before the enemy branch runs.
        let events = resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 1716);
        assert_eq!(state.winner, Winner::Player);
        assert_eq!(state.player_hp, 5);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyAttack { .. })));
    }

    #[test]
    fn hp_never_goes_negative() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        state.enemy_hp = 3;
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);
        assert_eq!(state.enemy_hp, 0);

        let mut state2 = MatchState::new(0);
        state2.player_hp = 1;
        let mut resolver2 = CombatResolver::new(CombatTuning::default(), 7);
        let mut p2 = Fighter::new(Role::Player);
        let mut e2 = Fighter::new(Role::Enemy);
        resolver2.resolve_tick(&mut state2, &mut p2, &mut e2, IDLE, 1716);
        assert_eq!(state2.player_hp, 0);
        assert_eq!(state2.winner, Winner::Enemy);
        assert_eq!(p2.anim, AnimState::Ko);
    }

    #[test]
    fn first_punch_of_the_round_is_always_eligible() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        // now well under the cooldown length since t=0
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, PUNCH, 16);
        assert_eq!(state.enemy_hp, 90);
    }

    #[test]
    fn reset_rearms_enemy_cooldown_from_reset_time() {
        let (mut resolver, mut state, mut player, mut enemy) = setup();
        resolver.reset(10_000);
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 11_000);
        assert_eq!(state.player_hp, 100);
        resolver.resolve_tick(&mut state, &mut player, &mut enemy, IDLE, 11_716);
        assert!(state.player_hp < 100);
    }
}
