//! Per-fighter animation state machine

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Feet positions in arena space
pub const PLAYER_POS: Vec2 = Vec2::new(220.0, 380.0);
pub const ENEMY_POS: Vec2 = Vec2::new(780.0, 380.0);

/// Animation timings (milliseconds)
pub const PLAYER_PUNCH_ANIM_MS: u64 = 250;
pub const HIT_ANIM_MS: u64 = 300;
pub const ENEMY_PUNCH_ANIM_MS: u64 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Enemy,
}

/// Animation/behavior state. `Ko` is terminal for the match; every other
/// state settles back to `Idle` on a timeout or signal change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimState {
    Idle,
    Punch,
    Block,
    Hit,
    Ko,
}

#[derive(Debug, Clone)]
pub struct Fighter {
    pub role: Role,
    pub anim: AnimState,
    /// Simulation time at which `anim` was entered
    pub entered_at: u64,
    pub pos: Vec2,
}

impl Fighter {
    pub fn new(role: Role) -> Self {
        let pos = match role {
            Role::Player => PLAYER_POS,
            Role::Enemy => ENEMY_POS,
        };
        Self {
            role,
            anim: AnimState::Idle,
            entered_at: 0,
            pos,
        }
    }

    /// Reinitialize in place for a new round
    pub fn reset(&mut self, now: u64) {
        self.anim = AnimState::Idle;
        self.entered_at = now;
    }

    /// Enter an animation state, restamping its entry time. Ko is terminal:
    /// once set, nothing else takes until reset.
    pub fn set_anim(&mut self, anim: AnimState, now: u64) {
        if self.anim == AnimState::Ko {
            return;
        }
        self.anim = anim;
        self.entered_at = now;
    }

    /// Block is re-evaluated every tick rather than sticky; called when the
    /// block signal is no longer active.
    pub fn release_block(&mut self, now: u64) {
        if self.anim == AnimState::Block {
            self.set_anim(AnimState::Idle, now);
        }
    }

    /// Polling timeout transitions, run every tick. Runs even after the
    /// match ends so in-flight animations settle, with two exceptions: Ko
    /// never transitions, and the enemy's punch freezes once the match is
    /// over.
    pub fn advance(&mut self, now: u64, match_over: bool) {
        let elapsed = now.saturating_sub(self.entered_at);
        match (self.role, self.anim) {
            (Role::Player, AnimState::Punch) if elapsed > PLAYER_PUNCH_ANIM_MS => {
                self.set_anim(AnimState::Idle, now);
            }
            (Role::Enemy, AnimState::Punch) if elapsed > ENEMY_PUNCH_ANIM_MS && !match_over => {
                self.set_anim(AnimState::Idle, now);
            }
            (_, AnimState::Hit) if elapsed > HIT_ANIM_MS => {
                self.set_anim(AnimState::Idle, now);
            }
            _ => {}
        }
    }
}
