//! Hit effects - spark particles, screen shake, flash timers

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Vec2;

/// Sparks spawned per hit
pub const SPARK_BURST_SIZE: usize = 15;
/// Screen shake window after a hit (ms), jitter in [-10,10] on both axes
pub const SHAKE_WINDOW_MS: u64 = 200;
pub const SHAKE_AMPLITUDE: i32 = 10;
/// Health-bar / tint flash window after a hit (ms)
pub const FLASH_WINDOW_MS: u64 = 200;

#[derive(Debug, Clone, Copy)]
pub struct SparkParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames until pruned
    pub life: i32,
}

/// Owns all transient presentation state that is not pure function of the
/// match: the spark pool and the hit timestamps that drive shake and flash.
pub struct Effects {
    sparks: Vec<SparkParticle>,
    last_hit_at: Option<u64>,
    player_hit_at: Option<u64>,
    enemy_hit_at: Option<u64>,
    rng: ChaCha8Rng,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            sparks: Vec::new(),
            last_hit_at: None,
            player_hit_at: None,
            enemy_hit_at: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Spawn a fixed-size burst of sparks at an impact point
    pub fn burst_at(&mut self, pos: Vec2) {
        for _ in 0..SPARK_BURST_SIZE {
            self.sparks.push(SparkParticle {
                pos,
                vel: Vec2::new(self.rng.gen_range(-5.0..5.0), self.rng.gen_range(-5.0..5.0)),
                life: self.rng.gen_range(10..=18),
            });
        }
    }

    pub fn note_player_hit(&mut self, now: u64) {
        self.player_hit_at = Some(now);
        self.last_hit_at = Some(now);
    }

    pub fn note_enemy_hit(&mut self, now: u64) {
        self.enemy_hit_at = Some(now);
        self.last_hit_at = Some(now);
    }

    /// Integrate spark physics and prune dead particles; once per tick
    pub fn step(&mut self) {
        for spark in &mut self.sparks {
            spark.pos.x += spark.vel.x;
            spark.pos.y += spark.vel.y;
            spark.life -= 1;
        }
        self.sparks.retain(|s| s.life > 0);
    }

    /// Random jitter while inside the shake window, zero outside it
    pub fn shake_offset(&mut self, now: u64) -> Vec2 {
        if within(self.last_hit_at, now, SHAKE_WINDOW_MS) {
            Vec2::new(
                self.rng.gen_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE) as f32,
                self.rng.gen_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE) as f32,
            )
        } else {
            Vec2::default()
        }
    }

    pub fn player_flash(&self, now: u64) -> bool {
        within(self.player_hit_at, now, FLASH_WINDOW_MS)
    }

    pub fn enemy_flash(&self, now: u64) -> bool {
        within(self.enemy_hit_at, now, FLASH_WINDOW_MS)
    }

    pub fn sparks(&self) -> &[SparkParticle] {
        &self.sparks
    }

    pub fn reset(&mut self) {
        self.sparks.clear();
        self.last_hit_at = None;
        self.player_hit_at = None;
        self.enemy_hit_at = None;
    }
}

fn within(stamp: Option<u64>, now: u64, window_ms: u64) -> bool {
    stamp.is_some_and(|t| now.saturating_sub(t) < window_ms)
}
