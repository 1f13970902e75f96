//! Scene building - turns a match snapshot into draw primitives
//!
//! Pure read of the game state: the only mutation here is the RNG used for
//! crowd jitter. Fighters are arcade-style shape compositions; all layout
//! constants live in arena space (1000x600).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::effects::Effects;
use crate::game::fighter::{AnimState, Fighter, Role};
use crate::game::r#match::{MatchState, Winner, ROUND_SECONDS};
use crate::game::{Vec2, ARENA_HEIGHT, ARENA_WIDTH};

use super::primitives::{Color, DrawPrimitive, Scene, BLACK, GREEN, RED, SKIN, WHITE, YELLOW};

const HEALTH_BAR_WIDTH: f32 = 300.0;
const HEALTH_BAR_HEIGHT: f32 = 30.0;

const PLAYER_BODY: Color = Color(50, 120, 255);
const ENEMY_BODY: Color = Color(255, 70, 70);
const PLAYER_GLOVE: Color = Color(200, 0, 0);
const ENEMY_GLOVE: Color = Color(0, 100, 255);
const PLAYER_FLASH: Color = Color(255, 80, 80);

/// Intro overlay windows measured from `intro_start` (ms)
const INTRO_ROUND_MS: u64 = 1500;
const INTRO_FIGHT_MS: u64 = 2800;

pub struct SceneBuilder {
    rng: ChaCha8Rng,
}

impl SceneBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Build the full draw list for one tick
    pub fn build(
        &mut self,
        tick: u64,
        now: u64,
        state: &MatchState,
        player: &Fighter,
        enemy: &Fighter,
        fx: &mut Effects,
    ) -> Scene {
        let mut out = Vec::with_capacity(160);
        let shake = fx.shake_offset(now);

        self.background(&mut out);
        self.health_bars(&mut out, now, state, fx);
        self.round_timer(&mut out, now, state);
        self.fighters(&mut out, now, player, enemy, shake);
        self.sparks(&mut out, fx);
        self.overlays(&mut out, now, state);

        Scene {
            tick,
            primitives: out,
        }
    }

    fn background(&mut self, out: &mut Vec<DrawPrimitive>) {
        fill_rect(out, 0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT, Color(20, 20, 30));

        // Floor bands
        fill_rect(out, 0.0, 420.0, ARENA_WIDTH, 200.0, Color(40, 40, 60));
        fill_rect(out, 0.0, 470.0, ARENA_WIDTH, 150.0, Color(70, 70, 100));

        // Stage lights
        for i in 0..10 {
            circle(out, 100.0 + i as f32 * 90.0, 80.0, 8.0, Color(255, 255, 80));
        }

        // Crowd silhouettes
        for i in 0..60 {
            let cx = i as f32 * 18.0;
            let cy = 360.0 + self.rng.gen_range(-5..=5) as f32;
            fill_rect(out, cx, cy, 12.0, 40.0, Color(10, 10, 10));
        }

        // Neon board
        fill_rect(out, 250.0, 150.0, 500.0, 80.0, BLACK);
        out.push(DrawPrimitive::Rect {
            x: 255.0,
            y: 155.0,
            w: 490.0,
            h: 70.0,
            color: RED,
            corner_radius: 0.0,
            stroke_width: Some(4.0),
        });
        text(out, 320.0, 170.0, "AI EXPO FIGHT NIGHT", 35, YELLOW);
    }

    fn health_bars(
        &mut self,
        out: &mut Vec<DrawPrimitive>,
        now: u64,
        state: &MatchState,
        fx: &Effects,
    ) {
        let player_color = if fx.player_flash(now) { PLAYER_FLASH } else { GREEN };
        let enemy_color = if fx.enemy_flash(now) { YELLOW } else { RED };

        health_bar(out, 50.0, 40.0, state.player_hp, player_color);
        health_bar(out, ARENA_WIDTH - 350.0, 40.0, state.enemy_hp, enemy_color);
    }

    fn round_timer(&mut self, out: &mut Vec<DrawPrimitive>, now: u64, state: &MatchState) {
        // Display only; the round never ends on time
        let elapsed_secs = now.saturating_sub(state.round_start) / 1000;
        let remaining = ROUND_SECONDS.saturating_sub(elapsed_secs);
        text(
            out,
            ARENA_WIDTH / 2.0 - 20.0,
            40.0,
            &remaining.to_string(),
            35,
            WHITE,
        );
    }

    fn fighters(
        &mut self,
        out: &mut Vec<DrawPrimitive>,
        now: u64,
        player: &Fighter,
        enemy: &Fighter,
        shake: Vec2,
    ) {
        if enemy.anim == AnimState::Ko {
            ko_slab(out, enemy.pos, shake);
        } else {
            fighter(out, now, enemy, shake);
        }

        if player.anim == AnimState::Ko {
            ko_slab(out, player.pos, shake);
        } else {
            fighter(out, now, player, shake);
        }
    }

    fn sparks(&mut self, out: &mut Vec<DrawPrimitive>, fx: &Effects) {
        for s in fx.sparks() {
            circle(out, s.pos.x, s.pos.y, 4.0, YELLOW);
            circle(out, s.pos.x, s.pos.y, 2.0, Color(255, 120, 0));
        }
    }

    fn overlays(&mut self, out: &mut Vec<DrawPrimitive>, now: u64, state: &MatchState) {
        if state.combo >= 2 && !state.game_over {
            text(
                out,
                ARENA_WIDTH / 2.0 - 140.0,
                120.0,
                &format!("{} HIT COMBO!", state.combo),
                35,
                YELLOW,
            );
        }

        let intro_elapsed = now.saturating_sub(state.intro_start);
        if intro_elapsed < INTRO_ROUND_MS {
            text(
                out,
                ARENA_WIDTH / 2.0 - 140.0,
                ARENA_HEIGHT / 2.0 - 160.0,
                "ROUND 1",
                60,
                YELLOW,
            );
        } else if intro_elapsed < INTRO_FIGHT_MS {
            text(
                out,
                ARENA_WIDTH / 2.0 - 180.0,
                ARENA_HEIGHT / 2.0 - 140.0,
                "FIGHT!",
                90,
                RED,
            );
        }

        if state.game_over {
            text(
                out,
                ARENA_WIDTH / 2.0 - 130.0,
                ARENA_HEIGHT / 2.0 - 140.0,
                "K.O!",
                90,
                YELLOW,
            );
            let label = match state.winner {
                Winner::Player => "PLAYER WINS!",
                Winner::Enemy => "ENEMY WINS!",
                Winner::None => "",
            };
            text(
                out,
                ARENA_WIDTH / 2.0 - 120.0,
                ARENA_HEIGHT / 2.0 - 40.0,
                label,
                35,
                WHITE,
            );
            text(
                out,
                ARENA_WIDTH / 2.0 - 170.0,
                ARENA_HEIGHT / 2.0 + 40.0,
                "Press R to Restart",
                35,
                WHITE,
            );
        }
    }
}

fn health_bar(out: &mut Vec<DrawPrimitive>, x: f32, y: f32, hp: u32, color: Color) {
    let fill = (hp as f32 / 100.0 * HEALTH_BAR_WIDTH).clamp(0.0, HEALTH_BAR_WIDTH);
    fill_rect(out, x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, Color(40, 40, 40));
    fill_rect(out, x, y, fill, HEALTH_BAR_HEIGHT, color);
    out.push(DrawPrimitive::Rect {
        x,
        y,
        w: HEALTH_BAR_WIDTH,
        h: HEALTH_BAR_HEIGHT,
        color: WHITE,
        corner_radius: 0.0,
        stroke_width: Some(3.0),
    });
}

/// Fallen-fighter slab shown in place of a KO'd fighter
fn ko_slab(out: &mut Vec<DrawPrimitive>, pos: Vec2, shake: Vec2) {
    let (sx, sy) = (shake.x, shake.y);
    fill_rect(out, pos.x - 90.0 + sx, pos.y - 50.0 + sy, 180.0, 40.0, BLACK);
    fill_rect(out, pos.x - 85.0 + sx, pos.y - 45.0 + sy, 170.0, 30.0, RED);
}

/// Arcade-style fighter composed from shapes; `pos` is the feet position
fn fighter(out: &mut Vec<DrawPrimitive>, now: u64, f: &Fighter, shake: Vec2) {
    let (body_color, glove_color, punch_dir) = match f.role {
        Role::Player => (PLAYER_BODY, PLAYER_GLOVE, 1.0),
        Role::Enemy => (ENEMY_BODY, ENEMY_GLOVE, -1.0),
    };
    let (sx, sy) = (shake.x, shake.y);
    let x = f.pos.x;

    // Idle bounce, with a slump on hit
    let mut bounce = 6.0 * (now as f32 / 1000.0 * 6.0).sin();
    if f.anim == AnimState::Hit {
        bounce += 5.0;
    }
    let y = f.pos.y + bounce;

    let head_r = 22.0;
    let body_w = 50.0;
    let body_h = 90.0;

    let head_x = x;
    let head_y = y - 150.0;
    let body_x = x - body_w / 2.0;
    let body_y = y - 130.0;

    // Head with outline
    circle(out, head_x + sx, head_y + sy, head_r + 4.0, BLACK);
    circle(out, head_x + sx, head_y + sy, head_r, SKIN);

    // Hair
    out.push(DrawPrimitive::Polygon {
        points: vec![
            Vec2::new(head_x - 20.0 + sx, head_y - 15.0 + sy),
            Vec2::new(head_x + 20.0 + sx, head_y - 15.0 + sy),
            Vec2::new(head_x + 10.0 + sx, head_y - 35.0 + sy),
            Vec2::new(head_x - 10.0 + sx, head_y - 35.0 + sy),
        ],
        color: Color(20, 20, 20),
    });

    // Body with outline
    rounded_rect(
        out,
        body_x - 4.0 + sx,
        body_y - 4.0 + sy,
        body_w + 8.0,
        body_h + 8.0,
        12.0,
        BLACK,
    );
    rounded_rect(out, body_x + sx, body_y + sy, body_w, body_h, 12.0, body_color);

    // Belt
    fill_rect(out, body_x + sx, body_y + 55.0 + sy, body_w, 12.0, BLACK);
    fill_rect(
        out,
        body_x + 10.0 + sx,
        body_y + 57.0 + sy,
        body_w - 20.0,
        8.0,
        YELLOW,
    );

    // Legs
    let leg_color = Color(30, 30, 30);
    outlined_line(out, x - 15.0 + sx, y - 40.0 + sy, x - 30.0 + sx, y + sy, leg_color);
    outlined_line(out, x + 15.0 + sx, y - 40.0 + sy, x + 30.0 + sx, y + sy, leg_color);

    // Shoes
    ellipse(out, x - 42.0 + sx, y - 10.0 + sy, 30.0, 15.0, BLACK);
    ellipse(out, x - 40.0 + sx, y - 9.0 + sy, 26.0, 12.0, WHITE);
    ellipse(out, x + 12.0 + sx, y - 10.0 + sy, 30.0, 15.0, BLACK);
    ellipse(out, x + 14.0 + sx, y - 9.0 + sy, 26.0, 12.0, WHITE);

    // Arms: hand targets depend on animation state
    let arm_y = body_y + 30.0;
    let mut left_hand = Vec2::new(x - 50.0, arm_y + 20.0);
    let mut right_hand = Vec2::new(x + 50.0, arm_y + 20.0);

    match f.anim {
        AnimState::Block => {
            left_hand = Vec2::new(x - 20.0, head_y + 10.0);
            right_hand = Vec2::new(x + 20.0, head_y + 10.0);
        }
        AnimState::Punch => {
            right_hand = Vec2::new(x + 120.0 * punch_dir, arm_y + 10.0);
            // Punch trail glow
            ellipse(
                out,
                right_hand.x - 40.0 + sx,
                right_hand.y - 20.0 + sy,
                80.0,
                40.0,
                YELLOW,
            );
        }
        AnimState::Hit => {
            left_hand = Vec2::new(x - 60.0, arm_y + 40.0);
            right_hand = Vec2::new(x + 60.0, arm_y + 40.0);
        }
        AnimState::Idle | AnimState::Ko => {}
    }

    // Arm lines with outline
    line(out, x - 20.0 + sx, arm_y + sy, left_hand.x + sx, left_hand.y + sy, 12.0, BLACK);
    line(out, x - 20.0 + sx, arm_y + sy, left_hand.x + sx, left_hand.y + sy, 7.0, SKIN);
    line(out, x + 20.0 + sx, arm_y + sy, right_hand.x + sx, right_hand.y + sy, 12.0, BLACK);
    line(out, x + 20.0 + sx, arm_y + sy, right_hand.x + sx, right_hand.y + sy, 7.0, SKIN);

    // Gloves
    circle(out, left_hand.x + sx, left_hand.y + sy, 18.0, BLACK);
    circle(out, left_hand.x + sx, left_hand.y + sy, 14.0, glove_color);
    circle(out, right_hand.x + sx, right_hand.y + sy, 18.0, BLACK);
    circle(out, right_hand.x + sx, right_hand.y + sy, 14.0, glove_color);

    // Chest highlights
    fill_rect(out, body_x + 8.0 + sx, body_y + 15.0 + sy, 10.0, 40.0, WHITE);
    fill_rect(out, body_x + 32.0 + sx, body_y + 15.0 + sy, 10.0, 40.0, WHITE);
}

fn fill_rect(out: &mut Vec<DrawPrimitive>, x: f32, y: f32, w: f32, h: f32, color: Color) {
    out.push(DrawPrimitive::Rect {
        x,
        y,
        w,
        h,
        color,
        corner_radius: 0.0,
        stroke_width: None,
    });
}

fn rounded_rect(out: &mut Vec<DrawPrimitive>, x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    out.push(DrawPrimitive::Rect {
        x,
        y,
        w,
        h,
        color,
        corner_radius: r,
        stroke_width: None,
    });
}

fn circle(out: &mut Vec<DrawPrimitive>, cx: f32, cy: f32, radius: f32, color: Color) {
    out.push(DrawPrimitive::Circle {
        cx,
        cy,
        radius,
        color,
    });
}

fn ellipse(out: &mut Vec<DrawPrimitive>, x: f32, y: f32, w: f32, h: f32, color: Color) {
    out.push(DrawPrimitive::Ellipse { x, y, w, h, color });
}

fn line(out: &mut Vec<DrawPrimitive>, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
    out.push(DrawPrimitive::Line {
        x1,
        y1,
        x2,
        y2,
        width,
        color,
    });
}

fn outlined_line(out: &mut Vec<DrawPrimitive>, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
    line(out, x1, y1, x2, y2, 10.0, BLACK);
    line(out, x1, y1, x2, y2, 6.0, color);
}

fn text(out: &mut Vec<DrawPrimitive>, x: f32, y: f32, s: &str, size: u32, color: Color) {
    out.push(DrawPrimitive::Text {
        x,
        y,
        text: s.to_string(),
        size,
        bold: true,
        color,
    });
}
