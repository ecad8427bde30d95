use crate::error::GameResult;
use crate::render::{Canvas, Paint, Rect, Sprite};

use super::game_over::{draw_final_score, end_screen_transition};
use super::{draw_lines, GameContext, Screen, ScreenId, Transition};

const JUMP_HEIGHT: f32 = 25.0;
const JUMP_STEP: f32 = 1.5;

/// Victory screen with the player hopping in celebration.
#[derive(Debug)]
pub struct GameClearScreen {
    jump_offset: f32,
    /// +1 rising, -1 falling.
    jump_direction: f32,
}

impl Default for GameClearScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClearScreen {
    pub fn new() -> Self {
        Self {
            jump_offset: 0.0,
            jump_direction: 1.0,
        }
    }

    pub fn jump_offset(&self) -> f32 {
        self.jump_offset
    }
}

impl Screen for GameClearScreen {
    fn id(&self) -> ScreenId {
        ScreenId::GameClear
    }

    fn enter(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        *self = Self::new();
        ctx.input.clear_presses();
        Ok(())
    }

    fn update(&mut self, _dt: f32, ctx: &mut GameContext) -> GameResult<Transition> {
        self.jump_offset += JUMP_STEP * self.jump_direction;
        if self.jump_offset >= JUMP_HEIGHT {
            self.jump_offset = JUMP_HEIGHT;
            self.jump_direction = -1.0;
        } else if self.jump_offset <= 0.0 {
            self.jump_offset = 0.0;
            self.jump_direction = 1.0;
        }

        Ok(end_screen_transition(ctx))
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()> {
        let cfg = &ctx.config;
        let (w, h) = (cfg.canvas.width, cfg.canvas.height);

        draw_lines(canvas, ctx, h * 0.15, &[("GAME CLEAR!", Paint::Gold)]);
        canvas.draw_sprite(
            Sprite::PlayerFront,
            Rect::centered(
                w / 2.0,
                h * 0.35 - self.jump_offset,
                cfg.player.width,
                cfg.player.height,
            ),
            0,
        );
        draw_final_score(canvas, ctx, h * 0.55);
        Ok(())
    }
}
