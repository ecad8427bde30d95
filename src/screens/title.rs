use crate::error::GameResult;
use crate::input::Key;
use crate::render::{Canvas, Paint, Rect, Sprite};

use super::{draw_lines, GameContext, Screen, ScreenId, Transition};

#[derive(Debug, Default)]
pub struct TitleScreen {
    /// Seconds on this screen; drives the blinking prompt.
    elapsed: f32,
}

impl TitleScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for TitleScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Title
    }

    fn enter(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        self.elapsed = 0.0;
        ctx.input.clear_presses();
        Ok(())
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) -> GameResult<Transition> {
        self.elapsed += dt;
        let input = &mut ctx.input;

        if input.consume_press(Key::Confirm) || input.consume_press(Key::Fire) {
            return Ok(Transition::Switch(ScreenId::Game));
        }
        if input.consume_press(Key::Instructions) {
            return Ok(Transition::Switch(ScreenId::Instructions));
        }
        if input.consume_press(Key::Quit) || input.consume_press(Key::Back) {
            return Ok(Transition::Quit);
        }
        Ok(Transition::Stay)
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()> {
        let (w, h) = (ctx.config.canvas.width, ctx.config.canvas.height);

        draw_lines(canvas, ctx, h * 0.2, &[("SPACE INVADERS", Paint::Cyan)]);
        canvas.draw_sprite(Sprite::PlayerFront, Rect::centered(w / 2.0, h * 0.4, 64.0, 96.0), 0);

        let best = format!("HIGH SCORE: {}", ctx.score.high_score());
        draw_lines(canvas, ctx, h * 0.55, &[(best.as_str(), Paint::Yellow)]);

        // Prompt blinks at 1 Hz.
        if self.elapsed.fract() < 0.5 {
            draw_lines(canvas, ctx, h * 0.65, &[("PRESS ENTER TO START", Paint::White)]);
        }
        draw_lines(
            canvas,
            ctx,
            h * 0.75,
            &[("H : HOW TO PLAY", Paint::Dim), ("Q : QUIT", Paint::Dim)],
        );
        Ok(())
    }
}
