use crate::error::GameResult;
use crate::input::Key;
use crate::render::{Canvas, Paint};

use super::{draw_lines, GameContext, Screen, ScreenId, Transition};

#[derive(Debug, Default)]
pub struct GameOverScreen;

impl GameOverScreen {
    pub fn new() -> Self {
        Self
    }
}

/// Retry / back-to-title keys shared by both end screens.
pub(super) fn end_screen_transition(ctx: &mut GameContext) -> Transition {
    let input = &mut ctx.input;
    if input.consume_press(Key::Retry) || input.consume_press(Key::Confirm) {
        return Transition::Switch(ScreenId::Game);
    }
    if input.consume_press(Key::Title) || input.consume_press(Key::Back) {
        return Transition::Switch(ScreenId::Title);
    }
    Transition::Stay
}

/// Final score block shared by both end screens.
pub(super) fn draw_final_score(canvas: &mut dyn Canvas, ctx: &GameContext, top: f32) {
    let score = format!("SCORE: {}", ctx.score.score());
    let best = format!("HIGH SCORE: {}", ctx.score.high_score());
    let mut lines = vec![(score.as_str(), Paint::White), (best.as_str(), Paint::Yellow)];
    if ctx.score.is_new_high_score() {
        lines.push(("NEW HIGH SCORE!", Paint::Gold));
    }
    lines.push(("", Paint::White));
    lines.push(("R : RETRY   T : TITLE", Paint::Dim));
    draw_lines(canvas, ctx, top, &lines);
}

impl Screen for GameOverScreen {
    fn id(&self) -> ScreenId {
        ScreenId::GameOver
    }

    fn enter(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        ctx.input.clear_presses();
        Ok(())
    }

    fn update(&mut self, _dt: f32, ctx: &mut GameContext) -> GameResult<Transition> {
        Ok(end_screen_transition(ctx))
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()> {
        let h = ctx.config.canvas.height;
        draw_lines(canvas, ctx, h * 0.3, &[("GAME OVER", Paint::Red)]);
        draw_final_score(canvas, ctx, h * 0.45);
        Ok(())
    }
}
