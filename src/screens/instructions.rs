use crate::error::GameResult;
use crate::input::Key;
use crate::render::{Canvas, Paint};

use super::{draw_lines, GameContext, Screen, ScreenId, Transition};

#[derive(Debug, Default)]
pub struct InstructionsScreen;

impl InstructionsScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for InstructionsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Instructions
    }

    fn enter(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        ctx.input.clear_presses();
        Ok(())
    }

    fn update(&mut self, _dt: f32, ctx: &mut GameContext) -> GameResult<Transition> {
        let input = &mut ctx.input;
        if input.consume_press(Key::Back) || input.consume_press(Key::Confirm) {
            return Ok(Transition::Switch(ScreenId::Title));
        }
        Ok(Transition::Stay)
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()> {
        let cfg = &ctx.config;
        let charge = format!("HOLD FIRE {:.0}s : SPECIAL SHOT", cfg.player.charge_time_ms as f32 / 1000.0);
        let uses = format!("{} SPECIAL SHOTS PER GAME", cfg.player.max_special_uses);
        let points = format!(
            "ENEMY {}  UFO {}  BOSS {}",
            cfg.score.enemy_kill, cfg.score.ufo_kill, cfg.score.boss_kill
        );

        draw_lines(
            canvas,
            ctx,
            cfg.canvas.height * 0.15,
            &[
                ("HOW TO PLAY", Paint::Cyan),
                ("", Paint::White),
                ("LEFT / RIGHT : MOVE", Paint::White),
                ("SPACE : SHOOT", Paint::White),
                (charge.as_str(), Paint::Gold),
                (uses.as_str(), Paint::Gold),
                ("", Paint::White),
                (points.as_str(), Paint::Yellow),
                ("DEFEAT THE BOSS TO WIN", Paint::Yellow),
                ("", Paint::White),
                ("ESC : BACK", Paint::Dim),
            ],
        );
        Ok(())
    }
}
