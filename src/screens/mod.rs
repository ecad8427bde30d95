//! Screen state machine.
//!
//! Exactly one screen is current. The game loop calls `exit` on the old
//! screen and `enter` on the new one on every switch; screens ask for a
//! switch by returning a [`Transition`] from `update`.

mod game;
mod game_clear;
mod game_over;
mod instructions;
mod title;

pub use game::GameScreen;
pub use game_clear::GameClearScreen;
pub use game_over::GameOverScreen;
pub use instructions::InstructionsScreen;
pub use title::TitleScreen;

use std::fmt;

use crate::audio::Audio;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::InputState;
use crate::render::{Canvas, Paint};
use crate::score::ScoreManager;
use crate::snapshot::HudSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Title,
    Instructions,
    Game,
    GameOver,
    GameClear,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenId::Title => "title",
            ScreenId::Instructions => "instructions",
            ScreenId::Game => "game",
            ScreenId::GameOver => "gameOver",
            ScreenId::GameClear => "gameClear",
        };
        f.write_str(name)
    }
}

/// What the current screen wants after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Switch(ScreenId),
    Quit,
}

/// State shared by every screen.
pub struct GameContext {
    pub config: GameConfig,
    pub input: InputState,
    pub score: ScoreManager,
    pub audio: Box<dyn Audio>,
}

impl GameContext {
    pub fn new(config: GameConfig, score: ScoreManager, audio: Box<dyn Audio>) -> Self {
        Self {
            config,
            input: InputState::new(),
            score,
            audio,
        }
    }
}

pub trait Screen {
    fn id(&self) -> ScreenId;

    /// Called once when this screen becomes current.
    fn enter(&mut self, _ctx: &mut GameContext) -> GameResult<()> {
        Ok(())
    }

    /// Called once when another screen replaces this one.
    fn exit(&mut self, _ctx: &mut GameContext) -> GameResult<()> {
        Ok(())
    }

    /// One fixed simulation step of `dt` seconds.
    fn update(&mut self, dt: f32, ctx: &mut GameContext) -> GameResult<Transition>;

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()>;

    fn snapshot(&self, _hud: &mut HudSnapshot) {}
}

/// Every screen the game ships with.
pub fn default_screens(seed: Option<u64>) -> Vec<Box<dyn Screen>> {
    vec![
        Box::new(TitleScreen::new()),
        Box::new(InstructionsScreen::new()),
        Box::new(GameScreen::new(seed)),
        Box::new(GameOverScreen::new()),
        Box::new(GameClearScreen::new()),
    ]
}

/// Draw `lines` centred on the playfield, starting at `top`.
fn draw_lines(canvas: &mut dyn Canvas, ctx: &GameContext, top: f32, lines: &[(&str, Paint)]) {
    let cx = ctx.config.canvas.width / 2.0;
    for (i, (text, paint)) in lines.iter().enumerate() {
        canvas.fill_text(text, cx, top + i as f32 * 30.0, *paint);
    }
}
