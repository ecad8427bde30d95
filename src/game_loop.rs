//! Fixed-timestep driver and screen switching.
//!
//! The host calls [`Game::frame`] at whatever cadence it repaints with.
//! Elapsed wall time is accumulated and drained in fixed 1/60 s steps, so
//! the simulation advances identically however the frames are spaced; the
//! current screen is rendered once per frame after the steps.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::{GameError, GameResult};
use crate::input::Key;
use crate::render::{Canvas, Paint};
use crate::screens::{GameContext, Screen, ScreenId, Transition};
use crate::snapshot::HudSnapshot;

pub const STEPS_PER_SECOND: u32 = 60;
pub const FIXED_DT: f32 = 1.0 / STEPS_PER_SECOND as f32;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Step accumulator kept in nanoseconds × steps-per-second, so any split
/// of the same total time yields exactly `floor(total / step)` steps.
#[derive(Debug, Default, Clone)]
pub struct FixedStep {
    scaled: u128,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, delta: Duration) {
        self.scaled += delta.as_nanos() * u128::from(STEPS_PER_SECOND);
    }

    /// Take one step off the accumulator if a whole one is available.
    pub fn next_step(&mut self) -> bool {
        if self.scaled >= NANOS_PER_SECOND {
            self.scaled -= NANOS_PER_SECOND;
            true
        } else {
            false
        }
    }

    pub fn step_duration() -> Duration {
        Duration::from_secs(1) / STEPS_PER_SECOND
    }
}

pub struct Game {
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    current: Option<ScreenId>,
    ctx: GameContext,
    running: bool,
    last_time: Option<Duration>,
    clock: FixedStep,
    notice: Option<String>,
    muted: bool,
    steps: u64,
}

impl Game {
    pub fn new(ctx: GameContext) -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            ctx,
            running: false,
            last_time: None,
            clock: FixedStep::new(),
            notice: None,
            muted: false,
            steps: 0,
        }
    }

    /// A game with every screen registered, showing the title.
    pub fn with_screens(ctx: GameContext, screens: Vec<Box<dyn Screen>>) -> GameResult<Self> {
        let mut game = Self::new(ctx);
        for screen in screens {
            game.add_screen(screen);
        }
        game.switch_screen(ScreenId::Title)?;
        Ok(game)
    }

    pub fn add_screen(&mut self, screen: Box<dyn Screen>) {
        self.screens.insert(screen.id(), screen);
    }

    /// Exit the current screen, enter `id`, then make it current. An
    /// unregistered `id` leaves the current screen in place and raises a
    /// notice for the player. If `id` fails to enter, the previous screen
    /// is entered again; a screen that never finished entering is never
    /// updated or rendered.
    pub fn switch_screen(&mut self, id: ScreenId) -> GameResult<()> {
        if !self.screens.contains_key(&id) {
            let err = GameError::UnknownScreen { id };
            warn!("{err}");
            self.notice = Some(format!("Cannot open screen: {id}"));
            return Err(err);
        }

        let from = self.current;
        if let Some(old) = from.and_then(|c| self.screens.get_mut(&c)) {
            if let Err(e) = old.exit(&mut self.ctx) {
                warn!(screen = %old.id(), "exit failed: {e}");
            }
        }

        let entered = match self.screens.get_mut(&id) {
            Some(new) => new.enter(&mut self.ctx),
            None => Ok(()),
        };
        if let Err(e) = entered {
            warn!(screen = %id, "enter failed: {e}");
            self.notice = Some(format!("Cannot open screen: {id}"));
            self.current = None;
            if let Some(old) = from.and_then(|c| self.screens.get_mut(&c)) {
                match old.enter(&mut self.ctx) {
                    Ok(()) => self.current = from,
                    Err(re) => warn!(screen = %old.id(), "re-enter failed: {re}"),
                }
            }
            return Err(e);
        }

        self.current = Some(id);
        self.notice = None;
        info!(from = ?from, to = %id, "screen switched");
        Ok(())
    }

    pub fn start(&mut self, now: Duration) {
        self.running = true;
        self.last_time = Some(now);
        info!("game loop started");
    }

    pub fn stop(&mut self) {
        if self.running {
            info!(steps = self.steps, "game loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One host frame at time `now`. Runs every fixed step that fits in the
    /// time since the previous frame, then renders. Returns the number of
    /// steps run.
    pub fn frame(&mut self, now: Duration, canvas: &mut dyn Canvas) -> u32 {
        if !self.running {
            return 0;
        }

        let delta = self.last_time.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_time = Some(now);
        self.clock.accumulate(delta);

        let mut steps = 0;
        while self.running && self.clock.next_step() {
            self.step();
            steps += 1;
        }

        canvas.clear();
        if let Err(e) = self.render(canvas) {
            error!("render failed: {e}");
        }
        steps
    }

    /// A single fixed step, independent of wall time.
    pub fn step(&mut self) {
        self.steps += 1;
        self.ctx.input.advance(FixedStep::step_duration());

        if self.ctx.input.consume_press(Key::Mute) {
            self.muted = self.ctx.audio.toggle_mute();
        }

        let Some(id) = self.current else {
            return;
        };
        let Some(screen) = self.screens.get_mut(&id) else {
            return;
        };

        match screen.update(FIXED_DT, &mut self.ctx) {
            Ok(Transition::Stay) => {}
            Ok(Transition::Switch(next)) => {
                if let Err(e) = self.switch_screen(next) {
                    error!(from = %id, to = %next, "screen switch failed: {e}");
                }
            }
            Ok(Transition::Quit) => {
                info!(screen = %id, "quit requested");
                self.stop();
            }
            Err(e) => error!(screen = %id, "update failed: {e}"),
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) -> GameResult<()> {
        if let Some(screen) = self.current.and_then(|id| self.screens.get(&id)) {
            screen.render(canvas, &self.ctx)?;
        }
        if let Some(notice) = &self.notice {
            let cfg = &self.ctx.config.canvas;
            canvas.fill_text(notice, cfg.width / 2.0, cfg.height - 20.0, Paint::Red);
        }
        Ok(())
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.ctx.input.set_key(key, pressed);
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    pub fn current_screen(&self) -> Option<ScreenId> {
        self.current
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn snapshot(&self) -> HudSnapshot {
        let mut hud = HudSnapshot {
            screen: self.current,
            score: self.ctx.score.score(),
            high_score: self.ctx.score.high_score(),
            notice: self.notice.clone(),
            muted: self.muted,
            ..HudSnapshot::default()
        };
        if let Some(screen) = self.current.and_then(|id| self.screens.get(&id)) {
            screen.snapshot(&mut hud);
        }
        hud
    }
}
