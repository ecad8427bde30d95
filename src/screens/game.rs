//! The in-game screen: one play session from a fresh grid to game over or
//! boss defeat.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::audio::SoundCue;
use crate::battlefield::Battlefield;
use crate::collision::{CollisionReport, CollisionSystem};
use crate::config::GameConfig;
use crate::entities::{ChargeState, Damageable, Entity, UfoSpawner};
use crate::error::GameResult;
use crate::formation::FormationSystem;
use crate::render::{Canvas, Paint};
use crate::snapshot::HudSnapshot;

use super::{GameContext, Screen, ScreenId, Transition};

/// Countdowns at or below this are treated as expired.
const TIMER_EPSILON: f32 = 1e-4;

pub struct GameScreen {
    rng: StdRng,
    field: Battlefield,
    formation: FormationSystem,
    ufo_spawner: UfoSpawner,
    collision: CollisionSystem,

    game_time: f32,
    collision_enabled: bool,
    game_over: bool,
    cleared: bool,
    boss_spawn_timer: Option<f32>,
    /// Screen switch waiting for its delay to run out.
    pending: Option<(ScreenId, f32)>,
}

impl GameScreen {
    /// `seed` makes every session reproducible; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            field: Battlefield::new(),
            formation: FormationSystem::new(),
            ufo_spawner: UfoSpawner::new(),
            collision: CollisionSystem::new(&GameConfig::default()),
            game_time: 0.0,
            collision_enabled: false,
            game_over: false,
            cleared: false,
            boss_spawn_timer: None,
            pending: None,
        }
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    pub fn formation(&self) -> &FormationSystem {
        &self.formation
    }

    pub fn ufo_spawner(&self) -> &UfoSpawner {
        &self.ufo_spawner
    }

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// The swarm is gone and the boss is on its way.
    pub fn boss_warning(&self) -> bool {
        self.boss_spawn_timer.is_some()
    }

    pub fn pending_transition(&self) -> Option<ScreenId> {
        self.pending.map(|(id, _)| id)
    }

    fn reset(&mut self, cfg: &GameConfig) {
        self.field.populate(cfg);
        self.formation.reset();
        self.ufo_spawner.reset();
        self.collision = CollisionSystem::new(cfg);
        self.game_time = 0.0;
        self.collision_enabled = false;
        self.game_over = false;
        self.cleared = false;
        self.boss_spawn_timer = None;
        self.pending = None;
    }

    fn schedule(&mut self, target: ScreenId, delay: f32) {
        if self.pending.is_none() {
            self.pending = Some((target, delay));
        }
    }

    fn trigger_game_over(&mut self, cfg: &GameConfig) {
        if self.game_over || self.cleared || self.game_time < cfg.timing.game_over_grace {
            return;
        }
        self.game_over = true;
        if let Some(player) = self.field.player.as_mut() {
            player.deactivate();
        }
        info!(time = self.game_time, "game over");
        self.schedule(ScreenId::GameOver, cfg.timing.transition_delay);
    }

    fn handle_report(&mut self, report: CollisionReport, cfg: &GameConfig) {
        if report.boss_defeated && !self.cleared && !self.game_over {
            self.cleared = true;
            info!(time = self.game_time, "game clear");
            self.schedule(ScreenId::GameClear, cfg.timing.transition_delay);
        }
        if report.game_over {
            self.trigger_game_over(cfg);
        }
    }

    fn enemy_fire(&mut self, cfg: &GameConfig) {
        let chance = cfg.enemy.shoot_probability.clamp(0.0, 1.0);
        let Battlefield {
            enemies, bullets, ..
        } = &mut self.field;
        for enemy in enemies.iter_mut() {
            if enemy.can_shoot() && self.rng.gen_bool(chance) {
                enemy.shoot(cfg, bullets);
            }
        }
    }

    fn update_boss_schedule(&mut self, dt: f32, cfg: &GameConfig) {
        if let Some(remaining) = self.boss_spawn_timer.as_mut() {
            *remaining -= dt;
            if *remaining <= TIMER_EPSILON {
                self.boss_spawn_timer = None;
                self.field.spawn_boss(cfg);
                info!("boss spawned");
            }
        }
    }

    fn tick_pending(&mut self, dt: f32) -> Transition {
        if let Some((target, remaining)) = self.pending.as_mut() {
            *remaining -= dt;
            if *remaining <= TIMER_EPSILON {
                let target = *target;
                self.pending = None;
                return Transition::Switch(target);
            }
        }
        Transition::Stay
    }

    fn check_game_state(&mut self, cfg: &GameConfig) {
        if self.field.enemies.is_empty()
            && self.field.boss.is_none()
            && self.boss_spawn_timer.is_none()
            && !self.cleared
            && !self.game_over
        {
            self.boss_spawn_timer = Some(cfg.boss.spawn_delay);
            info!(delay = cfg.boss.spawn_delay, "formation destroyed, boss incoming");
        }

        if !self.field.player_active() {
            self.trigger_game_over(cfg);
        }
    }
}

impl Screen for GameScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Game
    }

    fn enter(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        self.reset(&ctx.config);
        ctx.score.reset_score();
        ctx.input.clear_presses();
        info!(enemies = self.field.enemies.len(), "game started");
        Ok(())
    }

    fn exit(&mut self, ctx: &mut GameContext) -> GameResult<()> {
        ctx.audio.stop(SoundCue::SpecialCharge);
        Ok(())
    }

    fn update(&mut self, dt: f32, ctx: &mut GameContext) -> GameResult<Transition> {
        let GameContext {
            config: cfg,
            input,
            score,
            audio,
        } = ctx;
        let (width, height) = (cfg.canvas.width, cfg.canvas.height);

        // The session is settled; only the switch countdown keeps running.
        if self.game_over || self.cleared {
            return Ok(self.tick_pending(dt));
        }

        self.game_time += dt;
        if !self.collision_enabled && self.game_time >= cfg.collision.grace_period {
            self.collision_enabled = true;
        }

        if let Some(player) = self.field.player.as_mut().filter(|p| p.is_active()) {
            player.update(dt, input, cfg, &mut self.field.bullets, audio.as_mut());
        }

        if self.field.boss.is_none() {
            self.formation
                .update(dt, &mut self.field.enemies, &cfg.formation, width);
            if cfg.enemy.fire_enabled {
                self.enemy_fire(cfg);
            }

            let spawned = self.ufo_spawner.check_spawn(
                cfg,
                dt,
                self.field.ufo.as_ref(),
                &mut self.field.ids,
                &mut self.rng,
            );
            if spawned.is_some() {
                self.field.ufo = spawned;
            }
        }

        if let Some(ufo) = self.field.ufo.as_mut() {
            ufo.update(dt, width);
        }
        if self.field.ufo.as_ref().is_some_and(|u| !u.is_active()) {
            self.field.ufo = None;
        }

        if let Some(boss) = self.field.boss.as_mut() {
            boss.update(dt, cfg, &mut self.field.bullets);
        }

        self.field.bullets.update(dt, width, height);

        let report =
            self.collision
                .check_all(&mut self.field, self.collision_enabled, score, audio.as_mut());
        self.handle_report(report, cfg);

        self.update_boss_schedule(dt, cfg);
        self.check_game_state(cfg);

        Ok(self.tick_pending(dt))
    }

    fn render(&self, canvas: &mut dyn Canvas, ctx: &GameContext) -> GameResult<()> {
        let cfg = &ctx.config;

        for enemy in &self.field.enemies {
            enemy.render(canvas);
        }
        if let Some(ufo) = &self.field.ufo {
            ufo.render(canvas);
        }
        if let Some(boss) = &self.field.boss {
            boss.render(canvas);
        }
        for bullet in self.field.bullets.player.iter().chain(&self.field.bullets.enemy) {
            bullet.render(canvas);
        }

        if let Some(player) = self.field.player.as_ref().filter(|p| p.is_active()) {
            player.render(canvas);
            if player.charge_state() != ChargeState::Idle {
                let paint = if player.special_ready() {
                    Paint::Gold
                } else {
                    Paint::Cyan
                };
                canvas.stroke_arc(player.x, player.y, player.width, player.charge_ratio(), paint);
            }
        }

        if self.boss_warning() {
            // Flashes twice a second while the boss is on its way.
            if (self.game_time * 4.0).floor() as i64 % 2 == 0 {
                canvas.fill_text("WARNING", cfg.canvas.width / 2.0, cfg.canvas.height / 2.0, Paint::Red);
            }
        }
        Ok(())
    }

    fn snapshot(&self, hud: &mut HudSnapshot) {
        hud.game_time = self.game_time;
        hud.enemies_left = self.field.enemies.len();
        hud.boss_warning = self.boss_warning();
        hud.boss_health = self
            .field
            .boss
            .as_ref()
            .map(|b| (b.health(), b.max_health()));
        if let Some(player) = &self.field.player {
            hud.charge_ratio = player.charge_ratio();
            hud.charging = player.charge_state() == ChargeState::Charging;
            hud.special_ready = player.special_ready();
            hud.special_uses = player.special_uses();
        }
    }
}
