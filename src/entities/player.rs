use std::time::Duration;

use tracing::debug;

use crate::audio::{Audio, SoundCue};
use crate::config::GameConfig;
use crate::input::{InputState, Key};
use crate::render::{Canvas, Paint, Rect, Sprite};

use super::{apply_damage, Animation, Bullet, BulletSpawner, Damageable, Entity, EntityId};

/// Fire-key state machine.
///
/// Holding fire with special uses left moves `Idle -> Charging`, and
/// `Charging -> Ready` once the hold reaches the charge threshold. Every
/// shot happens on release: a special one from `Ready`, a normal one
/// otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeState {
    Idle,
    Charging,
    Ready,
}

#[derive(Debug, Clone)]
pub struct Player {
    id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    speed: f32,
    health: i32,
    active: bool,

    /// Seconds until the next normal shot is allowed.
    cooldown: f32,
    /// Seconds the longer post-special cooldown stays in force.
    post_special: f32,

    charge: ChargeState,
    charge_time: Duration,
    charge_threshold: Duration,
    special_uses: u32,
    fire_held: bool,

    animation: Animation,
}

impl Player {
    pub fn new(id: EntityId, x: f32, y: f32, cfg: &GameConfig) -> Self {
        let p = &cfg.player;
        Self {
            id,
            x,
            y,
            width: p.width,
            height: p.height,
            speed: p.speed,
            health: p.health,
            active: true,
            cooldown: 0.0,
            post_special: 0.0,
            charge: ChargeState::Idle,
            charge_time: Duration::ZERO,
            charge_threshold: Duration::from_millis(p.charge_time_ms),
            special_uses: p.max_special_uses,
            fire_held: false,
            animation: Animation::new(4, 0.1),
        }
    }

    pub fn charge_state(&self) -> ChargeState {
        self.charge
    }

    pub fn special_uses(&self) -> u32 {
        self.special_uses
    }

    pub fn special_ready(&self) -> bool {
        self.charge == ChargeState::Ready
    }

    /// Charge progress in `0.0..=1.0`; zero while idle.
    pub fn charge_ratio(&self) -> f32 {
        if self.charge == ChargeState::Idle || self.charge_threshold.is_zero() {
            return 0.0;
        }
        (self.charge_time.as_secs_f32() / self.charge_threshold.as_secs_f32()).min(1.0)
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        cfg: &GameConfig,
        spawner: &mut dyn BulletSpawner,
        audio: &mut dyn Audio,
    ) {
        let mut dx = 0.0;
        if input.is_key_down(Key::Left) {
            dx -= self.speed * dt;
        }
        if input.is_key_down(Key::Right) {
            dx += self.speed * dt;
        }
        let half = self.width / 2.0;
        self.x = (self.x + dx).clamp(half, cfg.canvas.width - half);

        self.cooldown = (self.cooldown - dt).max(0.0);
        self.post_special = (self.post_special - dt).max(0.0);

        if input.is_key_down(Key::Fire) {
            self.fire_held = true;
            if self.special_uses > 0 {
                if self.charge == ChargeState::Idle {
                    self.charge = ChargeState::Charging;
                    audio.play(SoundCue::SpecialCharge, 0.5);
                }
                self.charge_time = input.key_pressed_time(Key::Fire);
                if self.charge == ChargeState::Charging && self.charge_time >= self.charge_threshold
                {
                    self.charge = ChargeState::Ready;
                    audio.play(SoundCue::SpecialCharge, 1.0);
                }
            }
        } else if self.fire_held {
            self.fire_held = false;
            if self.charge == ChargeState::Ready {
                self.shoot_special(cfg, spawner, audio);
            } else {
                self.shoot(cfg, spawner, audio);
            }
            self.charge = ChargeState::Idle;
            self.charge_time = Duration::ZERO;
        }

        self.animation.advance(dt);
    }

    fn muzzle(&self) -> (f32, f32) {
        (self.x, self.y - self.height / 2.0)
    }

    fn shoot(&mut self, cfg: &GameConfig, spawner: &mut dyn BulletSpawner, audio: &mut dyn Audio) {
        if !self.can_shoot() {
            return;
        }
        let (x, y) = self.muzzle();
        spawner.add_bullet(Bullet::normal(x, y, &cfg.bullet));
        audio.play(SoundCue::Shoot, 0.5);

        self.cooldown = if self.post_special > 0.0 {
            cfg.player.post_special_cooldown
        } else {
            cfg.player.shoot_cooldown
        };
    }

    fn shoot_special(
        &mut self,
        cfg: &GameConfig,
        spawner: &mut dyn BulletSpawner,
        audio: &mut dyn Audio,
    ) {
        let (x, y) = self.muzzle();
        spawner.add_bullet(Bullet::special(x, y, &cfg.bullet));
        audio.play(SoundCue::SpecialShoot, 0.8);

        self.special_uses = self.special_uses.saturating_sub(1);
        self.cooldown = cfg.player.post_special_cooldown;
        self.post_special = cfg.player.post_special_window;
        debug!(remaining = self.special_uses, "special shot fired");
    }
}

impl Entity for Player {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        if !self.active {
            return;
        }
        canvas.draw_sprite(
            Sprite::Player,
            Rect::centered(self.x, self.y, self.width, self.height),
            self.animation.frame,
        );

        if self.charge != ChargeState::Idle {
            let paint = if self.special_ready() {
                Paint::Gold
            } else {
                Paint::White
            };
            let bar_width = 50.0;
            let top = self.y + self.height / 2.0 + 10.0;
            canvas.fill_rect(Rect::new(self.x - bar_width / 2.0, top, bar_width, 5.0), Paint::Dim);
            canvas.fill_rect(
                Rect::new(self.x - bar_width / 2.0, top, bar_width * self.charge_ratio(), 5.0),
                paint,
            );
        }
    }
}

impl Damageable for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        apply_damage(&mut self.health, amount)
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}
