use std::f32::consts::FRAC_PI_2;

use crate::config::GameConfig;
use crate::render::{Canvas, Paint, Rect, Sprite};

use super::{apply_damage, Animation, Bullet, BulletSpawner, Damageable, Entity, EntityId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    /// One rock straight down.
    Single,
    /// Three rocks fanned around straight down.
    Spread,
}

/// An attack on its own clock. Patterns never wait on each other.
#[derive(Clone, Debug)]
pub struct AttackPattern {
    pub kind: AttackKind,
    pub cooldown: f32,
    pub timer: f32,
}

#[derive(Debug, Clone)]
pub struct Boss {
    id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    speed: f32,
    direction: f32,
    health: i32,
    max_health: i32,
    points: u32,
    active: bool,
    entering: bool,
    entry_speed: f32,
    target_y: f32,
    spread_angle: f32,
    patterns: Vec<AttackPattern>,
    animation: Animation,
}

impl Boss {
    /// Starts fully above the screen and flies in to its resting altitude.
    pub fn new(id: EntityId, cfg: &GameConfig) -> Self {
        let b = &cfg.boss;
        Self {
            id,
            x: cfg.canvas.width / 2.0,
            y: -b.height,
            width: b.width,
            height: b.height,
            speed: b.speed,
            direction: 1.0,
            health: b.health,
            max_health: b.health,
            points: cfg.score.boss_kill,
            active: true,
            entering: true,
            entry_speed: b.entry_speed,
            target_y: cfg.canvas.height * b.rest_altitude,
            spread_angle: b.spread_angle,
            patterns: vec![
                AttackPattern {
                    kind: AttackKind::Single,
                    cooldown: b.single_cooldown,
                    timer: 0.0,
                },
                AttackPattern {
                    kind: AttackKind::Spread,
                    cooldown: b.spread_cooldown,
                    timer: b.spread_offset,
                },
            ],
            animation: Animation::new(2, 0.3),
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Still flying in; cannot be hit and does not attack.
    pub fn is_entering(&self) -> bool {
        self.entering
    }

    pub fn patterns(&self) -> &[AttackPattern] {
        &self.patterns
    }

    /// Skip the entry flight.
    pub fn finish_entry(&mut self) {
        self.y = self.target_y;
        self.entering = false;
    }

    pub fn update(&mut self, dt: f32, cfg: &GameConfig, spawner: &mut dyn BulletSpawner) {
        if self.entering {
            self.y += self.entry_speed * dt;
            if self.y >= self.target_y {
                self.finish_entry();
            }
            return;
        }

        self.x += self.direction * self.speed * dt;
        let half = self.width / 2.0;
        if (self.direction > 0.0 && self.x > cfg.canvas.width - half)
            || (self.direction < 0.0 && self.x < half)
        {
            self.direction = -self.direction;
        }

        let mut due = Vec::new();
        for pattern in &mut self.patterns {
            pattern.timer += dt;
            if pattern.timer >= pattern.cooldown {
                due.push(pattern.kind);
                pattern.timer = 0.0;
            }
        }
        for kind in due {
            self.attack(kind, cfg, spawner);
        }

        self.animation.advance(dt);
    }

    fn attack(&self, kind: AttackKind, cfg: &GameConfig, spawner: &mut dyn BulletSpawner) {
        let (x, y) = (self.x, self.y + self.height / 2.0);
        match kind {
            AttackKind::Single => {
                spawner.add_enemy_bullet(Bullet::rock(x, y, FRAC_PI_2, &cfg.bullet));
            }
            AttackKind::Spread => {
                for offset in [-self.spread_angle, 0.0, self.spread_angle] {
                    spawner.add_enemy_bullet(Bullet::rock(x, y, FRAC_PI_2 + offset, &cfg.bullet));
                }
            }
        }
    }
}

impl Entity for Boss {
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
        canvas.draw_sprite(
            Sprite::Boss,
            Rect::centered(self.x, self.y, self.width, self.height),
            self.animation.frame,
        );

        let bar_width = 100.0;
        let bar = Rect::new(
            self.x - bar_width / 2.0,
            self.y - self.height / 2.0 - 20.0,
            bar_width,
            10.0,
        );
        canvas.fill_rect(bar, Paint::Dim);

        let ratio = self.health as f32 / self.max_health.max(1) as f32;
        let paint = if ratio > 0.5 {
            Paint::Green
        } else if ratio > 0.2 {
            Paint::Yellow
        } else {
            Paint::Red
        };
        canvas.fill_rect(Rect { width: bar_width * ratio, ..bar }, paint);
    }
}

impl Damageable for Boss {
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
