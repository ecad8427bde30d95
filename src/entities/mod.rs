//! Game entities.
//!
//! Every entity is a plain struct with a centre position and a size, plus a
//! per-tick `update` and a `render` onto a [`Canvas`]. Entities never score,
//! remove themselves or talk to the screen directly; projectiles leave
//! through a [`BulletSpawner`].

mod boss;
mod bullet;
mod enemy;
mod player;
mod ufo;

pub use boss::{AttackKind, AttackPattern, Boss};
pub use bullet::{Bullet, BulletKind};
pub use enemy::Enemy;
pub use player::{ChargeState, Player};
pub use ufo::{Edge, Ufo, UfoSpawner};

use crate::render::{Canvas, Rect};

/// Identity of a damageable target, unique within one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

pub trait Entity {
    /// Centre of the entity.
    fn position(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);
    fn is_active(&self) -> bool;
    fn render(&self, canvas: &mut dyn Canvas);

    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        let (w, h) = self.size();
        Rect::centered(x, y, w, h)
    }
}

/// Anything a bullet can hurt.
pub trait Damageable: Entity {
    fn id(&self) -> EntityId;
    fn health(&self) -> i32;
    /// Subtract `amount` from health (never below zero) and report whether
    /// this hit destroyed the target.
    fn take_damage(&mut self, amount: i32) -> bool;
    fn deactivate(&mut self);
}

/// The only way new projectiles enter play.
pub trait BulletSpawner {
    fn add_bullet(&mut self, bullet: Bullet);
    fn add_enemy_bullet(&mut self, bullet: Bullet);
}

/// Strict axis-aligned overlap; touching edges do not collide.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// `rect` scaled about its centre.
pub fn shrink(rect: Rect, factor: f32) -> Rect {
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;
    Rect::centered(cx, cy, rect.width * factor, rect.height * factor)
}

/// Shared body of every `take_damage`.
fn apply_damage(health: &mut i32, amount: i32) -> bool {
    *health = (*health - amount).max(0);
    *health == 0
}

/// Frame counter advanced on a fixed period.
#[derive(Debug, Clone)]
pub(crate) struct Animation {
    pub frame: u8,
    frames: u8,
    period: f32,
    timer: f32,
}

impl Animation {
    pub fn new(frames: u8, period: f32) -> Self {
        Self {
            frame: 0,
            frames: frames.max(1),
            period,
            timer: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer >= self.period {
            self.frame = (self.frame + 1) % self.frames;
            self.timer = 0.0;
        }
    }
}
