//! Drawing surface the screens render onto.
//!
//! Coordinates are playfield pixels (origin top-left). A backend decides how
//! a sprite or rectangle actually looks; the simulation only says what sits
//! where.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    PlayerFront,
    Enemy,
    Ufo,
    Boss,
    Shuriken,
    SpecialShuriken,
    EnemyBullet,
    Rock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    White,
    Dim,
    Gold,
    Red,
    Yellow,
    Green,
    Cyan,
}

pub trait Canvas {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, frame: u8);
    /// Text centred horizontally on `x`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, paint: Paint);
    /// Partial ring, `progress` in `0.0..=1.0`.
    fn stroke_arc(&mut self, cx: f32, cy: f32, radius: f32, progress: f32, paint: Paint);
}
