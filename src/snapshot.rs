//! Read-only view of the running game for HUD overlays and tests.

use crate::screens::ScreenId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HudSnapshot {
    pub screen: Option<ScreenId>,
    pub score: u32,
    pub high_score: u32,
    pub charge_ratio: f32,
    pub charging: bool,
    pub special_ready: bool,
    pub special_uses: u32,
    pub enemies_left: usize,
    /// `(current, max)` while a boss is on the field.
    pub boss_health: Option<(i32, i32)>,
    pub boss_warning: bool,
    pub game_time: f32,
    /// Last error shown to the player, if any.
    pub notice: Option<String>,
    pub muted: bool,
}
