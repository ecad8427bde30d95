#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use invaders::audio::{Audio, SoundCue};
use invaders::config::GameConfig;
use invaders::render::{Canvas, Paint, Rect, Sprite};
use invaders::score::{MemoryStore, ScoreManager};
use invaders::screens::GameContext;

/// Audio backend that remembers every cue it was asked for.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub cues: Rc<RefCell<Vec<(SoundCue, f32)>>>,
    muted: bool,
}

impl RecordingAudio {
    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues.borrow().iter().filter(|(c, _)| *c == cue).count()
    }

    pub fn volumes(&self, cue: SoundCue) -> Vec<f32> {
        self.cues
            .borrow()
            .iter()
            .filter(|(c, _)| *c == cue)
            .map(|&(_, v)| v)
            .collect()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        if !self.muted {
            self.cues.borrow_mut().push((cue, volume));
        }
    }

    fn stop(&mut self, _cue: SoundCue) {}

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

/// Canvas that keeps a log of draw calls.
#[derive(Default)]
pub struct RecordingCanvas {
    pub clears: usize,
    pub sprites: Vec<(Sprite, Rect)>,
    pub texts: Vec<String>,
    pub rects: Vec<(Rect, Paint)>,
    pub arcs: usize,
}

impl RecordingCanvas {
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }

    pub fn sprite_count(&self, sprite: Sprite) -> usize {
        self.sprites.iter().filter(|(s, _)| *s == sprite).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.clears += 1;
        self.sprites.clear();
        self.texts.clear();
        self.rects.clear();
        self.arcs = 0;
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.rects.push((rect, paint));
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, _frame: u8) {
        self.sprites.push((sprite, rect));
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _paint: Paint) {
        self.texts.push(text.to_string());
    }

    fn stroke_arc(&mut self, _cx: f32, _cy: f32, _radius: f32, _progress: f32, _paint: Paint) {
        self.arcs += 1;
    }
}

/// Context backed by an in-memory score store and a recording audio sink.
pub fn context(config: GameConfig) -> (GameContext, RecordingAudio) {
    let audio = RecordingAudio::default();
    let score = ScoreManager::new(Box::new(MemoryStore::new()), config.score.store_key.clone());
    let ctx = GameContext::new(config, score, Box::new(audio.clone()));
    (ctx, audio)
}

pub const DT: f32 = 1.0 / 60.0;
