use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use invaders::audio::{Audio, LoggedAudio};
use invaders::config::GameConfig;
use invaders::display::TerminalCanvas;
use invaders::game_loop::Game;
use invaders::input::Key;
use invaders::score::{FileStore, ScoreManager};
use invaders::screens::{default_screens, GameContext, ScreenId};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser, Debug)]
#[command(name = "invaders")]
#[command(about = "Terminal formation shooter")]
struct Args {
    /// TOML file overriding any of the built-in settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for UFO edges and enemy fire; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// The terminal is in raw mode, so logs go to this file
    #[arg(long, default_value = "invaders.log")]
    log_file: PathBuf,
    /// Directory holding the high-score file (defaults to $HOME)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Start with sound cues muted
    #[arg(long)]
    mute: bool,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
/// Movement only needs to bridge the OS repeat interval; fire must also
/// bridge the initial repeat delay (≈500 ms), or a charge would restart.
const MOVE_HOLD_WINDOW: u64 = 8;
const FIRE_HOLD_WINDOW: u64 = 36;

/// Returns true if any of `codes` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, codes: &[KeyCode], frame: u64, window: u64) -> bool {
    codes.iter().any(|code| {
        key_frame
            .get(code)
            .map(|&last| frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    })
}

/// Keys that act once per press.
fn menu_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Enter => Some(Key::Confirm),
        KeyCode::Esc => Some(Key::Back),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Key::Instructions),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Retry),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Key::Title),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::Mute),
        _ => None,
    }
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_game(args: &Args) -> Result<Game> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path).unwrap_or_else(|e| {
            warn!("{e}; using built-in defaults");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    let store = match &args.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_home(),
    };
    let score = ScoreManager::new(Box::new(store), config.score.store_key.clone());

    let mut audio = LoggedAudio::new(&config.audio);
    if args.mute {
        audio.toggle_mute();
    }

    let ctx = GameContext::new(config, score, Box::new(audio));
    Game::with_screens(ctx, default_screens(args.seed)).context("could not open the title screen")
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    let mut game = build_game(&args)?;
    info!(seed = ?args.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &mut game, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        score = game.context().score.score(),
        high_score = game.context().score.high_score(),
        "exiting"
    );
    result
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Input model: held keys are tracked in a `key_frame` map holding the frame
/// each key was last seen, as in a classic terminal only `Press` events
/// arrive. With keyboard enhancement, `Release` removes a key at once and
/// the windows never expire it.
fn run<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> Result<()> {
    let (width, height) = terminal::size()?;
    let field = &game.context().config.canvas;
    let mut canvas = TerminalCanvas::new(width, height, field.width, field.height);

    let (move_window, fire_window) = if keyboard_enhanced {
        (u64::MAX, u64::MAX)
    } else {
        (MOVE_HOLD_WINDOW, FIRE_HOLD_WINDOW)
    };

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let clock = Instant::now();
    game.start(clock.elapsed());

    while game.is_running() {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            return Ok(());
                        }
                        if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                            if game.current_screen() != Some(ScreenId::Title) {
                                return Ok(());
                            }
                            game.set_key(Key::Quit, true);
                            game.set_key(Key::Quit, false);
                        }
                        if let Some(key) = menu_key(code) {
                            game.set_key(key, true);
                            game.set_key(key, false);
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(w, h) => canvas.resize(w, h),
                _ => {}
            }
        }

        // ── Apply held-key state every frame ──────────────────────────────────
        let left = is_held(&key_frame, &LEFT_KEYS, frame, move_window);
        let right = is_held(&key_frame, &RIGHT_KEYS, frame, move_window);
        let fire = is_held(&key_frame, &FIRE_KEYS, frame, fire_window);
        game.set_key(Key::Left, left);
        game.set_key(Key::Right, right);
        game.set_key(Key::Fire, fire);

        game.frame(clock.elapsed(), &mut canvas);
        canvas
            .present(out, &game.snapshot())
            .context("could not draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}
