//! Merge Shell entry point
//!
//! Native demo host: drives one session against the in-process demo engine on
//! a virtual clock, playing the part of the windowing system.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use merge_shell::engine::{DemoEngine, SurfaceHandle};
use merge_shell::input::{KeyCode, KeyEvent};
use merge_shell::platform::{DeviceCapabilities, DisplayRotation};
use merge_shell::session::{DialogButton, LaunchContext, MenuItem, SessionController};
use merge_shell::{LifecyclePhase, Settings, Theme};

/// Host frame period
const FRAME: Duration = Duration::from_millis(16);
/// Simulated play time before the host backgrounds the app
const PLAY_TIME: Duration = Duration::from_secs(30);
const SEED: u64 = 2050;

fn main() -> ExitCode {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("merge-shell.json"));
    let mut settings = Settings::load(&settings_path);
    if !settings_path.exists() {
        if let Err(e) = settings.save(&settings_path) {
            log::warn!("Could not write default settings: {}", e);
        }
    }
    if let Some(theme) = std::env::var("MERGE_SHELL_THEME")
        .ok()
        .and_then(|t| Theme::from_str(&t))
    {
        settings.theme = theme;
    }
    log::info!("Merge Shell (native) starting, theme {}", settings.theme.as_str());

    let launch = LaunchContext {
        asset_source: PathBuf::from("assets"),
        data_dir: std::env::current_dir().ok(),
        display_rotation: std::env::var("MERGE_SHELL_ROTATION")
            .ok()
            .and_then(|d| d.parse().ok())
            .map(DisplayRotation::from_degrees)
            .unwrap_or_default(),
    };
    let mut session = match SessionController::create(
        DemoEngine::new(SEED),
        &settings,
        DeviceCapabilities::default(),
        launch,
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&mut session) {
        log::error!("Session error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(session: &mut SessionController<DemoEngine>) -> Result<(), merge_shell::SessionError> {
    let mut input = Pcg32::seed_from_u64(SEED ^ 0xF11E);
    let surface = SurfaceHandle(1);

    session.on_surface_created(surface);
    session.resume()?;
    session.on_surface_changed(surface);
    session.on_focus_changed(true);

    let mut last_score = 0;
    while session.now() < PLAY_TIME {
        session.advance(FRAME);
        session.process_engine_events();

        for popup in session.take_popups() {
            println!(
                "  [{}] {} (ball {}, text {})",
                popup.ball_number, popup.text, popup.ball_color, popup.text_color
            );
        }

        if let Some(dialog) = session.active_dialog() {
            println!("== {} ==", dialog.title());
            if let Some(msg) = dialog.message() {
                println!("{}", msg);
            }
            // Auto-answer: keep playing when allowed, otherwise start over
            let button = if dialog.buttons().contains(&DialogButton::Continue) {
                DialogButton::Continue
            } else {
                DialogButton::NewGame
            };
            println!("> {}", dialog.button_label(button));
            session.press_dialog_button(button);
        }

        if input.random_bool(0.05) {
            let key = match input.random_range(0..4) {
                0 => KeyCode::DpadUp,
                1 => KeyCode::DpadDown,
                2 => KeyCode::DpadLeft,
                _ => KeyCode::DpadRight,
            };
            session.on_key(KeyEvent::down(key));
            session.on_key(KeyEvent::repeat(key, 1));
            session.on_key(KeyEvent::up(key));
        } else if input.random_bool(0.02) {
            session.on_fling(input.random_range(-800.0..800.0), input.random_range(-800.0..800.0));
        }

        if let (Some(data), Some(color)) = (session.snapshot(), session.gauge_color()) {
            if data.score / 100 != last_score / 100 {
                println!(
                    "t={:>5}ms score {:>5} best {:>5} pressure {:>3}% gauge {}",
                    session.now().as_millis(),
                    data.score,
                    data.high_score,
                    data.pressure,
                    color
                );
            }
            last_score = data.score;
        }
    }

    // Mid-game pause through the menu, then background the app
    session.on_menu_item(MenuItem::Pause);
    session.cancel_dialog();
    session.on_focus_changed(false);
    session.pause()?;
    session.stop()?;
    session.on_surface_destroyed();
    session.destroy()?;
    debug_assert_eq!(session.phase(), LifecyclePhase::Destroyed);

    log::info!(
        "Session ended after {} polls, {} engine calls",
        session.poll_ticks(),
        session.engine().calls().len()
    );
    Ok(())
}
