//! Session controller
//!
//! Drives the engine through the host lifecycle, owns the HUD poll timer and
//! the single dialog slot, and routes input and engine callbacks.
//!
//! Lifecycle: `Created -> Resumed <-> Paused -> Stopped -> Destroyed`. A
//! stopped session may be resumed again and any live session may be
//! destroyed. Everything here runs on the UI thread; the engine reaches it
//! only through the event channel drained by `process_engine_events`.

pub mod dialog;

use std::path::PathBuf;
use std::time::Duration;

pub use dialog::{DialogButton, DialogKind, DialogOutcome};

use crate::achievement::{self, PopupDescriptor, PopupDuration};
use crate::color::Rgb;
use crate::consts::POLL_INTERVAL;
use crate::engine::{
    CreateRequest, EngineEvent, EngineHandle, EngineSnapshot, EventReceiver, SurfaceHandle,
    event_channel,
};
use crate::error::{ConfigError, SessionError};
use crate::gauge::pressure_percent;
use crate::input::{ImpulseMapper, ImpulseVector, KeyEvent};
use crate::platform::{DeviceCapabilities, DisplayRotation, resolve_storage_path};
use crate::settings::{Resources, Settings};
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Created,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

/// Requested screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
    /// Whatever the user's rotation setting allows
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: LifecyclePhase,
    pub gravity_mode: bool,
    pub orientation: Orientation,
    /// Tilt play has no touches to keep the screen awake
    pub keep_screen_on: bool,
    pub active_dialog: Option<DialogKind>,
}

/// Host facts needed to start a session
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchContext {
    pub asset_source: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub display_rotation: DisplayRotation,
}

/// Options menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Pause,
    NewGame,
    Fullscreen,
    Settings,
    Help,
}

/// Windowing work the controller hands back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    EnterFullscreen,
    OpenSettings,
    ShowHelp {
        gravity_mode: bool,
        duration: PopupDuration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    PollUiData,
}

pub struct SessionController<E: EngineHandle> {
    engine: E,
    state: SessionState,
    resources: Resources,
    mapper: ImpulseMapper,
    events: EventReceiver,
    timers: TimerQueue<Deferred>,
    /// At most one live poll
    poll_timer: Option<TimerId>,
    poll_ticks: u64,
    has_focus: bool,
    surface: Option<SurfaceHandle>,
    snapshot: Option<EngineSnapshot>,
    gauge_color: Option<Rgb>,
    popups: Vec<PopupDescriptor>,
}

impl<E: EngineHandle> SessionController<E> {
    /// Start a session and create the engine.
    ///
    /// Configuration problems are fatal here; an unresolvable data directory
    /// is not.
    pub fn create(
        mut engine: E,
        settings: &Settings,
        capabilities: DeviceCapabilities,
        launch: LaunchContext,
    ) -> Result<Self, ConfigError> {
        if launch.asset_source.as_os_str().is_empty() {
            return Err(ConfigError::MissingAssetPath);
        }
        let resources = Resources::from_settings(settings)?;

        let gravity_mode = settings.effective_gravity(&capabilities);
        if settings.gravity && !gravity_mode {
            log::warn!("Gravity mode requested without an accelerometer, using touch input");
        }
        let orientation = if gravity_mode {
            Orientation::Landscape
        } else {
            Orientation::User
        };

        let (sender, events) = event_channel();
        let request = CreateRequest {
            asset_source: launch.asset_source,
            base_path: resolve_storage_path(launch.data_dir.as_deref()),
            display_rotation: launch.display_rotation,
            gravity_mode,
        };
        log::info!(
            "create: gravity={} rotation={} data={:?}",
            gravity_mode,
            request.display_rotation.degrees(),
            request.base_path
        );
        engine.create(&request, sender);

        Ok(Self {
            engine,
            state: SessionState {
                phase: LifecyclePhase::Created,
                gravity_mode,
                orientation,
                keep_screen_on: gravity_mode,
                active_dialog: None,
            },
            resources,
            mapper: ImpulseMapper::new(gravity_mode),
            events,
            timers: TimerQueue::new(),
            poll_timer: None,
            poll_ticks: 0,
            has_focus: true,
            surface: None,
            snapshot: None,
            gauge_color: None,
            popups: Vec::new(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.state.phase
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Latest polled engine data
    pub fn snapshot(&self) -> Option<EngineSnapshot> {
        self.snapshot
    }

    /// Current pressure gauge fill
    pub fn gauge_color(&self) -> Option<Rgb> {
        self.gauge_color
    }

    pub fn active_dialog(&self) -> Option<DialogKind> {
        self.state.active_dialog
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    pub fn is_polling(&self) -> bool {
        self.poll_timer.is_some()
    }

    /// Poll ticks run so far
    pub fn poll_ticks(&self) -> u64 {
        self.poll_ticks
    }

    /// Session virtual clock
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Achievement popups raised since the last call
    pub fn take_popups(&mut self) -> Vec<PopupDescriptor> {
        std::mem::take(&mut self.popups)
    }

    // === Lifecycle ===

    fn transition(&mut self, to: LifecyclePhase) -> Result<(), SessionError> {
        use LifecyclePhase::*;

        let from = self.state.phase;
        if from == Destroyed {
            return Err(SessionError::Destroyed);
        }
        let allowed = matches!(
            (from, to),
            (Created | Paused | Stopped, Resumed)
                | (Resumed, Paused)
                | (Paused, Stopped)
                | (_, Destroyed)
        );
        if !allowed {
            return Err(SessionError::InvalidTransition { from, to });
        }
        log::info!("session {:?} -> {:?}", from, to);
        self.state.phase = to;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.transition(LifecyclePhase::Resumed)?;
        if !self.has_focus {
            log::debug!("resumed without focus, pausing game");
            self.pause_game_with_dialog();
        }
        self.engine.resume();
        self.arm_poll();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.transition(LifecyclePhase::Paused)?;
        self.engine.pause();
        self.cancel_polling();
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.transition(LifecyclePhase::Stopped)?;
        self.engine.stop();
        Ok(())
    }

    /// Tear down. Terminal: later calls fail or are ignored.
    pub fn destroy(&mut self) -> Result<(), SessionError> {
        self.transition(LifecyclePhase::Destroyed)?;
        self.engine.destroy();
        self.cancel_polling();
        if let Some(dialog) = self.state.active_dialog.take() {
            log::debug!("dismissing {:?} on destroy", dialog);
        }
        let dropped = self.events.drain().len();
        if dropped > 0 {
            log::debug!("dropped {} engine events on destroy", dropped);
        }
        self.surface = None;
        self.popups.clear();
        Ok(())
    }

    fn is_destroyed(&self) -> bool {
        self.state.phase == LifecyclePhase::Destroyed
    }

    // === Polling ===

    fn arm_poll(&mut self) {
        if let Some(id) = self.poll_timer.take() {
            self.timers.cancel(id);
        }
        self.poll_timer = Some(self.timers.schedule(POLL_INTERVAL, Deferred::PollUiData));
    }

    fn cancel_polling(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.poll_timer = None;
        log::debug!("polling stopped ({} pending cancelled)", cancelled);
    }

    /// Move the session clock forward, running every timer that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some((id, deferred)) = self.timers.next_due(until) {
            match deferred {
                Deferred::PollUiData => self.poll_ui_data(id),
            }
        }
    }

    fn poll_ui_data(&mut self, id: TimerId) {
        debug_assert_eq!(self.poll_timer, Some(id));
        debug_assert_eq!(self.state.phase, LifecyclePhase::Resumed);

        let snapshot = self.engine.get_ui_data();
        let color = self
            .resources
            .pressure_colors
            .interpolate(pressure_percent(snapshot.pressure));
        self.snapshot = Some(snapshot);
        self.gauge_color = Some(color);
        self.poll_ticks += 1;

        self.poll_timer = Some(self.timers.schedule(POLL_INTERVAL, Deferred::PollUiData));
    }

    // === Engine callbacks ===

    /// Apply queued engine callbacks. Returns how many were handled.
    pub fn process_engine_events(&mut self) -> usize {
        if self.is_destroyed() {
            return 0;
        }
        let events = self.events.drain();
        for event in &events {
            match *event {
                EngineEvent::Win {
                    score,
                    new_high_score,
                } => {
                    self.request_dialog(DialogKind::Win {
                        score,
                        new_high_score,
                    });
                }
                EngineEvent::GameOver {
                    score,
                    new_high_score,
                } => {
                    self.request_dialog(DialogKind::GameOver {
                        score,
                        new_high_score,
                    });
                }
                EngineEvent::Achievement { size_class } => {
                    let popup = achievement::notify(
                        size_class,
                        &self.resources.ball_colors,
                        &self.resources.achievement_texts,
                    );
                    self.popups.push(popup);
                }
            }
        }
        events.len()
    }

    // === Dialogs ===

    /// Show `kind` unless another dialog is up. Returns whether it was shown.
    pub fn request_dialog(&mut self, kind: DialogKind) -> bool {
        if self.is_destroyed() {
            log::warn!("dialog {:?} requested after destroy", kind);
            return false;
        }
        if let Some(active) = self.state.active_dialog {
            log::debug!("dropping dialog {:?}, {:?} already showing", kind, active);
            return false;
        }
        log::debug!("showing dialog {:?}", kind);
        self.state.active_dialog = Some(kind);
        true
    }

    /// Pause the game behind a Paused dialog. Skipped while another dialog is
    /// up, so every engine pause has a dialog that can undo it.
    fn pause_game_with_dialog(&mut self) {
        if self.request_dialog(DialogKind::Paused) {
            self.engine.pause_game();
        }
    }

    /// Press a button on the active dialog. Returns whether it closed.
    pub fn press_dialog_button(&mut self, button: DialogButton) -> bool {
        let Some(kind) = self.state.active_dialog else {
            return false;
        };
        match kind.press(button) {
            Some(outcome) => {
                self.close_dialog(outcome);
                true
            }
            None => {
                log::warn!("{:?} has no {:?} button", kind, button);
                false
            }
        }
    }

    /// Back navigation on the active dialog. Returns whether it closed.
    pub fn cancel_dialog(&mut self) -> bool {
        let Some(outcome) = self.state.active_dialog.and_then(|kind| kind.cancel()) else {
            return false;
        };
        self.close_dialog(outcome);
        true
    }

    /// System-initiated dismissal: the slot empties, the engine is not told.
    pub fn dismiss_dialog(&mut self) -> Option<DialogKind> {
        self.state.active_dialog.take()
    }

    fn close_dialog(&mut self, outcome: DialogOutcome) {
        self.state.active_dialog = None;
        log::debug!("dialog closed: {:?}", outcome);
        match outcome {
            DialogOutcome::NewGame => self.engine.new_game(),
            DialogOutcome::Unpause => self.engine.unpause(),
            DialogOutcome::Dismiss => {}
        }
    }

    // === Menu ===

    pub fn on_menu_item(&mut self, item: MenuItem) -> Option<HostRequest> {
        if self.is_destroyed() {
            return None;
        }
        match item {
            MenuItem::Pause => {
                self.pause_game_with_dialog();
                None
            }
            MenuItem::NewGame => {
                self.request_dialog(DialogKind::NewGameConfirm);
                None
            }
            MenuItem::Fullscreen => Some(HostRequest::EnterFullscreen),
            MenuItem::Settings => Some(HostRequest::OpenSettings),
            MenuItem::Help => Some(HostRequest::ShowHelp {
                gravity_mode: self.state.gravity_mode,
                duration: PopupDuration::Long,
            }),
        }
    }

    // === Input ===

    /// Returns whether the key produced an impulse.
    pub fn on_key(&mut self, event: KeyEvent) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let impulse = self.mapper.on_key(event);
        self.deliver(impulse)
    }

    /// Returns whether the gesture produced an impulse.
    pub fn on_fling(&mut self, dx: f32, dy: f32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let impulse = self.mapper.on_fling(dx, dy);
        self.deliver(impulse)
    }

    fn deliver(&mut self, impulse: Option<ImpulseVector>) -> bool {
        match impulse {
            Some(v) => {
                self.engine.fling(v.x(), v.y());
                true
            }
            None => false,
        }
    }

    pub fn on_focus_changed(&mut self, has_focus: bool) {
        if self.is_destroyed() {
            return;
        }
        self.has_focus = has_focus;
        if !has_focus {
            self.mapper.release_all();
        }
        self.engine.focus(has_focus);
    }

    // === Surface ===

    pub fn on_surface_created(&mut self, _surface: SurfaceHandle) {}

    pub fn on_surface_changed(&mut self, surface: SurfaceHandle) {
        if self.is_destroyed() {
            return;
        }
        self.surface = Some(surface);
        self.engine.surface_changed(Some(surface));
    }

    pub fn on_surface_destroyed(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.surface = None;
        self.engine.surface_changed(None);
    }
}
