//! Boundary to the simulation engine
//!
//! The engine owns physics, merge rules, scoring and win/loss detection. The
//! shell only sees:
//! - `EngineHandle`: lifecycle mirrors, input and commands, plus a snapshot poll
//! - `EngineEvent`: outcomes the engine reports back, possibly from its own
//!   threads, through an `EventSender`

pub mod demo;

use std::path::PathBuf;
use std::sync::mpsc;

use crate::platform::DisplayRotation;

pub use demo::{DemoEngine, EngineCall};

/// Values polled for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSnapshot {
    pub score: u64,
    pub high_score: u64,
    /// Current gravity direction, radians
    pub gravity_angle: f32,
    /// 0..=100
    pub pressure: u8,
}

/// Opaque native surface token. Only valid between a change and the next
/// destroy notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Arguments for the one-time engine creation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub asset_source: PathBuf,
    /// Writable data directory; empty when it could not be resolved
    pub base_path: String,
    pub display_rotation: DisplayRotation,
    pub gravity_mode: bool,
}

/// Outcome reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Win { score: u64, new_high_score: bool },
    GameOver { score: u64, new_high_score: bool },
    Achievement { size_class: u32 },
}

/// Engine-side end of the callback channel. Cheap to clone, usable from any
/// thread.
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::Sender<EngineEvent>);

/// UI-side end of the callback channel
#[derive(Debug)]
pub struct EventReceiver(mpsc::Receiver<EngineEvent>);

/// New callback channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender(tx), EventReceiver(rx))
}

impl EventSender {
    pub fn on_win(&self, score: u64, new_high_score: bool) {
        self.send(EngineEvent::Win {
            score,
            new_high_score,
        });
    }

    pub fn on_game_over(&self, score: u64, new_high_score: bool) {
        self.send(EngineEvent::GameOver {
            score,
            new_high_score,
        });
    }

    pub fn on_achievement(&self, size_class: u32) {
        self.send(EngineEvent::Achievement { size_class });
    }

    fn send(&self, event: EngineEvent) {
        // The session is gone once the receiver drops
        if self.0.send(event).is_err() {
            log::debug!("engine event after session teardown: {:?}", event);
        }
    }
}

impl EventReceiver {
    /// Everything queued so far, without blocking
    pub fn drain(&self) -> Vec<EngineEvent> {
        self.0.try_iter().collect()
    }
}

/// Calls the shell makes into the engine.
///
/// Implementations must tolerate every call from the UI thread while their own
/// simulation threads run; none of them may block beyond the call itself.
pub trait EngineHandle {
    fn create(&mut self, request: &CreateRequest, events: EventSender);
    fn resume(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn destroy(&mut self);
    fn focus(&mut self, has_focus: bool);
    fn surface_changed(&mut self, surface: Option<SurfaceHandle>);
    fn fling(&mut self, x: f32, y: f32);
    fn new_game(&mut self);
    fn pause_game(&mut self);
    fn unpause(&mut self);
    fn get_ui_data(&mut self) -> EngineSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_events_cross_threads_in_order() {
        let (tx, rx) = event_channel();
        let remote = tx.clone();
        thread::spawn(move || {
            remote.on_win(10, false);
            remote.on_achievement(5);
        })
        .join()
        .unwrap();
        tx.on_game_over(3, true);

        assert_eq!(
            rx.drain(),
            vec![
                EngineEvent::Win {
                    score: 10,
                    new_high_score: false
                },
                EngineEvent::Achievement { size_class: 5 },
                EngineEvent::GameOver {
                    score: 3,
                    new_high_score: true
                },
            ]
        );
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = event_channel();
        drop(rx);
        tx.on_achievement(1);
    }
}
