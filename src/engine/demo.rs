//! In-process stand-in for the native engine
//!
//! Records every boundary call and, when drifting, fakes a game: score and
//! pressure creep up on each poll, flings vent pressure, merges raise
//! achievements, a full gauge ends the game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{CreateRequest, EngineHandle, EngineSnapshot, EventSender, SurfaceHandle};

/// Size class of the winning ball (2048)
const WIN_SIZE_CLASS: u32 = 11;
/// Points between fake merges
const POINTS_PER_MERGE: u64 = 64;

/// One recorded boundary call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Create(CreateRequest),
    Resume,
    Pause,
    Stop,
    Destroy,
    Focus(bool),
    SurfaceChanged(Option<SurfaceHandle>),
    Fling { x: f32, y: f32 },
    NewGame,
    PauseGame,
    Unpause,
    GetUiData,
}

#[derive(Debug)]
pub struct DemoEngine {
    calls: Vec<EngineCall>,
    events: Option<EventSender>,
    snapshot: EngineSnapshot,
    rng: Option<Pcg32>,
    running: bool,
    game_paused: bool,
    game_over: bool,
    best_size_class: u32,
}

impl DemoEngine {
    /// Drifting engine with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Some(Pcg32::seed_from_u64(seed)),
            ..Self::quiet()
        }
    }

    /// Engine whose snapshot only changes through `set_snapshot`
    pub fn quiet() -> Self {
        Self {
            calls: Vec::new(),
            events: None,
            snapshot: EngineSnapshot::default(),
            rng: None,
            running: false,
            game_paused: false,
            game_over: false,
            best_size_class: 1,
        }
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn count(&self, call: &EngineCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Callback channel handed over at creation
    pub fn events(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }

    pub fn set_snapshot(&mut self, snapshot: EngineSnapshot) {
        self.snapshot = snapshot;
    }

    fn step(&mut self) {
        let Some(rng) = self.rng.as_mut() else {
            return;
        };
        if !self.running || self.game_paused || self.game_over {
            return;
        }

        let s = &mut self.snapshot;
        s.score += rng.random_range(0..12u64);
        s.pressure = s.pressure.saturating_add(rng.random_range(0..3u8)).min(100);
        s.gravity_angle =
            (s.gravity_angle + rng.random_range(-0.05f32..0.05)) % std::f32::consts::TAU;
        let new_high = s.score > s.high_score;
        if new_high {
            s.high_score = s.score;
        }

        let size_class = 1 + (s.score / POINTS_PER_MERGE) as u32;
        let Some(events) = self.events.as_ref() else {
            return;
        };
        if size_class > self.best_size_class {
            self.best_size_class = size_class;
            events.on_achievement(size_class);
            if size_class == WIN_SIZE_CLASS {
                self.game_paused = true;
                events.on_win(s.score, new_high);
            }
        }
        if s.pressure >= 100 {
            self.game_over = true;
            events.on_game_over(s.score, new_high);
        }
    }
}

impl EngineHandle for DemoEngine {
    fn create(&mut self, request: &CreateRequest, events: EventSender) {
        self.calls.push(EngineCall::Create(request.clone()));
        self.events = Some(events);
    }

    fn resume(&mut self) {
        self.calls.push(EngineCall::Resume);
        self.running = true;
    }

    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
        self.running = false;
    }

    fn stop(&mut self) {
        self.calls.push(EngineCall::Stop);
        self.running = false;
    }

    fn destroy(&mut self) {
        self.calls.push(EngineCall::Destroy);
        self.running = false;
        self.events = None;
    }

    fn focus(&mut self, has_focus: bool) {
        self.calls.push(EngineCall::Focus(has_focus));
    }

    fn surface_changed(&mut self, surface: Option<SurfaceHandle>) {
        self.calls.push(EngineCall::SurfaceChanged(surface));
    }

    fn fling(&mut self, x: f32, y: f32) {
        self.calls.push(EngineCall::Fling { x, y });
        if self.rng.is_some() && !self.game_over {
            self.snapshot.pressure = self.snapshot.pressure.saturating_sub(5);
        }
    }

    fn new_game(&mut self) {
        self.calls.push(EngineCall::NewGame);
        let high_score = self.snapshot.high_score;
        self.snapshot = EngineSnapshot {
            high_score,
            ..EngineSnapshot::default()
        };
        self.game_paused = false;
        self.game_over = false;
        self.best_size_class = 1;
    }

    fn pause_game(&mut self) {
        self.calls.push(EngineCall::PauseGame);
        self.game_paused = true;
    }

    fn unpause(&mut self) {
        self.calls.push(EngineCall::Unpause);
        self.game_paused = false;
    }

    fn get_ui_data(&mut self) -> EngineSnapshot {
        self.calls.push(EngineCall::GetUiData);
        self.step();
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineEvent, event_channel};
    use crate::platform::DisplayRotation;
    use std::path::PathBuf;

    fn request() -> CreateRequest {
        CreateRequest {
            asset_source: PathBuf::from("assets"),
            base_path: String::new(),
            display_rotation: DisplayRotation::Rotation0,
            gravity_mode: false,
        }
    }

    #[test]
    fn test_quiet_engine_returns_set_snapshot() {
        let mut engine = DemoEngine::quiet();
        let snap = EngineSnapshot {
            score: 5,
            high_score: 9,
            gravity_angle: 0.5,
            pressure: 42,
        };
        engine.set_snapshot(snap);
        assert_eq!(engine.get_ui_data(), snap);
        assert_eq!(engine.count(&EngineCall::GetUiData), 1);
    }

    #[test]
    fn test_drifting_engine_is_deterministic() {
        let run = |seed| {
            let (tx, _rx) = event_channel();
            let mut engine = DemoEngine::new(seed);
            engine.create(&request(), tx);
            engine.resume();
            (0..50).map(|_| engine.get_ui_data()).last()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_drifting_engine_ends_game_at_full_pressure() {
        let (tx, rx) = event_channel();
        let mut engine = DemoEngine::new(3);
        engine.create(&request(), tx);
        engine.resume();
        engine.set_snapshot(EngineSnapshot {
            pressure: 100,
            ..EngineSnapshot::default()
        });
        engine.get_ui_data();
        assert!(
            rx.drain()
                .iter()
                .any(|e| matches!(e, EngineEvent::GameOver { .. }))
        );
    }

    #[test]
    fn test_drift_from_overfull_pressure_saturates() {
        let (tx, _rx) = event_channel();
        let mut engine = DemoEngine::new(11);
        engine.create(&request(), tx);
        engine.resume();
        engine.set_snapshot(EngineSnapshot {
            pressure: u8::MAX,
            ..EngineSnapshot::default()
        });
        assert_eq!(engine.get_ui_data().pressure, 100);
    }

    #[test]
    fn test_new_game_keeps_high_score() {
        let mut engine = DemoEngine::quiet();
        engine.set_snapshot(EngineSnapshot {
            score: 50,
            high_score: 80,
            gravity_angle: 0.0,
            pressure: 70,
        });
        engine.new_game();
        let snap = engine.get_ui_data();
        assert_eq!((snap.score, snap.high_score, snap.pressure), (0, 80, 0));
    }
}
