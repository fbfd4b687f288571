//! Input normalization
//!
//! Turns directional keys and flick gestures into the single impulse vector
//! the engine accepts. Gravity mode disables both: the engine reads tilt
//! directly in that mode.

use std::collections::HashSet;

use glam::Vec2;

/// Impulse handed to `EngineHandle::fling`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseVector(pub Vec2);

impl ImpulseVector {
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

/// Compass direction, screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// Unnormalized impulse for a direction; the engine normalizes.
pub fn map_key(direction: Direction) -> ImpulseVector {
    match direction {
        Direction::Up => ImpulseVector::new(0.0, -1.0),
        Direction::Down => ImpulseVector::new(0.0, 1.0),
        Direction::Left => ImpulseVector::new(-1.0, 0.0),
        Direction::Right => ImpulseVector::new(1.0, 0.0),
        Direction::UpLeft => ImpulseVector::new(-1.0, -1.0),
        Direction::UpRight => ImpulseVector::new(1.0, -1.0),
        Direction::DownLeft => ImpulseVector::new(-1.0, 1.0),
        Direction::DownRight => ImpulseVector::new(1.0, 1.0),
    }
}

/// Raw flick velocity, passed through unscaled.
pub fn map_gesture(dx: f32, dy: f32) -> ImpulseVector {
    ImpulseVector::new(dx, dy)
}

/// Physical key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    DpadUpLeft,
    DpadUpRight,
    DpadDownLeft,
    DpadDownRight,
    Other(u32),
}

impl KeyCode {
    pub fn direction(self) -> Option<Direction> {
        match self {
            KeyCode::DpadUp => Some(Direction::Up),
            KeyCode::DpadDown => Some(Direction::Down),
            KeyCode::DpadLeft => Some(Direction::Left),
            KeyCode::DpadRight => Some(Direction::Right),
            KeyCode::DpadUpLeft => Some(Direction::UpLeft),
            KeyCode::DpadUpRight => Some(Direction::UpRight),
            KeyCode::DpadDownLeft => Some(Direction::DownLeft),
            KeyCode::DpadDownRight => Some(Direction::DownRight),
            KeyCode::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Key event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: KeyAction,
    /// Host auto-repeat counter; 0 for the initial press
    pub repeat_count: u32,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            repeat_count: 0,
        }
    }

    pub fn repeat(code: KeyCode, repeat_count: u32) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            repeat_count,
        }
    }

    pub fn up(code: KeyCode) -> Self {
        Self {
            code,
            action: KeyAction::Up,
            repeat_count: 0,
        }
    }
}

/// Stateful mapper: suppresses auto-repeat and honors gravity mode
#[derive(Debug, Default)]
pub struct ImpulseMapper {
    gravity_mode: bool,
    held: HashSet<KeyCode>,
}

impl ImpulseMapper {
    pub fn new(gravity_mode: bool) -> Self {
        Self {
            gravity_mode,
            held: HashSet::new(),
        }
    }

    pub fn gravity_mode(&self) -> bool {
        self.gravity_mode
    }

    /// Impulse for a key event, if it is the first press of a direction key.
    pub fn on_key(&mut self, event: KeyEvent) -> Option<ImpulseVector> {
        match event.action {
            KeyAction::Up => {
                self.held.remove(&event.code);
                None
            }
            KeyAction::Down => {
                if self.gravity_mode || event.repeat_count > 0 {
                    return None;
                }
                let direction = event.code.direction()?;
                // Hosts that synthesize repeats as fresh presses still hold the key
                if !self.held.insert(event.code) {
                    return None;
                }
                Some(map_key(direction))
            }
        }
    }

    pub fn on_fling(&self, dx: f32, dy: f32) -> Option<ImpulseVector> {
        if self.gravity_mode {
            None
        } else {
            Some(map_gesture(dx, dy))
        }
    }

    /// Forget held keys, e.g. when focus is lost and key-ups will not arrive
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
