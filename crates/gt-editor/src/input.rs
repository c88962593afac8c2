//! Input abstraction layer.
//!
//! Normalizes DOM-style pointer events into a unified `InputEvent` enum.
//! Coordinates are page coordinates; `time` uses the same unit as item
//! intervals and drives the drag wait timers.

use gt_core::model::{Modifiers, Point, PointerButton, PointerSample, Time};

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. Only `PointerButton::Primary` starts interactions.
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
        time: Time,
    },

    /// Pointer moved anywhere in the document.
    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
        time: Time,
    },

    /// Pointer released anywhere in the document.
    PointerUp {
        x: f64,
        y: f64,
        modifiers: Modifiers,
        time: Time,
    },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, button: i16, modifiers: Modifiers, time: Time) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::from_code(button),
            modifiers,
            time,
        }
    }

    pub fn from_pointer_move(x: f64, y: f64, modifiers: Modifiers, time: Time) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers,
            time,
        }
    }

    pub fn from_pointer_up(x: f64, y: f64, modifiers: Modifiers, time: Time) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers,
            time,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Point::new(*x, *y),
        }
    }

    pub fn time(&self) -> Time {
        match self {
            Self::PointerDown { time, .. }
            | Self::PointerMove { time, .. }
            | Self::PointerUp { time, .. } => *time,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. } => *modifiers,
        }
    }

    /// Button for down events; moves and ups report the primary button.
    pub fn button(&self) -> PointerButton {
        match self {
            Self::PointerDown { button, .. } => *button,
            _ => PointerButton::Primary,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.button() == PointerButton::Primary
    }

    /// Snapshot for the selection channel.
    pub fn sample(&self) -> PointerSample {
        let p = self.position();
        PointerSample {
            x: p.x,
            y: p.y,
            button: self.button(),
            modifiers: self.modifiers(),
            time: self.time(),
        }
    }
}
