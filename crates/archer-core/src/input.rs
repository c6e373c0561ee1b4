//! Player input: the events a host pushes in, and the intent they record.
//!
//! Input events never touch the simulation directly. [`InputState::apply`]
//! only records intent on the player entity; the player's own update hook
//! consumes it during the next tick.

use bitflags::bitflags;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::blend_headings;

/// A movement key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the top edge (270°).
    Up,
    /// Towards the bottom edge (90°).
    Down,
    /// Towards the left edge (180°).
    Left,
    /// Towards the right edge (0°).
    Right,
}

impl Direction {
    /// Heading in degrees.
    #[must_use]
    pub const fn angle(self) -> f64 {
        match self {
            Self::Right => 0.0,
            Self::Down => 90.0,
            Self::Left => 180.0,
            Self::Up => 270.0,
        }
    }

    /// Flag for this direction in a [`MoveDirections`] set.
    #[must_use]
    pub const fn flag(self) -> MoveDirections {
        match self {
            Self::Up => MoveDirections::UP,
            Self::Down => MoveDirections::DOWN,
            Self::Left => MoveDirections::LEFT,
            Self::Right => MoveDirections::RIGHT,
        }
    }
}

bitflags! {
    /// Set of currently held movement keys. At most one of each.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MoveDirections: u8 {
        /// Up is held.
        const UP = 1 << 0;
        /// Down is held.
        const DOWN = 1 << 1;
        /// Left is held.
        const LEFT = 1 << 2;
        /// Right is held.
        const RIGHT = 1 << 3;
    }
}

impl MoveDirections {
    /// Blended walking heading, or `None` when the player should stand still.
    ///
    /// Opposite keys cancel each other. What remains is at most one vertical
    /// and one horizontal direction, averaged along the short arc.
    ///
    /// ```
    /// use archer_core::input::MoveDirections;
    ///
    /// let held = MoveDirections::UP | MoveDirections::RIGHT;
    /// assert_eq!(held.heading(), Some(315.0));
    ///
    /// let cancelled = MoveDirections::LEFT | MoveDirections::RIGHT;
    /// assert_eq!(cancelled.heading(), None);
    /// ```
    #[must_use]
    pub fn heading(self) -> Option<f64> {
        let mut held = self;
        if held.contains(Self::UP | Self::DOWN) {
            held.remove(Self::UP | Self::DOWN);
        }
        if held.contains(Self::LEFT | Self::RIGHT) {
            held.remove(Self::LEFT | Self::RIGHT);
        }

        let mut angles = [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
            .into_iter()
            .filter(|d| held.contains(d.flag()))
            .map(Direction::angle);

        match (angles.next(), angles.next()) {
            (None, _) => None,
            (Some(a), None) => Some(a),
            (Some(a), Some(b)) => Some(blend_headings(a, b)),
        }
    }
}

/// An input event pushed by the host between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved to a point in arena coordinates. Latest wins.
    PointerMoved(DVec2),
    /// Fire button went down: fire continuously while held.
    FirePressed,
    /// Fire button went up.
    FireReleased,
    /// One-shot fire request (a click).
    FireClicked,
    /// A movement key went down. Repeats are ignored.
    DirectionPressed(Direction),
    /// A movement key went up.
    DirectionReleased(Direction),
}

/// Recorded player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Last known pointer position, if any.
    pub pointer: Option<DVec2>,
    /// Fire button is held.
    pub fire_held: bool,
    /// A one-shot fire request is pending.
    pub fire_pulse: bool,
    /// Held movement keys.
    pub directions: MoveDirections,
}

impl InputState {
    /// Records an input event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(point) => self.pointer = Some(point),
            InputEvent::FirePressed => self.fire_held = true,
            InputEvent::FireReleased => self.fire_held = false,
            InputEvent::FireClicked => self.fire_pulse = true,
            InputEvent::DirectionPressed(direction) => self.directions.insert(direction.flag()),
            InputEvent::DirectionReleased(direction) => self.directions.remove(direction.flag()),
        }
    }

    /// True when the player wants to shoot this tick.
    #[must_use]
    pub const fn wants_fire(&self) -> bool {
        self.fire_held || self.fire_pulse
    }
}
