//! Connectivity model: signals, pins and the wires between them.
//!
//! Every id here is an index into a table owned by [`crate::Circuit`]. Pins
//! that are electrically connected share one [`SignalId`], so a write through
//! any pin of a net is seen by all the others.

use crate::ElementId;

id_gen!(SignalId, "s");
id_gen!(PinId, "p");
id_gen!(WireId, "w");

/// Logical grid position of an element, or offset of a pin inside its
/// element. Opaque to the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Which way a pin faces when a wire is drawn into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinDirection {
    Left,
    Right,
    Up,
    Down,
    Any,
}

/// The shared boolean behind a net.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signal {
    pub value: bool,
}

impl Signal {
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

/// A terminal of an element.
#[derive(Clone, Debug)]
pub struct Pin {
    pub position: Position,
    pub direction: PinDirection,
    pub(crate) signal: Option<SignalId>,
    pub(crate) owner: Option<ElementId>,
}

impl Pin {
    pub(crate) fn new(position: Position, direction: PinDirection) -> Self {
        Self {
            position,
            direction,
            signal: None,
            owner: None,
        }
    }

    pub fn signal(&self) -> Option<SignalId> {
        self.signal
    }

    /// Element the pin belongs to, set when that element is registered.
    pub fn owner(&self) -> Option<ElementId> {
        self.owner
    }

    /// Logic level of the pin. Unconnected pins read low.
    pub(crate) fn read(&self, signals: &[Signal]) -> bool {
        match self.signal {
            Some(signal) => signals[signal.index()].value,
            None => false,
        }
    }

    /// Drives the pin's net. Writes to an unconnected pin are dropped.
    pub(crate) fn write(&self, signals: &mut [Signal], value: bool) {
        if let Some(signal) = self.signal {
            signals[signal.index()].value = value;
        }
    }
}

/// A recorded connection between two pins.
///
/// `signal` always matches the signal of both endpoints; net merges rewrite
/// all three together.
#[derive(Clone, Copy, Debug)]
pub struct Wire {
    pub a: PinId,
    pub b: PinId,
    pub(crate) signal: SignalId,
}

impl Wire {
    pub fn signal(&self) -> SignalId {
        self.signal
    }
}
