//! Circuit errors

use thiserror::Error;

use crate::{ElementId, PinId};

/// Circuit result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the checked entry points of [`crate::Circuit`].
///
/// The simulation itself never fails, these only cover ids that were not
/// issued by the circuit they are used with, or events sent to the wrong
/// kind of element.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("pin {0} does not belong to this circuit")]
    UnknownPin(PinId),

    #[error("element {0} does not belong to this circuit")]
    UnknownElement(ElementId),

    #[error("element {0} is not a switch")]
    NotASwitch(ElementId),

    #[error("element {0} is not a light")]
    NotALight(ElementId),
}
