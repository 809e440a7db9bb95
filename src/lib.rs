macro_rules! id_gen {
    ( $name:ident, $prefix:expr ) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

pub mod circuit_builder;
pub mod circuit_sim;
pub mod components;
pub mod element;
pub mod error;
pub mod net;

mod circuit;
pub use circuit::Circuit;
pub use element::{Element, ElementId, ElementKind, GateType, LightColor, SwitchType};
pub use error::{Error, Result};
pub use net::{Pin, PinDirection, PinId, Position, Signal, SignalId, Wire, WireId};
