//! Typed handles for building circuits.
//!
//! Every constructor allocates the element's pins, registers the element with
//! the circuit and hands back its named pins. Pin offsets and directions are
//! only layout hints.

use crate::{
    Circuit, ElementId, ElementKind, GateType, LightColor, PinDirection, PinId, Position, Result,
    SwitchType,
};

/// A two-input gate with inputs `a`, `b` and output `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    pub id: ElementId,
    pub a: PinId,
    pub b: PinId,
    pub y: PinId,
}

macro_rules! gate_fn_gen {
    ( $gate_lowercase:ident, $gate_uppercase:ident ) => {
        pub fn $gate_lowercase(circuit: &mut Circuit, position: Position) -> Self {
            Self::new(circuit, GateType::$gate_uppercase, position)
        }
    };
}

impl Gate {
    pub fn new(circuit: &mut Circuit, gate: GateType, position: Position) -> Self {
        let a = circuit.create_pin(Position::new(5.0, 10.0), PinDirection::Left);
        let b = circuit.create_pin(Position::new(5.0, 50.0), PinDirection::Left);
        let y = circuit.create_pin(Position::new(72.0, 30.0), PinDirection::Right);
        let id = circuit.add_element(position, ElementKind::Gate { gate, a, b, y });
        Gate { id, a, b, y }
    }

    gate_fn_gen!(and, And);
    gate_fn_gen!(nand, Nand);
    gate_fn_gen!(or, Or);
    gate_fn_gen!(nor, Nor);
    gate_fn_gen!(xor, Xor);
    gate_fn_gen!(xnor, Xnor);
}

/// An inverter, `out = !input`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Not {
    pub id: ElementId,
    pub input: PinId,
    pub out: PinId,
}

impl Not {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        let input = circuit.create_pin(Position::new(10.0, 30.0), PinDirection::Left);
        let out = circuit.create_pin(Position::new(72.0, 30.0), PinDirection::Right);
        let id = circuit.add_element(position, ElementKind::Not { input, out });
        Not { id, input, out }
    }
}

/// A user-operated signal source with a single output `out`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
    pub id: ElementId,
    pub out: PinId,
}

impl Switch {
    pub fn new(circuit: &mut Circuit, position: Position, switch: SwitchType) -> Self {
        let out = circuit.create_pin(Position::new(37.5, 37.5), PinDirection::Any);
        let id = circuit.add_element(position, ElementKind::switch(switch, out));
        Switch { id, out }
    }

    pub fn toggle(circuit: &mut Circuit, position: Position, initial: bool) -> Self {
        Self::new(circuit, position, SwitchType::Toggle { initial })
    }

    pub fn pushbutton(circuit: &mut Circuit, position: Position, normally_off: bool) -> Self {
        Self::new(circuit, position, SwitchType::Pushbutton { normally_off })
    }

    pub fn press(&self, circuit: &mut Circuit) -> Result<()> {
        circuit.press(self.id)
    }

    pub fn release(&self, circuit: &mut Circuit) -> Result<()> {
        circuit.release(self.id)
    }

    /// Only observable on toggles, see [`Circuit::tap`].
    pub fn tap(&self, circuit: &mut Circuit) -> Result<()> {
        circuit.tap(self.id)
    }

    pub fn set(&self, circuit: &mut Circuit, level: bool) -> Result<()> {
        circuit.set_switch(self.id, level)
    }

    pub fn is_on(&self, circuit: &Circuit) -> Result<bool> {
        circuit.is_on(self.id)
    }
}

/// A light with a single input `input`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Led {
    pub id: ElementId,
    pub input: PinId,
}

impl Led {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        Self::with_color(circuit, position, LightColor::default())
    }

    pub fn with_color(circuit: &mut Circuit, position: Position, color: LightColor) -> Self {
        let input = circuit.create_pin(Position::new(37.5, 47.5), PinDirection::Any);
        let id = circuit.add_element(
            position,
            ElementKind::Led {
                color,
                lit: false,
                input,
            },
        );
        Led { id, input }
    }

    pub fn is_lit(&self, circuit: &Circuit) -> Result<bool> {
        circuit.is_lit(self.id)
    }
}
