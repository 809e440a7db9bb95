//! Element kinds and their per-pass evaluation.

use crate::net::{Pin, PinId, Position, Signal};

id_gen!(ElementId, "e");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateType {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateType {
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateType::And => a && b,
            GateType::Nand => !(a && b),
            GateType::Or => a || b,
            GateType::Nor => !(a || b),
            GateType::Xor => a != b,
            GateType::Xnor => a == b,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwitchType {
    /// Flips on every release and holds. Starts at `initial`.
    Toggle { initial: bool },
    /// On while held. With `normally_off == false` the output is inverted,
    /// high while released and low while held.
    Pushbutton { normally_off: bool },
    /// Same logic as [`SwitchType::Pushbutton`], drawn larger.
    LargePushbutton { normally_off: bool },
}

impl SwitchType {
    fn initial(self) -> bool {
        match self {
            SwitchType::Toggle { initial } => initial,
            SwitchType::Pushbutton { .. } | SwitchType::LargePushbutton { .. } => false,
        }
    }

    /// Level driven onto the output pin for a given `is_on`.
    pub fn output(self, is_on: bool) -> bool {
        match self {
            SwitchType::Toggle { .. } => is_on,
            SwitchType::Pushbutton { normally_off }
            | SwitchType::LargePushbutton { normally_off } => {
                if normally_off {
                    is_on
                } else {
                    !is_on
                }
            }
        }
    }

    pub(crate) fn press(self, is_on: &mut bool) {
        match self {
            SwitchType::Toggle { .. } => (),
            SwitchType::Pushbutton { .. } | SwitchType::LargePushbutton { .. } => *is_on = true,
        }
    }

    pub(crate) fn release(self, is_on: &mut bool) {
        match self {
            SwitchType::Toggle { .. } => *is_on = !*is_on,
            SwitchType::Pushbutton { .. } | SwitchType::LargePushbutton { .. } => *is_on = false,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LightColor {
    #[default]
    Yellow,
    Green,
    Red,
}

#[derive(Clone, Debug)]
pub enum ElementKind {
    Gate {
        gate: GateType,
        a: PinId,
        b: PinId,
        y: PinId,
    },
    Not {
        input: PinId,
        out: PinId,
    },
    Switch {
        switch: SwitchType,
        is_on: bool,
        out: PinId,
    },
    Led {
        color: LightColor,
        lit: bool,
        input: PinId,
    },
}

impl ElementKind {
    pub(crate) fn switch(switch: SwitchType, out: PinId) -> Self {
        ElementKind::Switch {
            switch,
            is_on: switch.initial(),
            out,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Gate { gate, .. } => match gate {
                GateType::And => "and",
                GateType::Nand => "nand",
                GateType::Or => "or",
                GateType::Nor => "nor",
                GateType::Xor => "xor",
                GateType::Xnor => "xnor",
            },
            ElementKind::Not { .. } => "not",
            ElementKind::Switch { .. } => "switch",
            ElementKind::Led { .. } => "led",
        }
    }

    pub fn pins(&self) -> Vec<PinId> {
        match *self {
            ElementKind::Gate { a, b, y, .. } => vec![a, b, y],
            ElementKind::Not { input, out } => vec![input, out],
            ElementKind::Switch { out, .. } => vec![out],
            ElementKind::Led { input, .. } => vec![input],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub position: Position,
    pub kind: ElementKind,
}

impl Element {
    /// Reads the input pins and drives the output pins. Gates never look at
    /// their previous output, switches only publish `is_on`, lights only
    /// latch what they see for the renderer.
    pub fn compute(&mut self, pins: &[Pin], signals: &mut [Signal]) {
        match &mut self.kind {
            ElementKind::Gate { gate, a, b, y } => {
                let a = pins[a.index()].read(signals);
                let b = pins[b.index()].read(signals);
                pins[y.index()].write(signals, gate.eval(a, b));
            }
            ElementKind::Not { input, out } => {
                let input = pins[input.index()].read(signals);
                pins[out.index()].write(signals, !input);
            }
            ElementKind::Switch { switch, is_on, out } => {
                pins[out.index()].write(signals, switch.output(*is_on));
            }
            ElementKind::Led { input, lit, .. } => {
                *lit = pins[input.index()].read(signals);
            }
        }
    }

    pub fn is_on(&self) -> Option<bool> {
        match self.kind {
            ElementKind::Switch { is_on, .. } => Some(is_on),
            _ => None,
        }
    }

    pub fn is_lit(&self) -> Option<bool> {
        match self.kind {
            ElementKind::Led { lit, .. } => Some(lit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gate_formulas() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        let table = [
            (GateType::And, [false, false, false, true]),
            (GateType::Nand, [true, true, true, false]),
            (GateType::Or, [false, true, true, true]),
            (GateType::Nor, [true, false, false, false]),
            (GateType::Xor, [false, true, true, false]),
            (GateType::Xnor, [true, false, false, true]),
        ];
        for (gate, expecteds) in table {
            for ((a, b), expected) in cases.into_iter().zip(expecteds) {
                assert_eq!(gate.eval(a, b), expected, "{a} {gate:?} {b}");
            }
        }
    }

    #[test]
    fn switch_events() {
        let toggle = SwitchType::Toggle { initial: true };
        let mut is_on = toggle.initial();
        toggle.press(&mut is_on);
        assert!(is_on);
        toggle.release(&mut is_on);
        assert!(!is_on);

        let button = SwitchType::LargePushbutton {
            normally_off: false,
        };
        let mut is_on = button.initial();
        assert!(button.output(is_on));
        button.press(&mut is_on);
        assert!(!button.output(is_on));
        button.release(&mut is_on);
        assert!(button.output(is_on));
    }
}
