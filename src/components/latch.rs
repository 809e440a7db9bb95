use crate::{
    circuit_builder::{Gate, Not},
    Circuit, PinId, Position,
};

/// Two cross-coupled NOR gates. A high `reset` drives `q` low, a high `set`
/// drives it high, and with both low the last state holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SrLatch {
    pub reset: PinId,
    pub set: PinId,
    pub q: PinId,
    pub qq: PinId,
}

impl SrLatch {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        let nor1 = Gate::nor(circuit, position);
        let nor2 = Gate::nor(circuit, position + Position::new(0.0, 2.0));
        circuit.connect(nor1.y, nor2.a);
        circuit.connect(nor2.y, nor1.b);
        SrLatch {
            reset: nor1.a,
            set: nor2.b,
            q: nor1.y,
            qq: nor2.y,
        }
    }
}

/// An SR latch gated by `enable`: while enabled `q` follows `data`,
/// otherwise it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLatch {
    pub enable: PinId,
    pub data: PinId,
    pub q: PinId,
    pub qq: PinId,
}

impl DLatch {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        let nor_r = Gate::nor(circuit, position + Position::new(6.0, 0.5));
        let nor_s = Gate::nor(circuit, position + Position::new(6.0, 3.0));
        let and_r = Gate::and(circuit, position + Position::new(3.0, 0.0));
        let and_s = Gate::and(circuit, position + Position::new(3.0, 3.5));
        let not = Not::new(circuit, position + Position::new(1.0, 6.0));

        circuit.connect(and_r.a, and_s.a);
        circuit.connect(and_s.b, not.input);
        circuit.connect(not.out, and_r.b);
        circuit.connect(and_r.y, nor_r.a);
        circuit.connect(and_s.y, nor_s.b);
        circuit.connect(nor_s.y, nor_r.b);
        circuit.connect(nor_r.y, nor_s.a);

        DLatch {
            enable: and_r.a,
            data: and_s.b,
            q: nor_r.y,
            qq: nor_s.y,
        }
    }
}

/// Master/slave pair of D latches. `q` takes the value `data` had when
/// `clock` goes from high to low.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DFlipFlop {
    pub data: PinId,
    pub clock: PinId,
    pub q: PinId,
    pub qq: PinId,
}

impl DFlipFlop {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        let p = position + Position::new(-2.0, -1.0);
        // Master
        let and_r = Gate::and(circuit, p + Position::new(4.5, 1.0));
        let nor_r = Gate::nor(circuit, p + Position::new(7.0, 1.5));
        let and_s = Gate::and(circuit, p + Position::new(4.0, 4.5));
        let nor_s = Gate::nor(circuit, p + Position::new(7.0, 4.0));
        let not_data = Not::new(circuit, p + Position::new(2.0, 0.5));
        let not_clock = Not::new(circuit, p + Position::new(6.0, 5.0));
        // Slave
        let p = p + Position::new(6.0, 0.0);
        let and_r2 = Gate::and(circuit, p + Position::new(4.5, 1.0));
        let nor_r2 = Gate::nor(circuit, p + Position::new(7.0, 1.5));
        let and_s2 = Gate::and(circuit, p + Position::new(4.0, 4.5));
        let nor_s2 = Gate::nor(circuit, p + Position::new(7.0, 4.0));

        circuit.connect(and_r2.y, nor_r2.a);
        circuit.connect(and_s2.y, nor_s2.b);
        circuit.connect(nor_s2.y, nor_r2.b);
        circuit.connect(nor_r2.y, nor_s2.a);
        circuit.connect(and_s2.a, and_r2.b);
        circuit.connect(nor_s.y, and_r2.a);
        circuit.connect(nor_r.y, and_s2.b);
        circuit.connect(not_clock.out, and_s2.a);
        circuit.connect(not_clock.input, and_s.a);
        circuit.connect(not_data.out, and_r.a);

        circuit.connect(and_r.y, nor_r.a);
        circuit.connect(and_s.y, nor_s.b);
        circuit.connect(nor_s.y, nor_r.b);
        circuit.connect(nor_r.y, nor_s.a);
        circuit.connect(and_s.a, and_r.b);
        circuit.connect(not_data.input, and_s.b);

        DFlipFlop {
            data: not_data.input,
            clock: and_s.a,
            q: nor_r2.y,
            qq: nor_s2.y,
        }
    }
}
