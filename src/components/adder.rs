use std::ops::{BitAnd, Shl};

use num_traits::Unsigned;

use crate::{
    circuit_builder::{Gate, Led, Switch},
    Circuit, PinId, Position, Result,
};

use super::bus::{Bus, SwitchBank};

/// `sum = a ^ b ^ cin`, `cout = (a & b) | ((a ^ b) & cin)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FullAdder {
    pub a: PinId,
    pub b: PinId,
    pub cin: PinId,
    pub sum: PinId,
    pub cout: PinId,
}

impl FullAdder {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        let a_xor_b = Gate::xor(circuit, position);
        let sum = Gate::xor(circuit, position + Position::new(3.0, 0.0));
        let a_and_b = Gate::and(circuit, position + Position::new(0.0, 2.0));
        let carry_and = Gate::and(circuit, position + Position::new(3.0, 2.0));
        let cout = Gate::or(circuit, position + Position::new(6.0, 2.0));

        circuit.connect(a_xor_b.a, a_and_b.a);
        circuit.connect(a_xor_b.b, a_and_b.b);
        circuit.connect(a_xor_b.y, sum.a);
        circuit.connect(a_xor_b.y, carry_and.a);
        circuit.connect(sum.b, carry_and.b);
        circuit.connect(a_and_b.y, cout.a);
        circuit.connect(carry_and.y, cout.b);

        FullAdder {
            a: a_xor_b.a,
            b: a_xor_b.b,
            cin: sum.b,
            sum: sum.y,
            cout: cout.y,
        }
    }
}

/// `BITS` full adders with the carry rippling from bit 0 upwards, fed by
/// switch banks and showing the result on lights.
pub struct RippleCarryAdder<const BITS: usize> {
    pub input_a: SwitchBank<BITS>,
    pub input_b: SwitchBank<BITS>,
    pub cin: Switch,
    pub sum: [Led; BITS],
    pub cout: Led,
}

impl<const BITS: usize> RippleCarryAdder<BITS> {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        assert!(BITS > 0);

        let input_a = SwitchBank::new(circuit, position);
        let input_b = SwitchBank::new(circuit, position + Position::new(1.0, 0.0));
        let cin = Switch::toggle(circuit, position + Position::new(2.0, -1.0), false);

        let mut carry = cin.out;
        let mut sum = [PinId::from_index(0); BITS];
        for bit in 0..BITS {
            let adder = FullAdder::new(circuit, position + Position::new(4.0, 3.0 * bit as f32));
            circuit.connect(input_a.0[bit].out, adder.a);
            circuit.connect(input_b.0[bit].out, adder.b);
            circuit.connect(carry, adder.cin);
            sum[bit] = adder.sum;
            carry = adder.cout;
        }

        let lights = std::array::from_fn(|bit| {
            let led = Led::new(circuit, position + Position::new(14.0, 3.0 * bit as f32));
            circuit.connect(sum[bit], led.input);
            led
        });
        let cout = Led::new(circuit, position + Position::new(14.0, 3.0 * BITS as f32));
        circuit.connect(carry, cout.input);

        RippleCarryAdder {
            input_a,
            input_b,
            cin,
            sum: lights,
            cout,
        }
    }

    pub fn set<T>(&self, circuit: &mut Circuit, a: T, b: T, cin: bool) -> Result<()>
    where
        T: Unsigned + Copy + BitAnd<T, Output = T> + Shl<usize, Output = T>,
    {
        self.input_a.set(circuit, a)?;
        self.input_b.set(circuit, b)?;
        self.cin.set(circuit, cin)
    }

    pub fn sum<T>(&self, circuit: &Circuit) -> T
    where
        T: Unsigned + Shl<usize, Output = T>,
    {
        Bus(self.sum.map(|led| led.input)).read(circuit)
    }

    pub fn carry_out(&self, circuit: &Circuit) -> bool {
        circuit.read(self.cout.input)
    }
}
