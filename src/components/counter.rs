use std::ops::Shl;

use num_traits::Unsigned;

use crate::{Circuit, PinId, Position};

use super::{bus::Bus, latch::DFlipFlop};

/// Flip-flops chained so each one toggles when the previous output falls.
/// Counts up by one on every high to low transition of `clock`.
pub struct RippleCounter<const BITS: usize> {
    pub clock: PinId,
    pub flip_flops: [DFlipFlop; BITS],
    pub outputs: Bus<BITS>,
}

impl<const BITS: usize> RippleCounter<BITS> {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        assert!(BITS > 0);

        let flip_flops: [DFlipFlop; BITS] = std::array::from_fn(|bit| {
            DFlipFlop::new(circuit, position + Position::new(0.0, 6.0 * bit as f32))
        });
        for (bit, flip_flop) in flip_flops.iter().enumerate() {
            circuit.connect(flip_flop.qq, flip_flop.data);
            if bit > 0 {
                circuit.connect(flip_flops[bit - 1].q, flip_flop.clock);
            }
        }

        RippleCounter {
            clock: flip_flops[0].clock,
            outputs: Bus(flip_flops.map(|flip_flop| flip_flop.q)),
            flip_flops,
        }
    }

    pub fn value<T>(&self, circuit: &Circuit) -> T
    where
        T: Unsigned + Shl<usize, Output = T>,
    {
        self.outputs.read(circuit)
    }
}
