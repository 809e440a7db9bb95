use crate::{
    circuit_builder::{Gate, Led, Not},
    Circuit, PinId, Position, Result,
};

/// Segment order used by [`SegmentDisplay::segments`].
pub const SEGMENTS: [char; 7] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];

// a b c d e f g
const DIGITS: [[bool; 7]; 4] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
];

/// Seven-segment readout for a 2-bit number, each segment drawn with two
/// lights.
pub struct SegmentDisplay {
    pub segments: [[Led; 2]; 7],
}

impl SegmentDisplay {
    /// `bit0` and `bit1` are the low and high bit of the value shown.
    pub fn new(circuit: &mut Circuit, position: Position, bit0: PinId, bit1: PinId) -> Self {
        let not_0 = Not::new(circuit, position + Position::new(-13.0, 1.0));
        let not_1 = Not::new(circuit, position + Position::new(-13.0, 3.0));

        let mut led = |x: f32, y: f32| Led::new(circuit, position + Position::new(x, y));
        let a = [led(0.0, 0.0), led(1.0, 0.0)];
        let b = [led(1.5, 0.5), led(1.5, 1.5)];
        let f = [led(-0.5, 0.5), led(-0.5, 1.5)];
        let g = [led(0.0, 2.0), led(1.0, 2.0)];
        let c = [led(1.5, 2.5), led(1.5, 3.5)];
        let e = [led(-0.5, 2.5), led(-0.5, 3.5)];
        let d = [led(0.0, 4.0), led(1.0, 4.0)];

        // b is lit for every digit this display can show
        circuit.tie(b[0].input, true);
        circuit.tie(b[1].input, true);
        for [first, second] in [a, c, d, e, f, g] {
            circuit.connect(first.input, second.input);
        }

        circuit.connect(bit0, not_0.input);
        circuit.connect(bit1, not_1.input);

        let and = Gate::and(circuit, position + Position::new(-9.0, 1.0));
        let or_ad = Gate::or(circuit, position + Position::new(-9.0, 3.0));
        let or_c = Gate::or(circuit, position + Position::new(-5.0, 3.0));
        circuit.connect(and.a, not_0.out);
        circuit.connect(and.b, not_1.out);
        circuit.connect(or_ad.a, not_0.out);
        circuit.connect(or_ad.b, not_1.input);

        circuit.connect(or_ad.y, a[0].input);
        circuit.connect(a[0].input, d[0].input);
        circuit.connect(not_1.input, g[0].input);
        circuit.connect(or_c.y, c[0].input);
        circuit.connect(not_0.out, e[0].input);
        circuit.connect(or_c.a, and.y);
        circuit.connect(or_c.b, not_0.input);
        circuit.connect(and.y, f[0].input);

        SegmentDisplay {
            segments: [a, b, c, d, e, f, g],
        }
    }

    /// A segment counts as lit when both of its lights are.
    pub fn lit_segments(&self, circuit: &Circuit) -> Result<[bool; 7]> {
        let mut lit = [false; 7];
        for (segment, [first, second]) in lit.iter_mut().zip(self.segments.iter()) {
            *segment = first.is_lit(circuit)? && second.is_lit(circuit)?;
        }
        Ok(lit)
    }

    /// The digit currently shown, if the segments form one.
    pub fn digit(&self, circuit: &Circuit) -> Result<Option<u8>> {
        let lit = self.lit_segments(circuit)?;
        Ok(DIGITS
            .iter()
            .position(|pattern| *pattern == lit)
            .map(|digit| digit as u8))
    }
}
