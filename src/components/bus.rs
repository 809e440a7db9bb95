use std::ops::{BitAnd, Shl};

use num_traits::Unsigned;

use crate::{circuit_builder::Switch, Circuit, PinId, Position, Result};

/// A group of pins read and written as one little-endian integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bus<const BITS: usize>(pub [PinId; BITS]);

impl<const BITS: usize> Bus<BITS> {
    pub fn read<T>(&self, circuit: &Circuit) -> T
    where
        T: Unsigned + Shl<usize, Output = T>,
    {
        let mut sum = T::zero();
        for (bit, pin) in self.0.iter().cloned().enumerate() {
            if circuit.read(pin) {
                sum = sum + (T::one() << bit);
            }
        }
        sum
    }

    /// Drives every pin with its bit of `val`. Bits on unconnected pins are
    /// lost, and anything driving these nets will overwrite them on the next
    /// pass.
    pub fn write<T>(&self, circuit: &mut Circuit, val: T)
    where
        T: Unsigned + Copy + BitAnd<T, Output = T> + Shl<usize, Output = T>,
    {
        for (bit, pin) in self.0.iter().cloned().enumerate() {
            circuit.write(pin, !(val & (T::one() << bit)).is_zero());
        }
    }
}

/// A row of toggle switches setting a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchBank<const BITS: usize>(pub [Switch; BITS]);

impl<const BITS: usize> SwitchBank<BITS> {
    pub fn new(circuit: &mut Circuit, position: Position) -> Self {
        SwitchBank(std::array::from_fn(|bit| {
            Switch::toggle(circuit, position + Position::new(0.0, bit as f32), false)
        }))
    }

    pub fn outputs(&self) -> Bus<BITS> {
        Bus(self.0.map(|switch| switch.out))
    }

    /// Flips switches until the bank reads `val`. Takes effect on the next
    /// simulation.
    pub fn set<T>(&self, circuit: &mut Circuit, val: T) -> Result<()>
    where
        T: Unsigned + Copy + BitAnd<T, Output = T> + Shl<usize, Output = T>,
    {
        for (bit, switch) in self.0.iter().enumerate() {
            switch.set(circuit, !(val & (T::one() << bit)).is_zero())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{circuit_builder::Led, Circuit, Position};

    use super::{Bus, SwitchBank};

    #[test]
    fn switch_bank_drives_lights() {
        let mut circuit = Circuit::new();
        let bank = SwitchBank::<8>::new(&mut circuit, Position::default());
        let leds: [Led; 8] = std::array::from_fn(|_| Led::new(&mut circuit, Position::default()));
        for (switch, led) in bank.0.iter().zip(leds.iter()) {
            circuit.connect(switch.out, led.input);
        }
        let lights = Bus(leds.map(|led| led.input));

        bank.set(&mut circuit, 0xA5u8).unwrap();
        circuit.simulate();
        assert_eq!(lights.read::<u8>(&circuit), 0xA5);
        assert_eq!(bank.outputs().read::<u32>(&circuit), 0xA5);

        bank.set(&mut circuit, 0x0Fu8).unwrap();
        circuit.simulate();
        assert_eq!(lights.read::<u16>(&circuit), 0x0F);
    }

    #[test]
    fn write_is_overridden_by_drivers() {
        let mut circuit = Circuit::new();
        let bank = SwitchBank::<4>::new(&mut circuit, Position::default());
        let leds: [Led; 4] = std::array::from_fn(|_| Led::new(&mut circuit, Position::default()));
        for (switch, led) in bank.0.iter().zip(leds.iter()) {
            circuit.connect(switch.out, led.input);
        }
        let bus = bank.outputs();
        bus.write(&mut circuit, 0b1010u8);
        assert_eq!(bus.read::<u8>(&circuit), 0b1010);
        circuit.simulate();
        assert_eq!(bus.read::<u8>(&circuit), 0);
    }
}
