use tracing::{debug, instrument, trace, warn};

use crate::circuit_sim::{Passes, RunResult, SimConfig};
use crate::element::{Element, ElementId, ElementKind, SwitchType};
use crate::error::{Error, Result};
use crate::net::{Pin, PinDirection, PinId, Position, Signal, SignalId, Wire, WireId};

/// Owns every element, pin, signal and wire of a schematic.
///
/// Ids handed out by one circuit index straight into its tables. The
/// unchecked entry points panic on a foreign id, the `try_*` ones and the
/// switch events return an [`Error`] instead.
#[derive(Debug, Default, Clone)]
pub struct Circuit {
    config: SimConfig,
    elements: Vec<Element>,
    pins: Vec<Pin>,
    signals: Vec<Signal>,
    wires: Vec<Wire>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    /// Allocates a pin for an element that is about to be registered with
    /// [`Circuit::add_element`].
    pub fn create_pin(&mut self, position: Position, direction: PinDirection) -> PinId {
        let pin_id = PinId::from_index(self.pins.len());
        self.pins.push(Pin::new(position, direction));
        pin_id
    }

    /// Registers an element and claims every pin named by its kind. Elements
    /// are evaluated in the order they were added.
    ///
    /// # Panics
    ///
    /// If a pin already belongs to an element, or is named twice by `kind`.
    pub fn add_element(&mut self, position: Position, kind: ElementKind) -> ElementId {
        let element_id = ElementId::from_index(self.elements.len());
        for pin_id in kind.pins() {
            let pin = &mut self.pins[pin_id.index()];
            assert!(pin.owner.is_none(), "{pin_id} already has an owner");
            pin.owner = Some(element_id);
        }
        debug!(element = %element_id, kind = kind.name(), "element registered");
        self.elements.push(Element { position, kind });
        element_id
    }

    fn create_signal(&mut self, value: bool) -> SignalId {
        let signal_id = SignalId::from_index(self.signals.len());
        self.signals.push(Signal::new(value));
        signal_id
    }

    /// Wires two pins together, unifying their nets.
    ///
    /// When both pins already carry a signal, `a`'s survives and every wire
    /// on `b`'s net is moved over to it, along with both of its pins. The
    /// surviving net keeps `a`'s value.
    pub fn connect(&mut self, a: PinId, b: PinId) -> WireId {
        let signal = match (self.pins[a.index()].signal, self.pins[b.index()].signal) {
            (None, None) => {
                let signal = self.create_signal(false);
                self.pins[a.index()].signal = Some(signal);
                self.pins[b.index()].signal = Some(signal);
                debug!(%a, %b, %signal, "new net");
                signal
            }
            (Some(signal), None) => {
                self.pins[b.index()].signal = Some(signal);
                debug!(%a, %b, %signal, "net extended");
                signal
            }
            (None, Some(signal)) => {
                self.pins[a.index()].signal = Some(signal);
                debug!(%a, %b, %signal, "net extended");
                signal
            }
            (Some(survivor), Some(loser)) => {
                let rewired = self.merge_signals(survivor, loser);
                self.pins[b.index()].signal = Some(survivor);
                debug!(%a, %b, %survivor, %loser, rewired, "nets merged");
                survivor
            }
        };
        let wire_id = WireId::from_index(self.wires.len());
        self.wires.push(Wire { a, b, signal });
        wire_id
    }

    pub fn try_connect(&mut self, a: PinId, b: PinId) -> Result<WireId> {
        self.check_pin(a)?;
        self.check_pin(b)?;
        Ok(self.connect(a, b))
    }

    fn check_pin(&self, pin: PinId) -> Result<()> {
        match self.pins.get(pin.index()) {
            Some(_) => Ok(()),
            None => Err(Error::UnknownPin(pin)),
        }
    }

    // Returns how many wires were moved onto `survivor`
    fn merge_signals(&mut self, survivor: SignalId, loser: SignalId) -> usize {
        if survivor == loser {
            return 0;
        }
        let mut rewired = 0;
        for wire in self.wires.iter_mut().filter(|wire| wire.signal == loser) {
            self.pins[wire.a.index()].signal = Some(survivor);
            self.pins[wire.b.index()].signal = Some(survivor);
            wire.signal = survivor;
            rewired += 1;
        }
        rewired
    }

    /// Gives a pin a constant level without wiring it to anything. A pin that
    /// is already on a net sets that net's value instead.
    pub fn tie(&mut self, pin: PinId, high: bool) -> SignalId {
        match self.pins[pin.index()].signal {
            Some(signal) => {
                self.signals[signal.index()].value = high;
                signal
            }
            None => {
                let signal = self.create_signal(high);
                self.pins[pin.index()].signal = Some(signal);
                debug!(%pin, %signal, high, "pin tied");
                signal
            }
        }
    }

    pub fn read(&self, pin: PinId) -> bool {
        self.pins[pin.index()].read(&self.signals)
    }

    pub fn write(&mut self, pin: PinId, value: bool) {
        self.pins[pin.index()].write(&mut self.signals, value)
    }

    fn run_pass(&mut self) {
        let Self {
            elements,
            pins,
            signals,
            ..
        } = self;
        for element in elements.iter_mut() {
            element.compute(pins, signals);
        }
    }

    /// Evaluates every element once per pass, in registration order, for as
    /// many passes as the [`SimConfig`] asks (one per element by default).
    ///
    /// There is no stability check: whatever the pins hold afterwards is the
    /// result. Use [`Circuit::settle`] or [`Circuit::is_stable`] to find out
    /// whether a circuit actually reached a fixed point.
    #[instrument(skip_all, fields(elements = self.elements.len()))]
    pub fn simulate(&mut self) {
        let passes = self.config.passes_for(self.elements.len());
        for pass in 0..passes {
            trace!(pass, "pass");
            self.run_pass();
        }
        debug!(passes, "simulated");
    }

    /// Runs passes until one of them changes nothing, giving up after
    /// `max_passes`. The pass that observes no change is counted.
    #[instrument(skip_all, fields(max_passes = max_passes))]
    pub fn settle(&mut self, max_passes: Passes) -> RunResult {
        for pass in 0..max_passes {
            let signals = self.signals.clone();
            let lights = light_states(&self.elements);
            trace!(pass, "settle pass");
            self.run_pass();
            if signals == self.signals && lights == light_states(&self.elements) {
                debug!(passes = pass + 1, "settled");
                return RunResult::Converged { passes: pass + 1 };
            }
        }
        warn!(max_passes, "circuit did not settle");
        RunResult::ReachedMaxPasses { max_passes }
    }

    /// Whether one more pass would leave every signal and light unchanged.
    /// Evaluates against scratch copies, the circuit is not touched.
    pub fn is_stable(&self) -> bool {
        let mut elements = self.elements.clone();
        let mut signals = self.signals.clone();
        for element in elements.iter_mut() {
            element.compute(&self.pins, &mut signals);
        }
        signals == self.signals && light_states(&elements) == light_states(&self.elements)
    }

    fn switch_event(
        &mut self,
        element_id: ElementId,
        event: fn(SwitchType, &mut bool),
        name: &'static str,
    ) -> Result<()> {
        let element = self
            .elements
            .get_mut(element_id.index())
            .ok_or(Error::UnknownElement(element_id))?;
        match &mut element.kind {
            ElementKind::Switch { switch, is_on, .. } => {
                event(*switch, is_on);
                debug!(element = %element_id, event = name, is_on = *is_on, "switch event");
                Ok(())
            }
            _ => Err(Error::NotASwitch(element_id)),
        }
    }

    /// Finger down on a switch. Pushbuttons turn on, toggles wait for the
    /// release.
    pub fn press(&mut self, switch: ElementId) -> Result<()> {
        self.switch_event(switch, SwitchType::press, "press")
    }

    /// Finger up. Toggles flip, pushbuttons turn off.
    pub fn release(&mut self, switch: ElementId) -> Result<()> {
        self.switch_event(switch, SwitchType::release, "release")
    }

    /// Finger dragged off the switch. Handled like a release.
    pub fn cancel(&mut self, switch: ElementId) -> Result<()> {
        self.release(switch)
    }

    /// A press immediately followed by a release, with no simulation in
    /// between. Flips a toggle. A pushbutton ends up back at rest, so its
    /// output never shows the press; pulse it with `press`, `simulate`,
    /// `release`, `simulate` instead.
    pub fn tap(&mut self, switch: ElementId) -> Result<()> {
        self.press(switch)?;
        self.release(switch)
    }

    /// Drives a switch through press/release events until its output level
    /// is `level`.
    pub fn set_switch(&mut self, switch: ElementId, level: bool) -> Result<()> {
        let (switch_type, is_on) = match self.element_checked(switch)?.kind {
            ElementKind::Switch {
                switch: switch_type,
                is_on,
                ..
            } => (switch_type, is_on),
            _ => return Err(Error::NotASwitch(switch)),
        };
        if switch_type.output(is_on) == level {
            return Ok(());
        }
        match switch_type {
            SwitchType::Toggle { .. } => self.tap(switch),
            SwitchType::Pushbutton { .. } | SwitchType::LargePushbutton { .. } => {
                if is_on {
                    self.release(switch)
                } else {
                    self.press(switch)
                }
            }
        }
    }

    fn element_checked(&self, element_id: ElementId) -> Result<&Element> {
        self.elements
            .get(element_id.index())
            .ok_or(Error::UnknownElement(element_id))
    }

    pub fn is_on(&self, switch: ElementId) -> Result<bool> {
        self.element_checked(switch)?
            .is_on()
            .ok_or(Error::NotASwitch(switch))
    }

    /// Whether a light saw a high input the last time it was computed.
    pub fn is_lit(&self, led: ElementId) -> Result<bool> {
        self.element_checked(led)?
            .is_lit()
            .ok_or(Error::NotALight(led))
    }

    pub fn element(&self, element_id: ElementId) -> Option<&Element> {
        self.elements.get(element_id.index())
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementId::from_index(index), element))
    }

    pub fn pin(&self, pin: PinId) -> Option<&Pin> {
        self.pins.get(pin.index())
    }

    pub fn pin_owner(&self, pin: PinId) -> Option<ElementId> {
        self.pin(pin).and_then(Pin::owner)
    }

    pub fn signal_of(&self, pin: PinId) -> Option<SignalId> {
        self.pin(pin).and_then(Pin::signal)
    }

    pub fn same_net(&self, a: PinId, b: PinId) -> bool {
        match (self.signal_of(a), self.signal_of(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires
            .iter()
            .enumerate()
            .map(|(index, wire)| (WireId::from_index(index), wire))
    }

    /// Level carried by a wire, high wires are drawn lit.
    pub fn wire_state(&self, wire: WireId) -> Option<bool> {
        self.wires
            .get(wire.index())
            .map(|wire| self.signals[wire.signal.index()].value)
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// Nets still carried by at least one pin. Signals merged away by
    /// [`Circuit::connect`] are not counted.
    pub fn num_signals(&self) -> usize {
        let mut live = vec![false; self.signals.len()];
        for signal in self.pins.iter().filter_map(Pin::signal) {
            live[signal.index()] = true;
        }
        live.into_iter().filter(|live| *live).count()
    }
}

fn light_states(elements: &[Element]) -> Vec<bool> {
    elements.iter().filter_map(Element::is_lit).collect()
}

#[cfg(test)]
mod test {
    use crate::{
        circuit_builder::{Gate, Led, Not, Switch},
        circuit_sim::{PassLimit, RunResult, SimConfig},
        Circuit, ElementKind, Error, LightColor, PinDirection, PinId, Position, SwitchType,
    };

    fn origin() -> Position {
        Position::default()
    }

    #[test]
    fn connect_unconnected_pins_creates_net() {
        let mut circuit = Circuit::new();
        let gate = Gate::and(&mut circuit, origin());
        let led = Led::new(&mut circuit, origin());
        assert_eq!(circuit.signal_of(gate.y), None);

        let wire = circuit.connect(gate.y, led.input);
        assert_eq!(circuit.num_signals(), 1);
        assert!(circuit.same_net(gate.y, led.input));
        let (_, recorded) = circuit.wires().next().unwrap();
        assert_eq!(Some(recorded.signal()), circuit.signal_of(gate.y));
        assert_eq!(circuit.wire_state(wire), Some(false));
    }

    #[test]
    fn connect_extends_existing_net_either_side() {
        let mut circuit = Circuit::new();
        let gate = Gate::or(&mut circuit, origin());
        let left = Led::new(&mut circuit, origin());
        let right = Led::new(&mut circuit, origin());
        circuit.connect(gate.y, left.input);
        circuit.connect(right.input, gate.y);
        assert_eq!(circuit.num_signals(), 1);
        assert!(circuit.same_net(left.input, right.input));
    }

    #[test]
    fn merge_moves_whole_net() {
        let mut circuit = Circuit::new();
        let gates: Vec<Gate> = (0..4).map(|_| Gate::xor(&mut circuit, origin())).collect();
        // Two separate nets: {g0.y, g1.a, g1.b} and {g2.y, g3.a, g3.b}
        circuit.connect(gates[0].y, gates[1].a);
        circuit.connect(gates[1].a, gates[1].b);
        circuit.connect(gates[2].y, gates[3].a);
        circuit.connect(gates[3].b, gates[3].a);
        circuit.write(gates[0].y, true);
        assert!(!circuit.same_net(gates[0].y, gates[3].b));
        assert_eq!(circuit.num_signals(), 2);

        circuit.connect(gates[1].b, gates[3].b);
        assert_eq!(circuit.num_signals(), 1);
        for pin in [gates[1].a, gates[2].y, gates[3].a, gates[3].b] {
            assert!(circuit.same_net(gates[0].y, pin), "{pin} not merged");
            assert!(circuit.read(pin), "{pin} lost the surviving value");
        }
        for (_, wire) in circuit.wires() {
            assert_eq!(Some(wire.signal()), circuit.signal_of(wire.a));
            assert_eq!(Some(wire.signal()), circuit.signal_of(wire.b));
        }
    }

    #[test]
    fn merge_with_same_net_is_noop() {
        let mut circuit = Circuit::new();
        let not = Not::new(&mut circuit, origin());
        let led = Led::new(&mut circuit, origin());
        circuit.connect(not.out, led.input);
        let signal = circuit.signal_of(led.input);
        circuit.connect(led.input, not.out);
        assert_eq!(circuit.signal_of(not.out), signal);
        assert_eq!(circuit.num_signals(), 1);
        assert_eq!(circuit.num_wires(), 2);
    }

    #[test]
    fn pins_know_their_element() {
        let mut circuit = Circuit::new();
        let gate = Gate::nand(&mut circuit, origin());
        let switch = Switch::new(&mut circuit, origin(), SwitchType::Toggle { initial: false });
        for pin in [gate.a, gate.b, gate.y] {
            assert_eq!(circuit.pin_owner(pin), Some(gate.id));
        }
        assert_eq!(circuit.pin_owner(switch.out), Some(switch.id));
    }

    #[test]
    #[should_panic(expected = "already has an owner")]
    fn pin_cannot_be_shared() {
        let mut circuit = Circuit::new();
        let pin = circuit.create_pin(origin(), PinDirection::Any);
        circuit.add_element(origin(), ElementKind::Not { input: pin, out: pin });
    }

    #[test]
    fn tie_holds_a_constant() {
        let mut circuit = Circuit::new();
        let led = Led::new(&mut circuit, origin());
        let other = Led::new(&mut circuit, origin());
        circuit.tie(led.input, true);
        circuit.simulate();
        assert!(circuit.is_lit(led.id).unwrap());

        circuit.connect(other.input, led.input);
        circuit.simulate();
        assert!(circuit.same_net(led.input, other.input));
        assert!(circuit.is_lit(other.id).unwrap());
    }

    #[test]
    fn checked_entry_points() {
        let mut circuit = Circuit::new();
        let gate = Gate::and(&mut circuit, origin());
        let foreign = PinId(99);
        assert_eq!(
            circuit.try_connect(gate.a, foreign),
            Err(Error::UnknownPin(foreign))
        );
        assert_eq!(circuit.num_wires(), 0);
        assert!(circuit.try_connect(gate.a, gate.y).is_ok());
        assert_eq!(circuit.press(gate.id), Err(Error::NotASwitch(gate.id)));
        assert_eq!(circuit.is_lit(gate.id), Err(Error::NotALight(gate.id)));
    }

    #[test]
    fn self_fed_inverter_never_settles() {
        let mut circuit = Circuit::new();
        let not = Not::new(&mut circuit, origin());
        circuit.connect(not.out, not.input);
        circuit.simulate();
        assert!(!circuit.is_stable());
        let before = circuit.read(not.out);
        assert!(!circuit.is_stable());
        assert_eq!(circuit.read(not.out), before);
        assert_eq!(
            circuit.settle(10),
            RunResult::ReachedMaxPasses { max_passes: 10 }
        );
    }

    #[test]
    fn settle_reports_passes() {
        let mut circuit = Circuit::new();
        let not = Not::new(&mut circuit, origin());
        let led = Led::new(&mut circuit, origin());
        circuit.connect(not.out, led.input);
        // First pass drives the net high, second sees nothing change
        assert_eq!(circuit.settle(10), RunResult::Converged { passes: 2 });
        assert!(circuit.is_stable());
        assert!(circuit.is_lit(led.id).unwrap());
    }

    #[test]
    fn fixed_pass_limit() {
        let config = SimConfig {
            passes: PassLimit::Fixed(1),
        };
        let mut circuit = Circuit::with_config(config);
        // Registered back to front, so one pass only moves the edge one hop
        let second = Not::new(&mut circuit, origin());
        let first = Not::new(&mut circuit, origin());
        let led = Led::new(&mut circuit, origin());
        circuit.connect(first.out, second.input);
        circuit.connect(second.out, led.input);
        circuit.simulate();
        assert!(circuit.read(first.out));
        assert!(circuit.read(second.out));
        assert!(!circuit.is_stable());

        circuit.simulate();
        assert!(!circuit.read(second.out));
        assert!(circuit.is_stable());
    }

    #[test]
    fn pushbutton_set_drives_output() {
        for normally_off in [true, false] {
            let mut circuit = Circuit::new();
            let button = Switch::pushbutton(&mut circuit, origin(), normally_off);
            let led = Led::new(&mut circuit, origin());
            circuit.connect(button.out, led.input);
            for level in [true, false, true, false] {
                button.set(&mut circuit, level).unwrap();
                circuit.simulate();
                let msg = format!("normally_off: {normally_off}, level: {level}");
                assert_eq!(button.is_on(&circuit).unwrap(), level == normally_off, "{msg}");
                assert_eq!(circuit.read(button.out), level, "{msg}");
                assert_eq!(led.is_lit(&circuit).unwrap(), level, "{msg}");
            }
        }
    }

    #[test]
    fn cancel_acts_as_release() {
        let mut circuit = Circuit::new();
        let button = Switch::pushbutton(&mut circuit, origin(), true);
        let toggle = Switch::toggle(&mut circuit, origin(), false);
        let led = Led::new(&mut circuit, origin());
        circuit.connect(button.out, led.input);

        button.press(&mut circuit).unwrap();
        circuit.simulate();
        assert!(led.is_lit(&circuit).unwrap());
        circuit.cancel(button.id).unwrap();
        circuit.simulate();
        assert!(!button.is_on(&circuit).unwrap());
        assert!(!led.is_lit(&circuit).unwrap());

        toggle.press(&mut circuit).unwrap();
        assert!(!toggle.is_on(&circuit).unwrap());
        circuit.cancel(toggle.id).unwrap();
        circuit.simulate();
        assert!(toggle.is_on(&circuit).unwrap());
        assert!(circuit.read(toggle.out));
    }

    #[test]
    fn tap_only_shows_on_toggles() {
        let mut circuit = Circuit::new();
        let button = Switch::pushbutton(&mut circuit, origin(), true);
        let toggle = Switch::toggle(&mut circuit, origin(), false);
        let button_led = Led::new(&mut circuit, origin());
        let toggle_led = Led::new(&mut circuit, origin());
        circuit.connect(button.out, button_led.input);
        circuit.connect(toggle.out, toggle_led.input);

        button.tap(&mut circuit).unwrap();
        toggle.tap(&mut circuit).unwrap();
        circuit.simulate();
        assert!(!button.is_on(&circuit).unwrap());
        assert!(!button_led.is_lit(&circuit).unwrap());
        assert!(toggle.is_on(&circuit).unwrap());
        assert!(toggle_led.is_lit(&circuit).unwrap());
    }

    #[test]
    fn led_keeps_its_color() {
        let mut circuit = Circuit::new();
        let plain = Led::new(&mut circuit, origin());
        let red = Led::with_color(&mut circuit, origin(), LightColor::Red);
        let color = |led: Led| match circuit.element(led.id).map(|element| &element.kind) {
            Some(ElementKind::Led { color, .. }) => Some(*color),
            _ => None,
        };
        assert_eq!(color(plain), Some(LightColor::Yellow));
        assert_eq!(color(red), Some(LightColor::Red));
    }
}
