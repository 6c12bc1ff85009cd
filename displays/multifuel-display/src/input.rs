//! Front-panel input
//!
//! Four push buttons and one quadrature encoder. Buttons are debounced with
//! a fixed settle time; encoder ticks are folded into whole detents.

use heapless::Deque;
use multifuel_hal::gpio::{ActiveLow, InputPin};

/// Button settle time before a level change is accepted
pub const DEBOUNCE_MS: u32 = 50;

/// Raw quadrature transitions per mechanical detent
pub const TICKS_PER_DETENT: i32 = 4;

/// User intent, independent of which control produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// Left button
    Left,
    /// Right button
    Right,
    /// Menu button
    Menu,
    /// Select (main) button
    Select,
    /// Encoder turned by a signed number of detents
    Rotate(i8),
}

impl NavigationEvent {
    /// Signed step carried by the event
    ///
    /// Left/Right count as one detent so the buttons can edit values too.
    pub fn step(&self) -> i8 {
        match self {
            NavigationEvent::Left => -1,
            NavigationEvent::Right => 1,
            NavigationEvent::Rotate(detents) => detents.signum(),
            _ => 0,
        }
    }
}

/// Source of navigation events
pub trait InputSource {
    /// Sample the controls and return the next pending event
    fn poll(&mut self, now_ms: u32) -> Option<NavigationEvent>;
}

/// Fixed-threshold button debouncer
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    stable: bool,
    candidate: bool,
    changed_at: u32,
    threshold_ms: u32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub const fn new(threshold_ms: u32) -> Self {
        Self {
            stable: false,
            candidate: false,
            changed_at: 0,
            threshold_ms,
        }
    }

    /// Feed the raw level; returns true on a debounced press
    pub fn update(&mut self, active: bool, now_ms: u32) -> bool {
        if active != self.candidate {
            self.candidate = active;
            self.changed_at = now_ms;
            return false;
        }
        if self.candidate != self.stable
            && now_ms.wrapping_sub(self.changed_at) >= self.threshold_ms
        {
            self.stable = self.candidate;
            return self.stable;
        }
        false
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

/// Folds raw encoder ticks into detents, keeping the remainder
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderAccumulator {
    ticks: i32,
}

impl EncoderAccumulator {
    /// Add raw ticks read from the quadrature decoder
    pub fn add_ticks(&mut self, ticks: i32) {
        self.ticks = self.ticks.saturating_add(ticks);
    }

    /// Take whole detents accumulated so far
    pub fn take_detents(&mut self) -> i8 {
        let detents = (self.ticks / TICKS_PER_DETENT).clamp(i8::MIN as i32, i8::MAX as i32);
        self.ticks -= detents * TICKS_PER_DETENT;
        detents as i8
    }

    /// Ticks not yet forming a whole detent
    pub fn pending_ticks(&self) -> i32 {
        self.ticks
    }
}

const QUEUE_DEPTH: usize = 8;

/// Buttons plus encoder as one [`InputSource`]
pub struct PanelInput<P> {
    buttons: [(ActiveLow<P>, Debouncer, NavigationEvent); 4],
    encoder: EncoderAccumulator,
    pending: Deque<NavigationEvent, QUEUE_DEPTH>,
}

impl<P: InputPin> PanelInput<P> {
    /// Create a panel from active-low button pins
    pub fn new(left: P, right: P, menu: P, select: P) -> Self {
        let button = |pin, event| (ActiveLow(pin), Debouncer::default(), event);
        Self {
            buttons: [
                button(left, NavigationEvent::Left),
                button(right, NavigationEvent::Right),
                button(menu, NavigationEvent::Menu),
                button(select, NavigationEvent::Select),
            ],
            encoder: EncoderAccumulator::default(),
            pending: Deque::new(),
        }
    }

    /// Feed raw encoder ticks counted since the last call
    pub fn add_encoder_ticks(&mut self, ticks: i32) {
        self.encoder.add_ticks(ticks);
    }
}

impl<P: InputPin> InputSource for PanelInput<P> {
    fn poll(&mut self, now_ms: u32) -> Option<NavigationEvent> {
        let detents = self.encoder.take_detents();
        if detents != 0 {
            let _ = self.pending.push_back(NavigationEvent::Rotate(detents));
        }
        for (pin, debouncer, event) in &mut self.buttons {
            if debouncer.update(pin.is_active(), now_ms) {
                // A full queue drops the press; the user will press again.
                let _ = self.pending.push_back(*event);
            }
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    struct Pin<'a>(&'a Cell<bool>);

    impl InputPin for Pin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_debounce_requires_stable_level() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.update(true, 0));
        assert!(!debouncer.update(true, 30));
        assert!(debouncer.update(true, 50));
        // Held: no repeat
        assert!(!debouncer.update(true, 500));
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn test_debounce_rejects_bounce() {
        let mut debouncer = Debouncer::default();
        debouncer.update(true, 0);
        debouncer.update(false, 10);
        debouncer.update(true, 20);
        assert!(!debouncer.update(true, 60));
        assert!(debouncer.update(true, 70));
    }

    #[test]
    fn test_encoder_keeps_remainder() {
        let mut encoder = EncoderAccumulator::default();
        encoder.add_ticks(7);
        assert_eq!(encoder.take_detents(), 1);
        encoder.add_ticks(1);
        assert_eq!(encoder.take_detents(), 1);
        encoder.add_ticks(-5);
        assert_eq!(encoder.take_detents(), -1);
    }

    #[test]
    fn test_event_step() {
        assert_eq!(NavigationEvent::Rotate(7).step(), 1);
        assert_eq!(NavigationEvent::Rotate(-3).step(), -1);
        assert_eq!(NavigationEvent::Left.step(), -1);
        assert_eq!(NavigationEvent::Menu.step(), 0);
    }

    #[test]
    fn test_panel_reports_press_then_rotation() {
        let levels = [Cell::new(true), Cell::new(true), Cell::new(true), Cell::new(true)];
        let mut panel = PanelInput::new(
            Pin(&levels[0]),
            Pin(&levels[1]),
            Pin(&levels[2]),
            Pin(&levels[3]),
        );

        assert_eq!(panel.poll(0), None);
        levels[2].set(false);
        assert_eq!(panel.poll(10), None);
        assert_eq!(panel.poll(60), Some(NavigationEvent::Menu));

        panel.add_encoder_ticks(-8);
        assert_eq!(panel.poll(70), Some(NavigationEvent::Rotate(-2)));
        assert_eq!(panel.poll(80), None);
    }

    proptest! {
        #[test]
        fn prop_detents_conserve_ticks(chunks in proptest::collection::vec(-20i32..20, 0..32)) {
            let mut encoder = EncoderAccumulator::default();
            let mut detents = 0i32;
            for ticks in &chunks {
                encoder.add_ticks(*ticks);
                detents += encoder.take_detents() as i32;
            }
            let total: i32 = chunks.iter().sum();
            prop_assert_eq!(detents * TICKS_PER_DETENT + encoder.pending_ticks(), total);
            prop_assert!(encoder.pending_ticks().abs() < TICKS_PER_DETENT);
        }
    }
}
