//! Tick-driven firmware loop
//!
//! Owns the hardware handles, the keypad scanner and the calculator. The
//! timer interrupt calls [`Firmware::on_tick`]; a resolved key is dispatched
//! with interrupts masked so the next tick cannot re-enter the calculator
//! while it redraws.

use hal::{without_interrupts, CharDisplay, InterruptHal, KeyScanner, KeypadMatrix, TimerDevice};
use input_types::KeyCode;
use log::trace;

use crate::core::{Calculator, KeyOutcome};
use crate::number::{FixedPoint, NumberFormat};

/// Keypad, display and interrupt handles wired to a calculator
pub struct Firmware<K, D, I, F: NumberFormat = FixedPoint> {
    keypad: K,
    display: D,
    interrupts: I,
    scanner: KeyScanner,
    calculator: Calculator<F>,
    /// Ticks already handled by `run_pending`
    ticks_seen: u64,
}

impl<K, D, I> Firmware<K, D, I>
where
    K: KeypadMatrix,
    D: CharDisplay,
    I: InterruptHal,
{
    pub fn new(keypad: K, display: D, interrupts: I) -> Self {
        Self::with_calculator(keypad, display, interrupts, Calculator::new())
    }
}

impl<K, D, I, F> Firmware<K, D, I, F>
where
    K: KeypadMatrix,
    D: CharDisplay,
    I: InterruptHal,
    F: NumberFormat,
{
    /// Wires the handles to a calculator built elsewhere, e.g. with its own
    /// number format
    pub fn with_calculator(
        keypad: K,
        display: D,
        interrupts: I,
        calculator: Calculator<F>,
    ) -> Self {
        Self {
            keypad,
            display,
            interrupts,
            scanner: KeyScanner::new(),
            calculator,
            ticks_seen: 0,
        }
    }

    /// Draws the input screen and enables the tick interrupt
    pub fn boot(&mut self) {
        self.calculator.boot(&mut self.display);
        self.interrupts.enable_interrupts();
    }

    /// One scan tick
    ///
    /// Returns the dispatched key and its outcome if a key was pressed.
    pub fn on_tick(&mut self) -> Option<(KeyCode, KeyOutcome)> {
        let key = self.scanner.tick(&mut self.keypad)?;

        let calculator = &mut self.calculator;
        let display = &mut self.display;
        let outcome = without_interrupts(&mut self.interrupts, || {
            calculator.apply_key(key, display)
        });
        trace!("{} -> {:?}", key, outcome);
        Some((key, outcome))
    }

    /// Runs one tick for every timer tick elapsed since the last call
    ///
    /// Returns the number of keys dispatched.
    pub fn run_pending<T: TimerDevice + ?Sized>(&mut self, timer: &mut T) -> usize {
        let now = timer.poll_ticks();
        let mut dispatched = 0;
        while self.ticks_seen < now {
            self.ticks_seen += 1;
            if self.on_tick().is_some() {
                dispatched += 1;
            }
        }
        dispatched
    }

    pub fn calculator(&self) -> &Calculator<F> {
        &self.calculator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn interrupts(&self) -> &I {
        &self.interrupts
    }

    pub fn ticks_seen(&self) -> u64 {
        self.ticks_seen
    }
}
