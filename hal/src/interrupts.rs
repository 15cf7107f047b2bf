//! Interrupt masking abstraction
//!
//! Key dispatch must not be re-entered by the scan tick. Callers wrap the
//! dispatch in [`without_interrupts`], which restores whatever state was
//! active before.

/// Interrupt control trait
///
/// Different architectures have different interrupt mechanisms, but all can
/// implement this trait.
pub trait InterruptHal {
    /// Enables interrupts
    fn enable_interrupts(&mut self);

    /// Disables interrupts
    fn disable_interrupts(&mut self);

    /// Returns whether interrupts are enabled
    fn interrupts_enabled(&self) -> bool;
}

/// Runs `f` with interrupts masked, then restores the previous state
pub fn without_interrupts<I, R, F>(hal: &mut I, f: F) -> R
where
    I: InterruptHal + ?Sized,
    F: FnOnce() -> R,
{
    let was_enabled = hal.interrupts_enabled();
    if was_enabled {
        hal.disable_interrupts();
    }
    let result = f();
    if was_enabled {
        hal.enable_interrupts();
    }
    result
}

/// Software interrupt flag
///
/// Stands in for a global interrupt enable bit on hosts without one. Counts
/// how many times interrupts were masked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterruptFlag {
    enabled: bool,
    masked: u64,
}

impl InterruptFlag {
    pub const fn new() -> Self {
        Self {
            enabled: false,
            masked: 0,
        }
    }

    /// Number of enabled-to-disabled transitions
    pub fn masked_count(&self) -> u64 {
        self.masked
    }
}

impl InterruptHal for InterruptFlag {
    fn enable_interrupts(&mut self) {
        self.enabled = true;
    }

    fn disable_interrupts(&mut self) {
        if self.enabled {
            self.masked += 1;
        }
        self.enabled = false;
    }

    fn interrupts_enabled(&self) -> bool {
        self.enabled
    }
}
