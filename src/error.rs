//! Error type shared by every device abstraction in this crate.

use derive_more::derive::{Display, Error};

/// Errors returned while configuring clocks, channels, and the wrap interrupt.
///
/// Nothing on the interrupt path returns an error; every variant is raised during
/// initialization, before the sweep is armed.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    /// Clock rate, prescaler, or carrier frequency is zero, or the prescaler does not fit
    /// the 8-bit integer divider.
    #[display("invalid PWM clock: clock_hz={clock_hz} prescaler={prescaler} carrier_hz={carrier_hz}")]
    InvalidClock {
        /// Timer input clock rate in Hz.
        clock_hz: u32,
        /// Integer clock divider.
        prescaler: u32,
        /// Carrier (pulse repetition) frequency in Hz.
        carrier_hz: u32,
    },

    /// The computed wrap value does not fit the 16-bit TOP register.
    #[display("wrap {wrap} does not fit the 16-bit TOP register")]
    WrapOutOfRange {
        /// Computed timer counts per carrier period.
        wrap: u32,
    },

    /// Sweep bounds are empty or the step is zero.
    #[display("invalid sweep: min_us={min_us} max_us={max_us} step_us={step_us}")]
    InvalidSweepBounds {
        /// Lower pulse-width bound in microseconds.
        min_us: u16,
        /// Upper pulse-width bound in microseconds.
        max_us: u16,
        /// Pulse-width change per tick in microseconds.
        step_us: u16,
    },

    /// The wrap interrupt already owns a scheduler.
    #[display("wrap interrupt is already armed")]
    AlreadyArmed,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
