//! Convert a pulse width in microseconds into PWM wrap/compare register values.
//!
//! The PWM counter runs from 0 up to a *wrap* value and then restarts, so one carrier
//! period lasts `wrap + 1` ticks of the prescaled clock. The output stays high while
//! the counter is below the compare *threshold*.
//!
//! ```text
//! wrap      = clock_hz / (carrier_hz × prescaler)
//! period_us = 1_000_000 / carrier_hz
//! threshold = wrap × pulse_width_us / period_us
//! ```
//!
//! Everything here is `const` and free of side effects, so it is safe to call from the
//! wrap interrupt.
//!
//! # Example
//!
//! ```rust
//! use pwm_sweep::duty_cycle::PwmClock;
//!
//! let clock = PwmClock::new(125_000_000, 64, 50)?;
//! let duty_cycle = clock.duty_cycle(1_470);
//! assert_eq!(duty_cycle.wrap, 39_062);
//! assert_eq!(duty_cycle.threshold, 2_871);
//! # Ok::<(), pwm_sweep::Error>(())
//! ```

use crate::{Error, Result};

/// Default carrier frequency (Hz). 50 Hz is the standard hobby servo frame rate.
pub const CARRIER_HZ_DEFAULT: u32 = 50;

/// Default integer clock divider applied before the PWM counter.
pub const PRESCALER_DEFAULT: u32 = 64;

const MICROS_PER_SECOND: u32 = 1_000_000;

// The RP2040/RP2350 integer divider field is 8 bits wide.
const PRESCALER_MAX: u32 = 255;

/// Timer register values for one carrier period.
///
/// `threshold > wrap` means the output never goes low (saturated, always high). That
/// happens when the requested pulse is longer than the carrier period and is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct DutyCycle {
    /// Timer counts in one carrier period.
    pub wrap: u32,
    /// Timer count at which the output switches from active to inactive.
    pub threshold: u32,
}

/// The values actually written to a slice's 16-bit TOP and compare registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ChannelRegisters {
    /// TOP (wrap) register.
    pub top: u16,
    /// Active channel's compare register.
    pub compare: u16,
}

impl DutyCycle {
    /// Narrow to the 16-bit hardware registers.
    ///
    /// Values wider than 16 bits keep only their low 16 bits, the same thing the
    /// register write does. [`PwmClock`] guarantees `wrap` fits, so only an oversized
    /// `threshold` is ever affected.
    #[must_use]
    pub const fn registers(self) -> ChannelRegisters {
        ChannelRegisters {
            top: narrow_to_register(self.wrap),
            compare: narrow_to_register(self.threshold),
        }
    }

    /// True when the output would be high for the whole period.
    #[must_use]
    pub const fn is_saturated(self) -> bool {
        self.threshold > self.wrap
    }
}

/// Keep the low 16 bits of `value`, the width of every PWM register on the path.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the truncation is the register narrowing being modelled"
)]
pub const fn narrow_to_register(value: u32) -> u16 {
    (value & 0xFFFF) as u16
}

/// Compute the register pair for `pulse_width_us` without a validated clock.
///
/// A zero divisor (zero carrier frequency or prescaler) yields `wrap = 0`, and the
/// product `wrap × pulse_width_us` saturates rather than overflowing.
#[must_use]
pub const fn duty_cycle(
    pulse_width_us: u32,
    clock_hz: u32,
    carrier_hz: u32,
    prescaler: u32,
) -> DutyCycle {
    let wrap = match clock_hz.checked_div(carrier_hz.saturating_mul(prescaler)) {
        Some(wrap) => wrap,
        None => 0,
    };
    let period_us = match MICROS_PER_SECOND.checked_div(carrier_hz) {
        Some(period_us) => period_us,
        None => 0,
    };
    let threshold = match wrap.saturating_mul(pulse_width_us).checked_div(period_us) {
        Some(threshold) => threshold,
        None => 0,
    };
    DutyCycle { wrap, threshold }
}

/// A validated PWM clock configuration.
///
/// See the [module documentation](mod@crate::duty_cycle) for the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct PwmClock {
    clock_hz: u32,
    prescaler: u32,
    carrier_hz: u32,
    wrap: u32,
    period_us: u32,
}

impl PwmClock {
    /// Validate a clock configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClock`] if any input is zero, the prescaler exceeds the
    /// 8-bit divider, or the carrier frequency exceeds 1 MHz. Returns
    /// [`Error::WrapOutOfRange`] if the wrap value does not fit 16 bits (or is zero).
    pub const fn new(clock_hz: u32, prescaler: u32, carrier_hz: u32) -> Result<Self> {
        if clock_hz == 0
            || prescaler == 0
            || prescaler > PRESCALER_MAX
            || carrier_hz == 0
            || carrier_hz > MICROS_PER_SECOND
        {
            return Err(Error::InvalidClock {
                clock_hz,
                prescaler,
                carrier_hz,
            });
        }
        let wrap = match clock_hz.checked_div(carrier_hz.saturating_mul(prescaler)) {
            Some(wrap) => wrap,
            None => 0,
        };
        if wrap == 0 || wrap > u16::MAX as u32 {
            return Err(Error::WrapOutOfRange { wrap });
        }
        let period_us = match MICROS_PER_SECOND.checked_div(carrier_hz) {
            Some(period_us) => period_us,
            None => 0,
        };
        Ok(Self {
            clock_hz,
            prescaler,
            carrier_hz,
            wrap,
            period_us,
        })
    }

    /// Validate `clock_hz` with [`PRESCALER_DEFAULT`] and [`CARRIER_HZ_DEFAULT`].
    ///
    /// # Errors
    ///
    /// See [`PwmClock::new`].
    pub const fn with_defaults(clock_hz: u32) -> Result<Self> {
        Self::new(clock_hz, PRESCALER_DEFAULT, CARRIER_HZ_DEFAULT)
    }

    /// Timer input clock rate in Hz.
    #[must_use]
    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Integer clock divider.
    #[must_use]
    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    /// Carrier frequency in Hz.
    #[must_use]
    pub const fn carrier_hz(&self) -> u32 {
        self.carrier_hz
    }

    /// Timer counts in one carrier period.
    #[must_use]
    pub const fn wrap(&self) -> u32 {
        self.wrap
    }

    /// Carrier period in microseconds.
    #[must_use]
    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Register pair for a pulse of `pulse_width_us` microseconds.
    ///
    /// Truncates like integer division. Pulses longer than [`period_us`](Self::period_us)
    /// give a saturated [`DutyCycle`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "range checked before the cast")]
    pub const fn duty_cycle(&self, pulse_width_us: u32) -> DutyCycle {
        // wrap fits 16 bits, so the product always fits in u64.
        let scaled = (self.wrap as u64).saturating_mul(pulse_width_us as u64);
        let threshold = match scaled.checked_div(self.period_us as u64) {
            Some(threshold) if threshold > u32::MAX as u64 => u32::MAX,
            Some(threshold) => threshold as u32,
            None => 0,
        };
        DutyCycle {
            wrap: self.wrap,
            threshold,
        }
    }
}
