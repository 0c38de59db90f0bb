//! A device abstraction for one PWM output driven by raw wrap/compare register values.
//!
//! [`OutputChannel`] is the seam between the hardware-independent sweep logic and a
//! physical PWM slice. On the Pico it is implemented by [`PwmChannel`]; host tests
//! implement it with recording fakes.
//!
//! # PWM Slices
//!
//! Each channel owns one [PWM slice](crate#glossary). Both GPIOs of a pair map to the
//! same slice. GPIO 0–31 use `slice = (pin / 2) % 8` on both chips. The RP2350B's extra
//! GPIO 32–47 wrap around slices 8–11 instead. See [`slice_for_pin`].

use crate::duty_cycle::{ChannelRegisters, PwmClock};

#[cfg(not(feature = "host"))]
mod pwm_channel;
#[cfg(not(feature = "host"))]
pub use pwm_channel::{OutputLetter, PwmChannel};

/// Number of PWM slices on the selected chip.
#[cfg(not(feature = "pico2"))]
pub const SLICE_COUNT: usize = 8;

/// Number of PWM slices on the selected chip.
#[cfg(feature = "pico2")]
pub const SLICE_COUNT: usize = 12;

/// The PWM slice that drives GPIO `pin` on the Pico 1 (RP2040).
///
/// ```rust
/// use pwm_sweep::output_channel::slice_for_pin;
///
/// assert_eq!(slice_for_pin(22), 3);
/// assert_eq!(slice_for_pin(12), 6);
/// ```
#[cfg(not(feature = "pico2"))]
#[must_use]
pub const fn slice_for_pin(pin: u8) -> usize {
    rp2040_slice_for_pin(pin)
}

/// The PWM slice that drives GPIO `pin` on the Pico 2 (RP2350B).
///
/// ```rust
/// use pwm_sweep::output_channel::slice_for_pin;
///
/// assert_eq!(slice_for_pin(22), 3);
/// assert_eq!(slice_for_pin(32), 8);
/// assert_eq!(slice_for_pin(47), 11);
/// ```
#[cfg(feature = "pico2")]
#[must_use]
pub const fn slice_for_pin(pin: u8) -> usize {
    rp235xb_slice_for_pin(pin)
}

/// RP2040 pin-to-slice mapping: eight slices, repeating every 16 GPIOs.
///
/// ```rust
/// use pwm_sweep::output_channel::rp2040_slice_for_pin;
///
/// assert_eq!(rp2040_slice_for_pin(0), 0);
/// assert_eq!(rp2040_slice_for_pin(29), 6);
/// ```
#[must_use]
pub const fn rp2040_slice_for_pin(pin: u8) -> usize {
    (pin as usize / 2) % 8
}

/// RP2350B pin-to-slice mapping. GPIO 32–47 drive slices 8–11, two pins per slice,
/// repeating every 8 GPIOs.
///
/// ```rust
/// use pwm_sweep::output_channel::rp235xb_slice_for_pin;
///
/// assert_eq!(rp235xb_slice_for_pin(31), 7);
/// assert_eq!(rp235xb_slice_for_pin(32), 8);
/// assert_eq!(rp235xb_slice_for_pin(39), 11);
/// assert_eq!(rp235xb_slice_for_pin(40), 8);
/// ```
#[must_use]
pub const fn rp235xb_slice_for_pin(pin: u8) -> usize {
    if pin < 32 {
        rp2040_slice_for_pin(pin)
    } else {
        8 | ((pin as usize >> 1) & 3)
    }
}

/// One physical pulse-generating output.
pub trait OutputChannel {
    /// Write `registers` to the slice and make sure it is producing output.
    ///
    /// Idempotent: applying the same registers twice leaves the channel exactly as
    /// applying them once.
    fn apply(&mut self, registers: ChannelRegisters);

    /// Acknowledge this slice's pending wrap interrupt.
    fn clear_wrap(&mut self);

    /// Drive a pulse of `pulse_width_us` microseconds at `clock`'s carrier frequency.
    fn set_pulse_width_us(&mut self, clock: &PwmClock, pulse_width_us: u16) {
        self.apply(clock.duty_cycle(u32::from(pulse_width_us)).registers());
    }
}

impl<T: OutputChannel + ?Sized> OutputChannel for &mut T {
    fn apply(&mut self, registers: ChannelRegisters) {
        (**self).apply(registers);
    }

    fn clear_wrap(&mut self) {
        (**self).clear_wrap();
    }
}
