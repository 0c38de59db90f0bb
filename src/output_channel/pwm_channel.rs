use defmt::{debug, info};
use embassy_rp::Peri;
use embassy_rp::pac;
use embassy_rp::pwm::{ChannelAPin, ChannelBPin, Config, Pwm, Slice};

use crate::duty_cycle::{ChannelRegisters, PwmClock};
use crate::output_channel::OutputChannel;
use crate::{Error, Result};

/// Which of a slice's two outputs carries the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum OutputLetter {
    /// Channel A (even GPIO).
    A,
    /// Channel B (odd GPIO).
    B,
}

/// An [`OutputChannel`] backed by one RP2040/RP2350 PWM slice.
///
/// Construction programs the prescaler and leaves the slice disabled; the first
/// [`apply`](OutputChannel::apply) sets TOP and compare and starts it.
///
/// The slice index used for the wrap interrupt is read from the slice peripheral the
/// channel is built on, and the pin must be one of that slice's outputs. A channel whose
/// interrupt bit and wrap flag belong to different slices cannot be constructed.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use pwm_sweep::duty_cycle::PwmClock;
/// use pwm_sweep::output_channel::{OutputChannel, PwmChannel, slice_for_pin};
///
/// # fn example() -> pwm_sweep::Result<()> {
/// let p = embassy_rp::init(Default::default());
/// let clock = PwmClock::with_defaults(embassy_rp::clocks::clk_sys_freq())?;
///
/// // GPIO 22 is channel A of slice 3.
/// let mut servo = PwmChannel::new_output_a(p.PWM_SLICE3, p.PIN_22, &clock)?;
/// assert_eq!(servo.slice(), slice_for_pin(22));
/// servo.set_pulse_width_us(&clock, 1_470); // ~90°
/// # Ok(())
/// # }
/// ```
pub struct PwmChannel<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Kept so each write preserves the divider
    slice: usize,
    letter: OutputLetter,
}

impl<'d> PwmChannel<'d> {
    /// Drive `pin` from channel A of `slice`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClock`] if `clock`'s prescaler does not fit the 8-bit divider.
    pub fn new_output_a<S: Slice>(
        slice: Peri<'d, S>,
        pin: Peri<'d, impl ChannelAPin<S>>,
        clock: &PwmClock,
    ) -> Result<Self> {
        let number = usize::from(slice.number());
        let pwm = Pwm::new_output_a(slice, pin, Config::default());
        Self::init(pwm, number, OutputLetter::A, clock)
    }

    /// Drive `pin` from channel B of `slice`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClock`] if `clock`'s prescaler does not fit the 8-bit divider.
    pub fn new_output_b<S: Slice>(
        slice: Peri<'d, S>,
        pin: Peri<'d, impl ChannelBPin<S>>,
        clock: &PwmClock,
    ) -> Result<Self> {
        let number = usize::from(slice.number());
        let pwm = Pwm::new_output_b(slice, pin, Config::default());
        Self::init(pwm, number, OutputLetter::B, clock)
    }

    fn init(
        mut pwm: Pwm<'d>,
        slice: usize,
        letter: OutputLetter,
        clock: &PwmClock,
    ) -> Result<Self> {
        let divider = u8::try_from(clock.prescaler()).map_err(|_| Error::InvalidClock {
            clock_hz: clock.clock_hz(),
            prescaler: clock.prescaler(),
            carrier_hz: clock.carrier_hz(),
        })?;

        let mut cfg = Config::default();
        cfg.divider = divider.into();
        cfg.phase_correct = false; // edge-aligned: one period = wrap + 1 ticks
        cfg.enable = false;
        pwm.set_config(&cfg);

        info!(
            "PwmChannel slice={} channel={} div={} wrap={}",
            slice,
            letter,
            divider,
            clock.wrap()
        );

        Ok(Self {
            pwm,
            cfg,
            slice,
            letter,
        })
    }

    /// The index of the slice this channel was built on.
    #[must_use]
    pub const fn slice(&self) -> usize {
        self.slice
    }

    /// The slice output carrying the signal.
    #[must_use]
    pub const fn letter(&self) -> OutputLetter {
        self.letter
    }

    /// True once the slice has been started by [`apply`](OutputChannel::apply).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.cfg.enable
    }

    /// Route this slice's wrap event to the PWM wrap interrupt.
    pub fn enable_wrap_irq(&mut self) {
        self.pwm.clear_wrapped();
        set_wrap_irq_enabled(self.slice, true);
        debug!("PwmChannel slice={} wrap irq enabled", self.slice);
    }

    /// Stop routing this slice's wrap event to the PWM wrap interrupt.
    pub fn disable_wrap_irq(&mut self) {
        set_wrap_irq_enabled(self.slice, false);
        self.pwm.clear_wrapped();
        debug!("PwmChannel slice={} wrap irq disabled", self.slice);
    }

    /// Stop the slice. The next [`apply`](OutputChannel::apply) restarts it.
    pub fn disable(&mut self) {
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }
}

impl OutputChannel for PwmChannel<'_> {
    fn apply(&mut self, registers: ChannelRegisters) {
        self.cfg.top = registers.top;
        match self.letter {
            OutputLetter::A => self.cfg.compare_a = registers.compare,
            OutputLetter::B => self.cfg.compare_b = registers.compare,
        }
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }

    fn clear_wrap(&mut self) {
        self.pwm.clear_wrapped();
    }
}

// Slices share one interrupt-enable register; each owns one bit.
#[cfg(not(feature = "pico2"))]
fn set_wrap_irq_enabled(slice: usize, enabled: bool) {
    let bit = 1_u32 << slice;
    pac::PWM.inte().modify(|w| {
        if enabled {
            w.0 |= bit;
        } else {
            w.0 &= !bit;
        }
    });
}

#[cfg(feature = "pico2")]
fn set_wrap_irq_enabled(slice: usize, enabled: bool) {
    let bit = 1_u32 << slice;
    pac::PWM.irq0_inte().modify(|w| {
        if enabled {
            w.0 |= bit;
        } else {
            w.0 &= !bit;
        }
    });
}
