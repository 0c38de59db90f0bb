//! Advance a [`SweepState`] once per PWM wrap event and drive the servo and LED.
//!
//! [`WrapScheduler`] owns everything the interrupt touches: both output channels, the
//! clock configuration, and the sweep state. Its [`on_wrap`](WrapScheduler::on_wrap)
//! method is what the wrap interrupt runs. On the Pico, hand the scheduler to
//! [`wrap_irq::arm`] to bind it to the interrupt.
//!
//! # Example
//!
//! ```rust
//! use pwm_sweep::duty_cycle::{ChannelRegisters, PwmClock};
//! use pwm_sweep::output_channel::OutputChannel;
//! use pwm_sweep::sweep::SweepConfig;
//! use pwm_sweep::wrap_scheduler::WrapScheduler;
//!
//! #[derive(Default)]
//! struct Compare(u16);
//!
//! impl OutputChannel for Compare {
//!     fn apply(&mut self, registers: ChannelRegisters) {
//!         self.0 = registers.compare;
//!     }
//!     fn clear_wrap(&mut self) {}
//! }
//!
//! let clock = PwmClock::with_defaults(125_000_000)?;
//! let mut scheduler =
//!     WrapScheduler::new(Compare::default(), Compare::default(), clock, SweepConfig::DEFAULT);
//!
//! assert_eq!(scheduler.on_wrap().servo_duty, 500);
//! assert_eq!(scheduler.servo_mut().0, 976);
//! # Ok::<(), pwm_sweep::Error>(())
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::duty_cycle::PwmClock;
use crate::output_channel::OutputChannel;
use crate::sweep::{SweepConfig, SweepOutput, SweepState};
use crate::{Error, Result};

#[cfg(not(feature = "host"))]
pub mod wrap_irq;

/// Owns a servo channel, an LED channel, and the sweep that drives them.
pub struct WrapScheduler<S, L> {
    servo: S,
    led: L,
    clock: PwmClock,
    state: SweepState,
}

impl<S: OutputChannel, L: OutputChannel> WrapScheduler<S, L> {
    /// Create a scheduler whose sweep starts at `sweep`'s lower bound.
    #[must_use]
    pub const fn new(servo: S, led: L, clock: PwmClock, sweep: SweepConfig) -> Self {
        Self {
            servo,
            led,
            clock,
            state: SweepState::new(sweep),
        }
    }

    /// Handle one wrap event.
    ///
    /// Both channels' wrap flags are cleared first, unconditionally; a flag left set
    /// would re-enter the handler forever. Then the sweep ticks and both channels are
    /// rewritten. The servo gets the emitted pulse width, the LED gets the squared value
    /// narrowed to 16 bits. Never blocks or allocates.
    pub fn on_wrap(&mut self) -> SweepOutput {
        self.servo.clear_wrap();
        self.led.clear_wrap();

        let output = self.state.tick();
        self.servo.set_pulse_width_us(&self.clock, output.servo_duty);
        self.led
            .set_pulse_width_us(&self.clock, output.led_pulse_width_us());
        output
    }

    /// Restart the sweep from its lower bound on the next wrap event.
    pub const fn rearm(&mut self) {
        self.state.reset();
    }

    /// Current sweep state.
    #[must_use]
    pub const fn state(&self) -> &SweepState {
        &self.state
    }

    /// Clock configuration used for every register calculation.
    #[must_use]
    pub const fn clock(&self) -> &PwmClock {
        &self.clock
    }

    /// The servo channel.
    pub const fn servo_mut(&mut self) -> &mut S {
        &mut self.servo
    }

    /// The LED channel.
    pub const fn led_mut(&mut self) -> &mut L {
        &mut self.led
    }

    /// Give back both channels.
    pub fn into_channels(self) -> (S, L) {
        (self.servo, self.led)
    }
}

/// A slot that holds at most one value handed over to an interrupt handler.
///
/// `wrap_irq` keeps its scheduler in a static `WrapSlot<CriticalSectionRawMutex, _>`.
/// Host tests use [`NoopRawMutex`](embassy_sync::blocking_mutex::raw::NoopRawMutex).
pub struct WrapSlot<M: RawMutex, T> {
    slot: Mutex<M, RefCell<Option<T>>>,
}

impl<M: RawMutex, T> WrapSlot<M, T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store `value`, running `prepare` on it first while the slot is locked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyArmed`] if the slot is full. The stored value is untouched,
    /// `prepare` is not run, and `value` is dropped.
    pub fn arm(&self, mut value: T, prepare: impl FnOnce(&mut T)) -> Result<()> {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(Error::AlreadyArmed);
            }
            prepare(&mut value);
            *slot = Some(value);
            Ok(())
        })
    }

    /// Take the stored value back, leaving the slot empty.
    pub fn disarm(&self) -> Option<T> {
        self.slot.lock(|slot| slot.borrow_mut().take())
    }

    /// True while a value is stored.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.slot.lock(|slot| slot.borrow().is_some())
    }

    /// Run `f` on the stored value. Returns `None` without calling `f` if the slot is empty.
    pub fn with_armed<U>(&self, f: impl FnOnce(&mut T) -> U) -> Option<U> {
        self.slot.lock(|slot| slot.borrow_mut().as_mut().map(f))
    }
}

impl<M: RawMutex, T> Default for WrapSlot<M, T> {
    fn default() -> Self {
        Self::new()
    }
}
