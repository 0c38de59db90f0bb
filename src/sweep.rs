//! The state machine that sweeps a servo back and forth while driving a companion LED.
//!
//! Each [`tick`](SweepState::tick) emits one pulse width for the servo and a squared
//! value for the LED, then steps the pulse width toward the current bound. The direction
//! flips on the same tick a bound is reached, so with the defaults (500 µs to 2400 µs in
//! 5 µs steps) one full sweep up and back takes 760 ticks.
//!
//! # Example
//!
//! ```rust
//! use pwm_sweep::sweep::{Direction, SweepConfig, SweepState};
//!
//! let mut sweep = SweepState::new(SweepConfig::DEFAULT);
//! assert_eq!(sweep.tick().servo_duty, 500);
//! assert_eq!(sweep.tick().servo_duty, 505);
//! assert_eq!(sweep.direction(), Direction::Increasing);
//! ```

use crate::{Error, Result};

/// Default lower pulse-width bound (microseconds), the servo's 0° position.
pub const SWEEP_MIN_US_DEFAULT: u16 = 500;

/// Default upper pulse-width bound (microseconds), the servo's 180° position.
pub const SWEEP_MAX_US_DEFAULT: u16 = 2_400;

/// Default pulse-width change per tick (microseconds).
pub const SWEEP_STEP_US_DEFAULT: u16 = 5;

/// Bounds and step size of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct SweepConfig {
    min_us: u16,
    max_us: u16,
    step_us: u16,
}

impl SweepConfig {
    /// 500 µs to 2400 µs in 5 µs steps.
    pub const DEFAULT: Self = Self {
        min_us: SWEEP_MIN_US_DEFAULT,
        max_us: SWEEP_MAX_US_DEFAULT,
        step_us: SWEEP_STEP_US_DEFAULT,
    };

    /// Create a sweep between `min_us` and `max_us` (inclusive) in `step_us` increments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSweepBounds`] if `min_us >= max_us` or `step_us == 0`.
    pub const fn new(min_us: u16, max_us: u16, step_us: u16) -> Result<Self> {
        if min_us >= max_us || step_us == 0 {
            return Err(Error::InvalidSweepBounds {
                min_us,
                max_us,
                step_us,
            });
        }
        Ok(Self {
            min_us,
            max_us,
            step_us,
        })
    }

    /// Lower bound in microseconds.
    #[must_use]
    pub const fn min_us(&self) -> u16 {
        self.min_us
    }

    /// Upper bound in microseconds.
    #[must_use]
    pub const fn max_us(&self) -> u16 {
        self.max_us
    }

    /// Step size in microseconds.
    #[must_use]
    pub const fn step_us(&self) -> u16 {
        self.step_us
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Which way the pulse width is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Direction {
    /// Stepping toward the upper bound.
    Increasing,
    /// Stepping toward the lower bound.
    Decreasing,
}

/// Values emitted by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct SweepOutput {
    /// Servo pulse width in microseconds.
    pub servo_duty: u16,
    /// `servo_duty²`, not yet narrowed to any register width.
    ///
    /// The squaring makes LED brightness change non-linearly. Callers narrow it with
    /// [`led_pulse_width_us`](Self::led_pulse_width_us) before writing it to a channel.
    pub led_duty: u32,
}

impl SweepOutput {
    /// The LED pulse width as the 16-bit register path sees it: the low 16 bits of
    /// [`led_duty`](Self::led_duty).
    ///
    /// `led_duty` reaches 2400² = 5 760 000, far wider than 16 bits, so this value
    /// wraps around many times over one sweep instead of ramping smoothly.
    #[must_use]
    pub const fn led_pulse_width_us(&self) -> u16 {
        crate::duty_cycle::narrow_to_register(self.led_duty)
    }
}

/// Current position and direction of a sweep.
///
/// Owned by whoever advances it (normally a
/// [`WrapScheduler`](crate::wrap_scheduler::WrapScheduler)) and mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct SweepState {
    config: SweepConfig,
    duty: u16,
    direction: Direction,
    initialized: bool,
}

impl SweepState {
    /// A sweep parked at its lower bound, moving up. The first tick latches it as
    /// initialized.
    #[must_use]
    pub const fn new(config: SweepConfig) -> Self {
        Self {
            config,
            duty: config.min_us,
            direction: Direction::Increasing,
            initialized: false,
        }
    }

    /// Emit the current outputs and step toward the active bound.
    ///
    /// The first tick after [`new`](Self::new) or [`reset`](Self::reset) always starts
    /// from the lower bound, moving up, whatever the previous position was.
    pub const fn tick(&mut self) -> SweepOutput {
        if !self.initialized {
            self.duty = self.config.min_us;
            self.direction = Direction::Increasing;
            self.initialized = true;
        }

        let servo_duty = self.duty;
        let led_duty = (servo_duty as u32).saturating_mul(servo_duty as u32);

        match self.direction {
            Direction::Increasing => {
                let next = self.duty.saturating_add(self.config.step_us);
                self.duty = if next > self.config.max_us {
                    self.config.max_us
                } else {
                    next
                };
                if self.duty >= self.config.max_us {
                    self.direction = Direction::Decreasing;
                }
            }
            Direction::Decreasing => {
                let next = self.duty.saturating_sub(self.config.step_us);
                self.duty = if next < self.config.min_us {
                    self.config.min_us
                } else {
                    next
                };
                if self.duty <= self.config.min_us {
                    self.direction = Direction::Increasing;
                }
            }
        }

        SweepOutput {
            servo_duty,
            led_duty,
        }
    }

    /// Forget the current position. The next tick restarts from the lower bound.
    pub const fn reset(&mut self) {
        self.initialized = false;
    }

    /// Pulse width the next tick will emit, in microseconds.
    ///
    /// Before the first tick (or after a reset) the next tick emits the lower bound
    /// regardless of this value.
    #[must_use]
    pub const fn duty(&self) -> u16 {
        self.duty
    }

    /// Direction of the next step.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// True once a tick has run since creation or the last reset.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bounds and step of this sweep.
    #[must_use]
    pub const fn config(&self) -> SweepConfig {
        self.config
    }
}

impl Default for SweepState {
    fn default() -> Self {
        Self::new(SweepConfig::DEFAULT)
    }
}
