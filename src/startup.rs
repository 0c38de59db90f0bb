//! The blocking startup motion that runs before the sweep is armed.
//!
//! Each step writes one pulse width directly to both the servo and the LED (the LED gets
//! the same linear value here, not the squared one the sweep uses) and then holds it.
//! The default sequence swings the servo to 180°, 90°, and 0°, holding each for five
//! seconds, which leaves it at the position the sweep starts from.

use embedded_hal::delay::DelayNs;

use crate::duty_cycle::PwmClock;
use crate::output_channel::OutputChannel;

/// One startup position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct StartupStep {
    /// Pulse width written to both outputs, in microseconds.
    pub pulse_width_us: u16,
    /// How long to hold it, in milliseconds.
    pub hold_ms: u32,
}

impl StartupStep {
    /// A step holding `pulse_width_us` for `hold_ms` milliseconds.
    #[must_use]
    pub const fn new(pulse_width_us: u16, hold_ms: u32) -> Self {
        Self {
            pulse_width_us,
            hold_ms,
        }
    }
}

/// Default hold after each startup step (milliseconds).
pub const STARTUP_HOLD_MS_DEFAULT: u32 = 5_000;

/// 180° (2400 µs), 90° (1470 µs), then 0° (500 µs).
pub const STARTUP_STEPS_DEFAULT: [StartupStep; 3] = [
    StartupStep::new(2_400, STARTUP_HOLD_MS_DEFAULT),
    StartupStep::new(1_470, STARTUP_HOLD_MS_DEFAULT),
    StartupStep::new(500, STARTUP_HOLD_MS_DEFAULT),
];

/// Write each step to both outputs and block for its hold time.
///
/// Must finish before the wrap interrupt is armed; nothing else writes the channels
/// while it runs.
pub fn run_startup<S, L, D>(
    servo: &mut S,
    led: &mut L,
    clock: &PwmClock,
    steps: &[StartupStep],
    delay: &mut D,
) where
    S: OutputChannel + ?Sized,
    L: OutputChannel + ?Sized,
    D: DelayNs + ?Sized,
{
    for step in steps {
        #[cfg(not(feature = "host"))]
        defmt::info!(
            "startup: {}µs for {}ms",
            step.pulse_width_us,
            step.hold_ms
        );
        servo.set_pulse_width_us(clock, step.pulse_width_us);
        led.set_pulse_width_us(clock, step.pulse_width_us);
        delay.delay_ms(step.hold_ms);
    }
}
