//! Sweep a servo and a PWM-dimmed LED from a single PWM wrap interrupt on Pico 1 and 2.
//!
//! The pieces, bottom-up:
//!
//! - **[`duty_cycle`]:** turn a pulse width in microseconds into wrap/compare register values.
//! - **[`output_channel`]:** write those values to one PWM slice and keep it running.
//! - **[`sweep`]:** the state machine that steps the pulse width between two bounds.
//! - **[`wrap_scheduler`]:** run the sweep once per PWM wrap event and drive both outputs.
//! - **[`startup`]:** the blocking motion that runs before the interrupt is armed.
//!
//! # Glossary
//!
//! - **PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation)) Slices:** Pico 1 has 8 slices (& 16 channels), Pico 2 has 12. These "slices"
//!   are unrelated to Rust slices.
//! - **Wrap:** the counter value at which one carrier period ends and the counter restarts.
//! - **Threshold / compare:** the counter value at which the output goes from active to inactive.
//! - **Duty:** used loosely for the active pulse width in microseconds, not a 0–1 ratio.
//! - **Carrier frequency:** the fixed repetition rate of the pulse train (50 Hz for servos).
//! - **Prescaler:** the integer divider applied to the system clock before the PWM counter.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: the wrap interrupt binding needs cortex-m-rt
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

pub mod duty_cycle;
mod error;
pub mod output_channel;
pub mod startup;
pub mod sweep;
pub mod wrap_scheduler;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
