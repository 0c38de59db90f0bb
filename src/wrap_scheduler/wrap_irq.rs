//! Bind a [`WrapScheduler`] to the PWM wrap interrupt.
//!
//! The interrupt has exactly one handler. It clears every pending wrap flag and runs
//! [`WrapScheduler::on_wrap`] on the scheduler handed to [`arm`]. Until [`disarm`] takes
//! it back, the scheduler is reachable only from that handler.
//!
//! # Example
//!
//! ```rust,no_run
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! use pwm_sweep::duty_cycle::PwmClock;
//! use pwm_sweep::output_channel::PwmChannel;
//! use pwm_sweep::sweep::SweepConfig;
//! use pwm_sweep::wrap_scheduler::{WrapScheduler, wrap_irq};
//!
//! # fn example() -> pwm_sweep::Result<()> {
//! let p = embassy_rp::init(Default::default());
//! let clock = PwmClock::with_defaults(embassy_rp::clocks::clk_sys_freq())?;
//!
//! let servo = PwmChannel::new_output_a(p.PWM_SLICE3, p.PIN_22, &clock)?;
//! let led = PwmChannel::new_output_a(p.PWM_SLICE6, p.PIN_12, &clock)?;
//!
//! wrap_irq::arm(WrapScheduler::new(servo, led, clock, SweepConfig::DEFAULT))?;
//! # Ok(())
//! # }
//! ```

use defmt::info;
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
#[cfg(not(feature = "pico2"))]
use embassy_rp::interrupt::PWM_IRQ_WRAP as WRAP_IRQ;
#[cfg(feature = "pico2")]
use embassy_rp::interrupt::PWM_IRQ_WRAP_0 as WRAP_IRQ;
use embassy_rp::pac;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use portable_atomic::{AtomicU32, Ordering};

use crate::Result;
use crate::output_channel::PwmChannel;
use crate::wrap_scheduler::{WrapScheduler, WrapSlot};

/// The scheduler type the wrap interrupt runs.
pub type HardwareScheduler = WrapScheduler<PwmChannel<'static>, PwmChannel<'static>>;

static WRAP_SCHEDULER: WrapSlot<CriticalSectionRawMutex, HardwareScheduler> = WrapSlot::new();

static TICK_COUNT: AtomicU32 = AtomicU32::new(0);

// Write-1-to-clear mask covering every slice's raw wrap flag.
const ALL_SLICES_MASK: u32 = (1 << crate::output_channel::SLICE_COUNT) - 1;

/// Hand `scheduler` to the wrap interrupt and start it.
///
/// Enables the wrap interrupt of both of the scheduler's slices, clears anything stale,
/// and enables the interrupt line. The first event runs the sweep from its lower bound.
///
/// # Errors
///
/// Returns [`Error::AlreadyArmed`](crate::Error::AlreadyArmed) if a scheduler is already
/// armed; the armed one keeps running and `scheduler` is dropped without touching its slices.
#[expect(unsafe_code, reason = "enabling the NVIC line is unsafe in embassy-rp")]
pub fn arm(scheduler: HardwareScheduler) -> Result<()> {
    WRAP_SCHEDULER.arm(scheduler, |scheduler| {
        scheduler.servo_mut().enable_wrap_irq();
        scheduler.led_mut().enable_wrap_irq();
        info!(
            "wrap_irq: arming servo slice={} led slice={} wrap={}",
            scheduler.servo_mut().slice(),
            scheduler.led_mut().slice(),
            scheduler.clock().wrap()
        );
    })?;

    WRAP_IRQ.unpend();
    // SAFETY: the handler is installed at link time and the scheduler it needs is in place.
    unsafe {
        WRAP_IRQ.enable();
    }
    Ok(())
}

/// Stop the wrap interrupt and take the scheduler back.
///
/// Returns `None` if nothing was armed. Call [`WrapScheduler::rearm`] before arming the
/// returned scheduler again to restart the sweep from its lower bound.
pub fn disarm() -> Option<HardwareScheduler> {
    WRAP_IRQ.disable();
    let scheduler = WRAP_SCHEDULER.disarm();
    WRAP_IRQ.unpend();

    scheduler.map(|mut scheduler| {
        scheduler.servo_mut().disable_wrap_irq();
        scheduler.led_mut().disable_wrap_irq();
        info!("wrap_irq: disarmed after {} ticks", tick_count());
        scheduler
    })
}

/// True while a scheduler is armed.
#[must_use]
pub fn is_armed() -> bool {
    WRAP_SCHEDULER.is_armed()
}

/// Wrap events handled since boot. Wraps at `u32::MAX`.
#[must_use]
pub fn tick_count() -> u32 {
    TICK_COUNT.load(Ordering::Relaxed)
}

fn on_wrap_irq() {
    if WRAP_SCHEDULER.with_armed(WrapScheduler::on_wrap).is_some() {
        TICK_COUNT.fetch_add(1, Ordering::Relaxed);
    } else {
        // Nothing armed: acknowledge everything so the line cannot re-fire.
        pac::PWM
            .intr()
            .write_value(pac::pwm::regs::Intr(ALL_SLICES_MASK));
    }
}

#[cfg(not(feature = "pico2"))]
#[interrupt]
#[allow(
    non_snake_case,
    unsafe_code,
    reason = "the vector name and its export are fixed by the interrupt table"
)]
fn PWM_IRQ_WRAP() {
    on_wrap_irq();
}

#[cfg(feature = "pico2")]
#[interrupt]
#[allow(
    non_snake_case,
    unsafe_code,
    reason = "the vector name and its export are fixed by the interrupt table"
)]
fn PWM_IRQ_WRAP_0() {
    on_wrap_irq();
}
