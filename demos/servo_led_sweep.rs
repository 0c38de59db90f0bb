#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, future, panic};
use embassy_executor::Spawner;
use embassy_rp::clocks::clk_sys_freq;
use embassy_time::Delay;
use pwm_sweep::{
    Result,
    duty_cycle::PwmClock,
    output_channel::{PwmChannel, slice_for_pin},
    startup::{STARTUP_STEPS_DEFAULT, run_startup},
    sweep::SweepConfig,
    wrap_scheduler::{WrapScheduler, wrap_irq},
};
use {defmt::info, defmt_rtt as _, panic_probe as _};

const SERVO_PIN: u8 = 22;
const LED_PIN: u8 = 12;

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let clock = PwmClock::with_defaults(clk_sys_freq())?;
    info!(
        "clk_sys={}Hz prescaler={} wrap={} period={}µs",
        clock.clock_hz(),
        clock.prescaler(),
        clock.wrap(),
        clock.period_us()
    );

    // GPIO 22 → slice 3, GPIO 12 → slice 6. Both even, so channel A.
    let mut servo = PwmChannel::new_output_a(p.PWM_SLICE3, p.PIN_22, &clock)?;
    let mut led = PwmChannel::new_output_a(p.PWM_SLICE6, p.PIN_12, &clock)?;
    info!(
        "servo GPIO {} on slice {}, LED GPIO {} on slice {}",
        SERVO_PIN,
        slice_for_pin(SERVO_PIN),
        LED_PIN,
        slice_for_pin(LED_PIN)
    );

    run_startup(
        &mut servo,
        &mut led,
        &clock,
        &STARTUP_STEPS_DEFAULT,
        &mut Delay,
    );

    wrap_irq::arm(WrapScheduler::new(servo, led, clock, SweepConfig::DEFAULT))?;
    info!("sweep armed");

    // The executor sleeps (WFE) between interrupts.
    future::pending().await
}
