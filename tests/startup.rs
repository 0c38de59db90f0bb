#![allow(missing_docs)]
//! Host-level tests for the blocking startup motion.

mod common;

use common::{ChannelEvent, LoggedChannel, RecordingChannel, SharedLog};
use embedded_hal::delay::DelayNs;
use pwm_sweep::duty_cycle::{ChannelRegisters, PwmClock};
use pwm_sweep::startup::{STARTUP_HOLD_MS_DEFAULT, STARTUP_STEPS_DEFAULT, StartupStep, run_startup};

/// Records every requested delay instead of sleeping.
#[derive(Default)]
struct RecordingDelay {
    holds_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.holds_ms.push(ms);
    }
}

fn pico1_clock() -> PwmClock {
    PwmClock::with_defaults(125_000_000).expect("default clock is valid")
}

const fn registers(compare: u16) -> ChannelRegisters {
    ChannelRegisters {
        top: 39_062,
        compare,
    }
}

#[test]
fn default_steps_are_180_90_0_degrees() {
    let pulses: Vec<u16> = STARTUP_STEPS_DEFAULT
        .iter()
        .map(|step| step.pulse_width_us)
        .collect();
    assert_eq!(pulses, [2_400, 1_470, 500]);
    assert!(
        STARTUP_STEPS_DEFAULT
            .iter()
            .all(|step| step.hold_ms == STARTUP_HOLD_MS_DEFAULT)
    );
    assert_eq!(STARTUP_HOLD_MS_DEFAULT, 5_000);
}

#[test]
fn startup_writes_same_linear_pulse_to_both_outputs() {
    let clock = pico1_clock();
    let mut servo = RecordingChannel::default();
    let mut led = RecordingChannel::default();
    let mut delay = RecordingDelay::default();

    run_startup(
        &mut servo,
        &mut led,
        &clock,
        &STARTUP_STEPS_DEFAULT,
        &mut delay,
    );

    let expected = [registers(4_687), registers(2_871), registers(976)];
    assert_eq!(servo.applied(), expected);
    assert_eq!(led.applied(), expected);
    assert_eq!(delay.holds_ms, [5_000, 5_000, 5_000]);
    assert!(servo.enabled && led.enabled);
    // Startup never touches the wrap flags.
    assert!(!servo.events.contains(&ChannelEvent::ClearWrap));
}

#[test]
fn each_step_holds_after_both_writes() {
    let clock = pico1_clock();
    let log = SharedLog::default();
    let mut servo = LoggedChannel {
        name: "servo",
        log: log.clone(),
    };
    let mut led = LoggedChannel {
        name: "led",
        log: log.clone(),
    };

    // A delay that marks its position in the shared log.
    struct MarkingDelay(SharedLog);
    impl DelayNs for MarkingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(("delay", ChannelEvent::Delay(ms)));
        }
    }

    let steps = [StartupStep::new(1_000, 10), StartupStep::new(2_000, 20)];
    run_startup(
        &mut servo,
        &mut led,
        &clock,
        &steps,
        &mut MarkingDelay(log.clone()),
    );

    let log = log.borrow();
    let names: Vec<&str> = log.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["servo", "led", "delay", "servo", "led", "delay"]);
    assert_eq!(log[2].1, ChannelEvent::Delay(10));
    assert_eq!(log[5].1, ChannelEvent::Delay(20));
    assert!(!log.iter().any(|(_, event)| *event == ChannelEvent::ClearWrap));
}

#[test]
fn empty_sequence_does_nothing() {
    let clock = pico1_clock();
    let mut servo = RecordingChannel::default();
    let mut led = RecordingChannel::default();
    let mut delay = RecordingDelay::default();

    run_startup(&mut servo, &mut led, &clock, &[], &mut delay);

    assert!(servo.events.is_empty());
    assert!(led.events.is_empty());
    assert!(delay.holds_ms.is_empty());
    assert!(!servo.enabled);
}
