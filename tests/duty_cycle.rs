#![allow(missing_docs)]
//! Host-level tests for the pulse-width to register calculation.

use pwm_sweep::Error;
use pwm_sweep::duty_cycle::{
    ChannelRegisters, DutyCycle, PwmClock, duty_cycle, narrow_to_register,
};

const PICO1_CLK_HZ: u32 = 125_000_000;

fn pico1_clock() -> PwmClock {
    PwmClock::new(PICO1_CLK_HZ, 64, 50).expect("default clock is valid")
}

#[test]
fn pico1_clock_matches_hand_calculation() {
    let clock = pico1_clock();
    assert_eq!(clock.wrap(), 39_062); // 125_000_000 / (50 × 64) = 39_062.5
    assert_eq!(clock.period_us(), 20_000);
    assert_eq!(
        clock.duty_cycle(1_470),
        DutyCycle {
            wrap: 39_062,
            threshold: 2_871,
        }
    );
}

#[test]
fn with_defaults_uses_64_and_50hz() {
    assert_eq!(PwmClock::with_defaults(PICO1_CLK_HZ), Ok(pico1_clock()));
}

#[test]
fn sweep_bounds_map_to_expected_thresholds() {
    let clock = pico1_clock();
    assert_eq!(clock.duty_cycle(500).threshold, 976);
    assert_eq!(clock.duty_cycle(2_400).threshold, 4_687);
}

#[test]
fn threshold_never_exceeds_wrap_across_servo_range() {
    let clock = pico1_clock();
    for pulse_width_us in 500..=2_400 {
        let duty_cycle = clock.duty_cycle(pulse_width_us);
        assert!(
            duty_cycle.threshold <= duty_cycle.wrap,
            "{pulse_width_us}µs gave {duty_cycle:?}"
        );
        assert!(!duty_cycle.is_saturated());
    }
}

#[test]
fn threshold_grows_with_pulse_width() {
    let clock = pico1_clock();
    let thresholds: Vec<u32> = (500..=2_400)
        .step_by(5)
        .map(|pulse_width_us| clock.duty_cycle(pulse_width_us).threshold)
        .collect();
    assert!(thresholds.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn full_period_pulse_equals_wrap() {
    let clock = pico1_clock();
    let duty_cycle = clock.duty_cycle(clock.period_us());
    assert_eq!(duty_cycle.threshold, duty_cycle.wrap);
    assert!(!duty_cycle.is_saturated());
}

#[test]
fn pulse_longer_than_period_saturates() {
    let clock = pico1_clock();
    let duty_cycle = clock.duty_cycle(25_000);
    assert_eq!(duty_cycle.threshold, 48_827);
    assert!(duty_cycle.is_saturated());
    assert_eq!(
        duty_cycle.registers(),
        ChannelRegisters {
            top: 39_062,
            compare: 48_827,
        }
    );
}

#[test]
fn registers_keep_low_16_bits_of_threshold() {
    let clock = pico1_clock();
    // 58_368 is the low 16 bits of 2400²; the threshold no longer fits a register.
    let duty_cycle = clock.duty_cycle(58_368);
    assert_eq!(duty_cycle.threshold, 113_998);
    assert_eq!(duty_cycle.registers().compare, 48_462); // 113_998 - 65_536
    assert_eq!(duty_cycle.registers().top, 39_062);
}

#[test]
fn narrow_to_register_keeps_low_bits() {
    assert_eq!(narrow_to_register(0), 0);
    assert_eq!(narrow_to_register(65_535), 65_535);
    assert_eq!(narrow_to_register(65_536), 0);
    assert_eq!(narrow_to_register(250_000), 53_392); // 500²
    assert_eq!(narrow_to_register(5_760_000), 58_368); // 2400²
}

#[test]
fn free_function_matches_validated_clock() {
    let clock = pico1_clock();
    for pulse_width_us in [0, 500, 1_470, 2_400, 20_000] {
        assert_eq!(
            duty_cycle(pulse_width_us, PICO1_CLK_HZ, 50, 64),
            clock.duty_cycle(pulse_width_us)
        );
    }
}

#[test]
fn free_function_with_zero_divisor_yields_zero() {
    assert_eq!(
        duty_cycle(1_470, PICO1_CLK_HZ, 0, 64),
        DutyCycle {
            wrap: 0,
            threshold: 0,
        }
    );
    assert_eq!(duty_cycle(1_470, PICO1_CLK_HZ, 50, 0).wrap, 0);
}

#[test]
fn zero_inputs_are_rejected() {
    assert!(matches!(
        PwmClock::new(0, 64, 50),
        Err(Error::InvalidClock { .. })
    ));
    assert!(matches!(
        PwmClock::new(PICO1_CLK_HZ, 0, 50),
        Err(Error::InvalidClock { .. })
    ));
    assert!(matches!(
        PwmClock::new(PICO1_CLK_HZ, 64, 0),
        Err(Error::InvalidClock { .. })
    ));
}

#[test]
fn prescaler_must_fit_divider() {
    assert_eq!(
        PwmClock::new(PICO1_CLK_HZ, 256, 50),
        Err(Error::InvalidClock {
            clock_hz: PICO1_CLK_HZ,
            prescaler: 256,
            carrier_hz: 50,
        })
    );
    assert!(PwmClock::new(PICO1_CLK_HZ, 255, 50).is_ok());
}

#[test]
fn wrap_must_fit_top_register() {
    assert_eq!(
        PwmClock::new(PICO1_CLK_HZ, 1, 50),
        Err(Error::WrapOutOfRange { wrap: 2_500_000 })
    );
    assert_eq!(
        PwmClock::new(1_000, 64, 50),
        Err(Error::WrapOutOfRange { wrap: 0 })
    );
}

#[test]
fn pico2_clock_fits() {
    let clock = PwmClock::with_defaults(150_000_000).expect("150 MHz is valid");
    assert_eq!(clock.wrap(), 46_875);
    assert_eq!(clock.duty_cycle(1_500).threshold, 3_515); // 46_875 × 1_500 / 20_000 = 3_515.6
}
