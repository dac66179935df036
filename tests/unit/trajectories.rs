//! Unit tests for trajectory sampling through the public API.

use actuator_sweep::config::{PiecewiseTest, TestCase, WaveformKind, WaveformTest};
use actuator_sweep::motion::sample;
use actuator_sweep::{Degrees, Hertz, MotionExecutor, Seconds};

fn waveform(kind: WaveformKind) -> TestCase {
    let mut wave = WaveformTest::new(kind);
    wave.amplitude = Degrees(20.0);
    wave.frequency = Hertz(0.5);
    wave.send_velocity = true;
    wave.into()
}

fn position_at(test: &TestCase, t: f32) -> f32 {
    sample(test, Seconds(t)).position.0
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_triangle_reaches_both_peaks() {
    let test = waveform(WaveformKind::Triangle);

    assert_close(position_at(&test, 0.0), 0.0);
    assert_close(position_at(&test, 0.25), 10.0);
    assert_close(position_at(&test, 0.5), 20.0);
    assert_close(position_at(&test, 1.0), 0.0);
    assert_close(position_at(&test, 1.5), -20.0);
    assert_close(position_at(&test, 2.25), 10.0);
}

#[test]
fn test_triangle_velocity_is_slope() {
    let test = waveform(WaveformKind::Triangle);

    let rising = sample(&test, Seconds(0.1)).velocity.unwrap();
    let falling = sample(&test, Seconds(0.75)).velocity.unwrap();

    assert_close(rising.0, 40.0);
    assert_close(falling.0, -40.0);
}

#[test]
fn test_sine_peak_and_velocity() {
    let test = waveform(WaveformKind::Sine);

    assert_close(position_at(&test, 0.5), 20.0);
    // A * 2 pi f at the zero crossing
    assert_close(sample(&test, Seconds(0.0)).velocity.unwrap().0, 20.0 * core::f32::consts::PI);
}

#[test]
fn test_square_switches_at_half_period() {
    let test = waveform(WaveformKind::Square);

    assert_close(position_at(&test, 0.1), 20.0);
    assert_close(position_at(&test, 1.5), -20.0);
    assert_eq!(sample(&test, Seconds(0.1)).velocity.unwrap().0, 0.0);
}

#[test]
fn test_velocity_omitted_when_not_sent() {
    let mut wave = WaveformTest::new(WaveformKind::Sine);
    wave.send_velocity = false;
    let test: TestCase = wave.into();

    assert!(sample(&test, Seconds(0.3)).velocity.is_none());
}

#[test]
fn test_piecewise_interpolates_and_holds() {
    let mut piecewise = PiecewiseTest::new();
    piecewise.positions = [0.0, 10.0, 20.0].into_iter().map(Degrees).collect();
    piecewise.duration = Seconds(4.0);
    let test: TestCase = piecewise.into();

    assert_close(position_at(&test, 1.0), 5.0);
    assert_close(position_at(&test, 3.0), 15.0);
    assert_close(position_at(&test, 5.0), 20.0);
}

#[test]
fn test_executor_covers_whole_test() {
    let test = waveform(WaveformKind::Sine);
    let times: Vec<f32> = MotionExecutor::new(Seconds(0.05), Seconds(0.01))
        .map(|t| sample(&test, t).position.0)
        .collect();

    assert_eq!(times.len(), 5);
    assert_eq!(times[0], 0.0);
}
