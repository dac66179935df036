//! Per-motor response plots (std only).
//!
//! One PNG per motor: commanded against measured position on top and, when
//! the test sent velocities, commanded against measured velocity below.
//! Charts carry no text so no system font is needed.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::MotorId;
use crate::error::Result;

use super::recording::{io_error, MotorRecording, TestRecording};

const PLOT_SIZE: (u32, u32) = (1000, 600);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Write one response plot per motor into `dir`.
///
/// Files are named `motor_<id>_<label>_<test_name>_response.png`. A
/// recording that fails [`TestRecording::validate`] is not plotted and
/// yields no files.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the directory cannot be created or a
/// plot cannot be drawn or written.
pub fn create_motor_plots<P: AsRef<Path>>(
    recording: &TestRecording,
    test_name: &str,
    dir: P,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    let problems = recording.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::warn!(test = test_name, "{}", problem);
        }
        tracing::warn!(test = test_name, "recording inconsistent, skipping plots");
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir).map_err(|e| io_error(dir, &e))?;

    let mut written = Vec::with_capacity(recording.motors.len());
    for (&motor_id, motor) in &recording.motors {
        let path = dir.join(plot_file_name(motor_id, motor, test_name));
        draw_motor(&path, recording, motor).map_err(|e| io_error(&path, &e))?;
        tracing::debug!(motor_id, path = %path.display(), "saved plot");
        written.push(path);
    }

    tracing::info!(test = test_name, plots = written.len(), dir = %dir.display(), "saved plots");
    Ok(written)
}

fn plot_file_name(motor_id: MotorId, motor: &MotorRecording, test_name: &str) -> String {
    match motor.label {
        Some(ref label) => format!("motor_{}_{}_{}_response.png", motor_id, label, test_name),
        None => format!("motor_{}_motor_{}_{}_response.png", motor_id, motor_id, test_name),
    }
}

fn draw_motor(
    path: &Path,
    recording: &TestRecording,
    motor: &MotorRecording,
) -> core::result::Result<(), DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>>
{
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let times = &recording.time_points;
    let velocities = motor
        .commanded_velocities
        .as_deref()
        .filter(|_| recording.send_velocity);
    let rows = if velocities.is_some() { 2 } else { 1 };
    let panels = root.split_evenly((rows, 1));

    draw_panel(
        &panels[0],
        times,
        &motor.commanded_positions,
        &motor.actual_positions,
        (&BLUE, &RED),
    )?;
    if let Some(commanded) = velocities {
        draw_panel(
            &panels[1],
            times,
            commanded,
            &motor.actual_velocities,
            (&GREEN, &ORANGE),
        )?;
    }

    root.present()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    times: &[f32],
    commanded: &[f32],
    actual: &[f32],
    (commanded_color, actual_color): (&RGBColor, &RGBColor),
) -> core::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(span(times.iter()), span(commanded.iter().chain(actual)))?;

    chart.draw_series(LineSeries::new(
        times.iter().copied().zip(commanded.iter().copied()),
        commanded_color,
    ))?;
    chart.draw_series(LineSeries::new(
        times.iter().copied().zip(actual.iter().copied()),
        actual_color,
    ))?;
    Ok(())
}

/// Axis range covering every finite value, padded by 5 %.
fn span<'a>(values: impl Iterator<Item = &'a f32>) -> Range<f32> {
    let (lo, hi) = values
        .copied()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi - lo > f32::EPSILON {
        (hi - lo) * 0.05
    } else {
        1.0
    };
    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(send_velocity: bool) -> TestRecording {
        let mut rec = TestRecording::new(send_velocity);
        for i in 0..20 {
            let t = i as f32 * 0.01;
            rec.add_time_point(t);
            for motor_id in [31, 45] {
                let velocity = send_velocity.then_some(100.0);
                rec.log_command(motor_id, t * 100.0, velocity);
                rec.log_state(motor_id, t * 90.0, 90.0);
            }
        }
        rec.motors.get_mut(&31).unwrap().label = Some("strong_0".to_owned());
        rec
    }

    #[test]
    fn test_one_plot_per_motor() {
        let dir = tempfile::tempdir().unwrap();

        let written = create_motor_plots(&recording(true), "sine_0_vel_true", dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir
            .path()
            .join("motor_31_strong_0_sine_0_vel_true_response.png")
            .is_file());
        assert!(dir
            .path()
            .join("motor_45_motor_45_sine_0_vel_true_response.png")
            .is_file());
    }

    #[test]
    fn test_position_only_plot() {
        let dir = tempfile::tempdir().unwrap();

        let written = create_motor_plots(&recording(false), "square_1_vel_false", dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_inconsistent_recording_not_plotted() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recording(false);
        rec.add_time_point(0.2);

        let written = create_motor_plots(&rec, "triangle_0_vel_false", dir.path()).unwrap();

        assert!(written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_span_pads_flat_series() {
        assert_eq!(span([2.0, 2.0].iter()), 1.0..3.0);
        assert_eq!(span([].iter()), 0.0..1.0);
    }
}
