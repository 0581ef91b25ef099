use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dynamics::state::AlphaLaw;
use crate::sim::{IntegrationMethod, Termination, Trajectory};

/// End-of-burn figures computed from a run.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub method: IntegrationMethod,
    pub alpha_law: AlphaLaw,
    pub dt: f64,
    pub termination: Termination,
    pub steps: usize,
    pub samples: usize,
    pub final_time: f64,
    pub final_velocity: f64,
    pub final_altitude: f64,
    pub final_downrange: f64,
    pub final_mass: f64,
    pub final_flight_path_angle: f64,
    pub final_dvelocity: f64,
    pub final_horizontal_velocity: f64,
    pub final_vertical_velocity: f64,
    pub max_mach: f64,
    pub max_dynamic_pressure: f64,
    pub max_dynamic_pressure_time: f64,
}

impl FlightSummary {
    /// `None` only for a trajectory without samples.
    pub fn from_trajectory(run: &Trajectory) -> Option<Self> {
        let last = run.samples.last()?;

        let max_mach = run.samples.iter().map(|s| s.mach).fold(0.0_f64, f64::max);
        let max_q = run
            .samples
            .iter()
            .max_by(|a, b| a.dynamic_pressure.total_cmp(&b.dynamic_pressure))?;

        Some(FlightSummary {
            method: run.config.method,
            alpha_law: run.config.alpha_law,
            dt: run.config.dt,
            termination: run.termination,
            steps: run.steps,
            samples: run.samples.len(),
            final_time: last.time,
            final_velocity: last.state.velocity,
            final_altitude: last.state.altitude,
            final_downrange: last.state.downrange,
            final_mass: last.state.mass,
            final_flight_path_angle: last.state.flight_path_angle,
            final_dvelocity: last.dvelocity,
            final_horizontal_velocity: last.horizontal_velocity,
            final_vertical_velocity: last.vertical_velocity,
            max_mach,
            max_dynamic_pressure: max_q.dynamic_pressure,
            max_dynamic_pressure_time: max_q.time,
        })
    }
}

pub fn write_summary<W: Write>(writer: W, summary: &FlightSummary) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summary)
}

pub fn write_summary_file<P: AsRef<Path>>(path: P, summary: &FlightSummary) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{simulate, IntegrationConfig};
    use crate::vehicle::presets;
    use approx::assert_abs_diff_eq;

    #[test]
    fn summary_reflects_final_sample() {
        let (v, ic) = presets::reference_booster();
        let config = IntegrationConfig::new(IntegrationMethod::Rk4, AlphaLaw::ThetaMinusThetaC, 0.1, 5.0);
        let run = simulate(&v, &ic, &config).unwrap();
        let s = FlightSummary::from_trajectory(&run).unwrap();

        assert_abs_diff_eq!(s.final_time, 5.0);
        assert_abs_diff_eq!(s.final_mass, 1_155.0, epsilon = 1e-6);
        assert!(s.max_mach > 0.0);
        assert!(s.max_dynamic_pressure_time <= s.final_time);
        assert_eq!(s.termination, Termination::DurationElapsed);
    }

    #[test]
    fn json_output_is_valid() {
        let (v, ic) = presets::reference_booster();
        let config = IntegrationConfig::new(IntegrationMethod::Euler, AlphaLaw::Zero, 0.1, 1.0);
        let run = simulate(&v, &ic, &config).unwrap();
        let summary = FlightSummary::from_trajectory(&run).unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["method"], "euler");
        assert_eq!(value["alpha_law"], "zero");
        assert_eq!(value["termination"], "duration-elapsed");
        assert!(value["final_altitude"].as_f64().unwrap() > 0.0);
    }
}
