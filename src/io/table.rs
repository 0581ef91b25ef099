use std::io::Write;
use std::path::Path;

use crate::sim::TrajectorySample;

const HEADER: [&str; 18] = [
    "N",
    "t(s)",
    "m(kg)",
    "P(N)",
    "V(m/s)",
    "M",
    "Cxa",
    "alpha(deg)",
    "theta_c(deg)",
    "Cya_alpha",
    "omega_z(1/s)",
    "theta(deg)",
    "y(m)",
    "x(m)",
    "g(m/s2)",
    "x_dot(m/s)",
    "y_dot(m/s)",
    "V_dot(m/s2)",
];

fn row(n: usize, s: &TrajectorySample) -> [String; 18] {
    let st = &s.state;
    [
        n.to_string(),
        format!("{:.3}", s.time),
        format!("{:.2}", st.mass),
        format!("{:.1}", s.thrust),
        format!("{:.3}", st.velocity),
        format!("{:.4}", s.mach),
        format!("{:.4}", s.cxa),
        format!("{:.2}", s.alpha),
        format!("{:.2}", st.flight_path_angle),
        format!("{:.4}", s.cya_alpha),
        format!("{:.4}", st.pitch_rate),
        format!("{:.2}", st.pitch_angle),
        format!("{:.2}", st.altitude),
        format!("{:.2}", st.downrange),
        format!("{:.4}", s.gravity),
        format!("{:.3}", s.horizontal_velocity),
        format!("{:.3}", s.vertical_velocity),
        format!("{:.3}", s.dvelocity),
    ]
}

/// Write samples as a tab-separated table with a 1-based row index.
pub fn write_trajectory<W: Write>(writer: W, samples: &[TrajectorySample]) -> csv::Result<()> {
    let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    out.write_record(HEADER)?;
    for (i, s) in samples.iter().enumerate() {
        out.write_record(row(i + 1, s))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_trajectory_file<P: AsRef<Path>>(path: P, samples: &[TrajectorySample]) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::AlphaLaw;
    use crate::sim::{simulate, IntegrationConfig, IntegrationMethod};
    use crate::vehicle::presets;

    #[test]
    fn table_has_header_and_rows() {
        let (v, ic) = presets::reference_booster();
        let config = IntegrationConfig::new(IntegrationMethod::Rk4, AlphaLaw::Zero, 0.1, 0.2);
        let run = simulate(&v, &ic, &config).unwrap();

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &run.samples).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("N\tt(s)\tm(kg)"));
        assert_eq!(lines.len(), 1 + run.samples.len());
        let first: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(first.len(), HEADER.len());
        assert_eq!(first[0], "1");
        assert_eq!(first[1], "0.000");
        assert_eq!(first[2], "1255.00");
        assert_eq!(first[3], "56000.0");
        assert_eq!(first[7], "0.00");
    }
}
