use thiserror::Error;

// ---------------------------------------------------------------------------
// Quasi-1D nozzle: Mach number from the area ratio
// ---------------------------------------------------------------------------

pub const DEFAULT_K: f64 = 1.25; // combustion products ratio of specific heats
pub const DEFAULT_THROAT_DIAMETER: f64 = 0.148; // m

const TOLERANCE: f64 = 1e-10;
const MAX_ITER: usize = 1000;
const RESIDUAL_LIMIT: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NozzleError {
    #[error("section diameter must be positive, got {0}")]
    NonPositiveDiameter(f64),

    #[error("no Mach number satisfies the area ratio for diameter {0} m")]
    NoRoot(f64),
}

/// Mach solutions for one section diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct NozzleSolution {
    pub diameter: f64,
    pub area_ratio: f64, // (d*/d)^2
    pub subsonic: Option<f64>,
    pub supersonic: Option<f64>,
}

impl NozzleSolution {
    pub fn roots(&self) -> impl Iterator<Item = f64> + '_ {
        self.subsonic.iter().chain(self.supersonic.iter()).copied()
    }
}

/// Residual of the area–Mach relation for section diameter `d`.
pub fn area_mach_residual(mach: f64, d: f64, d_star: f64, k: f64) -> f64 {
    let e = (k + 1.0) / (2.0 * (k - 1.0));
    let lhs = mach * ((k + 1.0) / 2.0).powf(e) * (1.0 + (k - 1.0) / 2.0 * mach * mach).powf(-e);
    lhs - (d_star / d).powi(2)
}

fn bisect(f: impl Fn(f64) -> f64, mut a: f64, mut b: f64) -> Option<f64> {
    let mut fa = f(a);
    if fa * f(b) > 0.0 {
        return None;
    }
    for _ in 0..MAX_ITER {
        let c = 0.5 * (a + b);
        let fc = f(c);
        if fc.abs() < TOLERANCE || 0.5 * (b - a) < TOLERANCE {
            return Some(c);
        }
        if fa * fc <= 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }
    Some(0.5 * (a + b))
}

/// Subsonic root in [0.01, 0.99] and supersonic root in [1.01, 10].
pub fn solve_mach(d: f64, d_star: f64, k: f64) -> Result<NozzleSolution, NozzleError> {
    if d.is_nan() || d <= 0.0 {
        return Err(NozzleError::NonPositiveDiameter(d));
    }
    let f = |m: f64| area_mach_residual(m, d, d_star, k);
    let accept = |root: Option<f64>| root.filter(|&m| f(m).abs() < RESIDUAL_LIMIT);

    let subsonic = accept(bisect(f, 0.01, 0.99));
    let supersonic = accept(bisect(f, 1.01, 10.0))
        .filter(|&m| subsonic.map_or(true, |s| (s - m).abs() >= 1e-3));

    if subsonic.is_none() && supersonic.is_none() {
        return Err(NozzleError::NoRoot(d));
    }

    Ok(NozzleSolution {
        diameter: d,
        area_ratio: (d_star / d).powi(2),
        subsonic,
        supersonic,
    })
}
