use once_cell::sync::Lazy;

// ---------------------------------------------------------------------------
// Aerodynamic coefficients vs Mach number
// ---------------------------------------------------------------------------

pub const MACH_MIN: f64 = 0.01;
pub const MACH_MAX: f64 = 10.2;

const MACH: [f64; 15] = [
    0.01, 0.55, 0.8, 0.9, 1.0, 1.06, 1.1, 1.2, 1.3, 1.4, 2.0, 2.6, 3.4, 6.0, 10.2,
];
const CXA: [f64; 15] = [
    0.30, 0.30, 0.55, 0.70, 0.84, 0.86, 0.87, 0.83, 0.80, 0.79, 0.65, 0.55, 0.50, 0.45, 0.41,
];
const CYA_ALPHA: [f64; 15] = [
    0.25, 0.25, 0.25, 0.20, 0.30, 0.31, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25,
];

/// Drag coefficient and lift-curve slope at one Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroCoefficients {
    pub cxa: f64,       // drag coefficient
    pub cya_alpha: f64, // lift-curve slope, 1/rad
}

/// Piecewise-linear coefficient table over ascending Mach samples.
///
/// Queries outside the sampled range return the nearest end sample.
#[derive(Debug, Clone)]
pub struct AeroTable {
    mach: Vec<f64>,
    cxa: Vec<f64>,
    cya_alpha: Vec<f64>,
}

impl AeroTable {
    /// Returns `None` unless the three columns have equal length (at least
    /// two rows) and Mach is strictly increasing.
    pub fn new(mach: Vec<f64>, cxa: Vec<f64>, cya_alpha: Vec<f64>) -> Option<Self> {
        let consistent = mach.len() >= 2 && mach.len() == cxa.len() && mach.len() == cya_alpha.len();
        let ascending = mach.windows(2).all(|w| w[0] < w[1]);
        (consistent && ascending).then_some(Self { mach, cxa, cya_alpha })
    }

    /// Characteristic transonic drag-rise table of the reference booster.
    pub fn booster() -> Self {
        Self {
            mach: MACH.to_vec(),
            cxa: CXA.to_vec(),
            cya_alpha: CYA_ALPHA.to_vec(),
        }
    }

    pub fn mach_range(&self) -> (f64, f64) {
        (self.mach[0], self.mach[self.mach.len() - 1])
    }

    pub fn lookup(&self, mach: f64) -> AeroCoefficients {
        AeroCoefficients {
            cxa: interpolate(mach, &self.mach, &self.cxa),
            cya_alpha: interpolate(mach, &self.mach, &self.cya_alpha),
        }
    }
}

/// Linear interpolation with end clamping.
fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    // First sample strictly above x; x > xs[0] so idx >= 1.
    let idx = xs.partition_point(|&v| v <= x);
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

static BOOSTER: Lazy<AeroTable> = Lazy::new(AeroTable::booster);

/// Shared instance of the booster table.
pub fn booster_table() -> &'static AeroTable {
    &BOOSTER
}

// ---------------------------------------------------------------------------
// Forces
// ---------------------------------------------------------------------------

pub fn dynamic_pressure(density: f64, speed: f64) -> f64 {
    0.5 * density * speed * speed
}

/// Axial drag force, N.
pub fn drag_force(q_dyn: f64, area: f64, cxa: f64) -> f64 {
    q_dyn * area * cxa
}

/// Normal lift force for angle of attack `alpha` in radians, N.
pub fn lift_force(q_dyn: f64, area: f64, cya_alpha: f64, alpha: f64) -> f64 {
    q_dyn * area * cya_alpha * alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_samples() {
        let t = AeroTable::booster();
        let c = t.lookup(1.0);
        assert_abs_diff_eq!(c.cxa, 0.84, epsilon = 1e-12);
        assert_abs_diff_eq!(c.cya_alpha, 0.30, epsilon = 1e-12);
    }

    #[test]
    fn midpoint_interpolation() {
        let t = AeroTable::booster();
        let c = t.lookup(0.85);
        assert_abs_diff_eq!(c.cxa, 0.625, epsilon = 1e-12);
        assert_abs_diff_eq!(c.cya_alpha, 0.225, epsilon = 1e-12);
    }

    #[test]
    fn clamps_outside_domain() {
        let t = AeroTable::booster();
        assert_eq!(t.lookup(0.0), t.lookup(MACH_MIN));
        assert_abs_diff_eq!(t.lookup(-3.0).cxa, 0.30);
        assert_abs_diff_eq!(t.lookup(25.0).cxa, 0.41);
        assert_eq!(t.mach_range(), (MACH_MIN, MACH_MAX));
    }

    #[test]
    fn transonic_drag_rise() {
        let t = AeroTable::booster();
        assert!(t.lookup(1.1).cxa > t.lookup(0.5).cxa);
        assert!(t.lookup(1.1).cxa > t.lookup(3.0).cxa);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(AeroTable::new(vec![1.0], vec![0.3], vec![0.2]).is_none());
        assert!(AeroTable::new(vec![1.0, 0.5], vec![0.3, 0.3], vec![0.2, 0.2]).is_none());
        assert!(AeroTable::new(vec![0.5, 1.0], vec![0.3], vec![0.2, 0.2]).is_none());
        assert!(AeroTable::new(vec![0.5, 1.0], vec![0.3, 0.4], vec![0.2, 0.2]).is_some());
    }

    #[test]
    fn lift_vanishes_at_zero_alpha() {
        let q = dynamic_pressure(1.225, 300.0);
        assert_eq!(lift_force(q, 0.231, 0.25, 0.0), 0.0);
        assert_abs_diff_eq!(drag_force(q, 0.231, 0.3), 0.5 * 1.225 * 90_000.0 * 0.231 * 0.3);
    }
}
