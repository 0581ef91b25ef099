use once_cell::sync::Lazy;

use crate::error::SimError;
use crate::physics::gravity::{geopotential_height, gravity_at, G0};

// ---------------------------------------------------------------------------
// Layered standard atmosphere (-2 km to 94 km)
// ---------------------------------------------------------------------------

pub const R_AIR: f64 = 287.052_87; // specific gas constant for dry air, J/(kg·K)
pub const GAMMA: f64 = 1.4; // ratio of specific heats

pub const T0: f64 = 288.15; // sea-level temperature, K
pub const P0: f64 = 101_325.0; // sea-level pressure, Pa

pub const MIN_ALTITUDE: f64 = -2_000.0; // m, geometric
pub const MAX_ALTITUDE: f64 = 94_000.0; // m, geometric

/// Layer name, geometric lower bound (m), lapse rate (K per m of geopotential height).
const LAYER_PROFILE: [(&str, f64, f64); 8] = [
    ("troposphere", MIN_ALTITUDE, -0.0065),
    ("stratosphere I", 11_000.0, 0.0),
    ("stratosphere II", 20_000.0, 0.001),
    ("stratosphere III", 32_000.0, 0.0028),
    ("mesosphere I", 47_000.0, 0.0),
    ("mesosphere II", 51_000.0, -0.0028),
    ("mesosphere III", 71_000.0, -0.002),
    ("thermosphere", 85_000.0, 0.0),
];

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericState {
    pub pressure: f64,     // Pa
    pub temperature: f64,  // K
    pub density: f64,      // kg/m^3
    pub sound_speed: f64,  // m/s
    pub gravity: f64,      // m/s^2
    pub geopotential: f64, // m
}

/// One contiguous layer of the model.
///
/// Base temperature and pressure are never tabulated: they come from the
/// layer below evaluated at the shared boundary, so the profile is
/// continuous by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLayer {
    pub name: &'static str,
    pub base_altitude: f64,    // geometric, m
    pub top_altitude: f64,     // geometric, m (inclusive)
    pub base_geopotential: f64, // m
    pub base_temperature: f64, // K
    pub base_pressure: f64,    // Pa
    pub lapse_rate: f64,       // K/m, zero for isothermal layers
}

impl AtmosphereLayer {
    pub fn is_isothermal(&self) -> bool {
        self.lapse_rate == 0.0
    }

    /// Temperature at geopotential height `h_geo`.
    pub fn temperature(&self, h_geo: f64) -> f64 {
        temperature_from(self.base_temperature, self.lapse_rate, h_geo - self.base_geopotential)
    }

    /// Pressure at geopotential height `h_geo`.
    pub fn pressure(&self, h_geo: f64) -> f64 {
        pressure_from(
            self.base_temperature,
            self.base_pressure,
            self.lapse_rate,
            h_geo - self.base_geopotential,
        )
    }

    pub fn contains(&self, altitude: f64) -> bool {
        altitude >= self.base_altitude && altitude <= self.top_altitude
    }
}

fn temperature_from(t_base: f64, lapse: f64, dh: f64) -> f64 {
    if lapse == 0.0 {
        t_base
    } else {
        t_base + lapse * dh
    }
}

/// Barometric law: exponential in isothermal layers, power law otherwise.
fn pressure_from(t_base: f64, p_base: f64, lapse: f64, dh: f64) -> f64 {
    if lapse == 0.0 {
        p_base * (-G0 * dh / (R_AIR * t_base)).exp()
    } else {
        let t = t_base + lapse * dh;
        p_base * (t / t_base).powf(-G0 / (lapse * R_AIR))
    }
}

/// The eight-layer model. Immutable once built; share it freely.
#[derive(Debug, Clone)]
pub struct StandardAtmosphere {
    layers: [AtmosphereLayer; 8],
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardAtmosphere {
    /// Build the layer table from the sea-level reference (T0, P0).
    pub fn new() -> Self {
        // Seed: the troposphere gradient anchored at sea level.
        let (_, _, lapse0) = LAYER_PROFILE[0];
        let mut base_geo = geopotential_height(MIN_ALTITUDE);
        let mut base_t = temperature_from(T0, lapse0, base_geo);
        let mut base_p = pressure_from(T0, P0, lapse0, base_geo);

        let layers = std::array::from_fn(|i| {
            let (name, base_altitude, lapse_rate) = LAYER_PROFILE[i];
            let top_altitude = LAYER_PROFILE
                .get(i + 1)
                .map_or(MAX_ALTITUDE, |&(_, next_base, _)| next_base);

            if i > 0 {
                let (_, _, prev_lapse) = LAYER_PROFILE[i - 1];
                let geo = geopotential_height(base_altitude);
                let dh = geo - base_geo;
                let t = temperature_from(base_t, prev_lapse, dh);
                let p = pressure_from(base_t, base_p, prev_lapse, dh);
                base_geo = geo;
                base_t = t;
                base_p = p;
            }

            AtmosphereLayer {
                name,
                base_altitude,
                top_altitude,
                base_geopotential: base_geo,
                base_temperature: base_t,
                base_pressure: base_p,
                lapse_rate,
            }
        });

        Self { layers }
    }

    pub fn layers(&self) -> &[AtmosphereLayer] {
        &self.layers
    }

    /// Enclosing layer for a geometric altitude (upper bounds inclusive).
    pub fn layer_for(&self, altitude: f64) -> Option<&AtmosphereLayer> {
        if !(MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude) {
            return None;
        }
        self.layers.iter().find(|layer| altitude <= layer.top_altitude)
    }

    /// Full thermodynamic state at a geometric altitude.
    pub fn compute_state(&self, altitude: f64) -> Result<AtmosphericState, SimError> {
        let layer = self.layer_for(altitude).ok_or(SimError::OutOfDomainAltitude {
            altitude,
            min: MIN_ALTITUDE,
            max: MAX_ALTITUDE,
        })?;
        Ok(state_in_layer(layer, altitude))
    }
}

fn state_in_layer(layer: &AtmosphereLayer, altitude: f64) -> AtmosphericState {
    let geopotential = geopotential_height(altitude);
    let temperature = layer.temperature(geopotential);
    let pressure = layer.pressure(geopotential);

    AtmosphericState {
        pressure,
        temperature,
        density: pressure / (R_AIR * temperature),
        sound_speed: (GAMMA * R_AIR * temperature).sqrt(),
        gravity: gravity_at(altitude),
        geopotential,
    }
}

static STANDARD: Lazy<StandardAtmosphere> = Lazy::new(StandardAtmosphere::new);

/// Shared, process-wide instance of the model.
pub fn standard() -> &'static StandardAtmosphere {
    &STANDARD
}

/// Atmospheric state at a geometric altitude, or `OutOfDomainAltitude`
/// outside [-2000, 94000] m.
pub fn compute_atmosphere(altitude: f64) -> Result<AtmosphericState, SimError> {
    STANDARD.compute_state(altitude)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn sea_level_standard_values() {
        let a = compute_atmosphere(0.0).unwrap();
        assert_abs_diff_eq!(a.temperature, 288.15, epsilon = 1e-9);
        assert_relative_eq!(a.pressure, 101_325.0, max_relative = 1e-9);
        assert_abs_diff_eq!(a.density, 1.225, epsilon = 1e-4);
        assert_abs_diff_eq!(a.sound_speed, 340.294, epsilon = 0.01);
        assert_abs_diff_eq!(a.gravity, 9.80665, epsilon = 1e-12);
        assert_abs_diff_eq!(a.geopotential, 0.0);
    }

    #[test]
    fn tropopause_11km() {
        let a = compute_atmosphere(11_000.0).unwrap();
        // Geometric 11 km sits slightly below the 11 km geopotential level.
        assert_abs_diff_eq!(a.temperature, 216.65, epsilon = 0.2);
        assert_relative_eq!(a.pressure, 22_700.0, max_relative = 1e-3);
    }

    #[test]
    fn stratosphere_isothermal() {
        let a = compute_atmosphere(12_000.0).unwrap();
        let b = compute_atmosphere(19_000.0).unwrap();
        assert_eq!(a.temperature, b.temperature);
        assert!(b.pressure < a.pressure);
    }

    #[test]
    fn rejects_out_of_domain() {
        for h in [-2_500.0, 95_000.0, f64::NAN] {
            assert!(matches!(
                compute_atmosphere(h),
                Err(SimError::OutOfDomainAltitude { .. })
            ));
        }
    }

    #[test]
    fn accepts_domain_edges() {
        let low = compute_atmosphere(MIN_ALTITUDE).unwrap();
        let high = compute_atmosphere(MAX_ALTITUDE).unwrap();
        assert!(low.temperature > T0);
        assert!(low.pressure > P0);
        assert!(high.pressure > 0.0 && high.pressure < 1.0);
    }

    #[test]
    fn layers_are_contiguous() {
        let atm = StandardAtmosphere::new();
        let layers = atm.layers();
        assert_eq!(layers.first().unwrap().base_altitude, MIN_ALTITUDE);
        assert_eq!(layers.last().unwrap().top_altitude, MAX_ALTITUDE);
        for pair in layers.windows(2) {
            assert_eq!(pair[0].top_altitude, pair[1].base_altitude);
            assert!(pair[0].base_altitude < pair[1].base_altitude);
        }
    }

    #[test]
    fn continuity_at_boundaries() {
        let atm = StandardAtmosphere::new();
        for pair in atm.layers().windows(2) {
            let (below, above) = (&pair[0], &pair[1]);
            let geo = geopotential_height(above.base_altitude);
            let t_below = below.temperature(geo);
            let t_above = above.temperature(geo);
            let p_below = below.pressure(geo);
            let p_above = above.pressure(geo);
            assert!(
                (t_below - t_above).abs() < 1e-6,
                "temperature jump at {} m: {} vs {}",
                above.base_altitude,
                t_below,
                t_above
            );
            assert!(
                ((p_below - p_above) / p_above).abs() < 1e-6,
                "pressure jump at {} m: {} vs {}",
                above.base_altitude,
                p_below,
                p_above
            );
        }
    }

    #[test]
    fn continuity_through_public_queries() {
        for &(_, boundary, _) in &LAYER_PROFILE[1..] {
            let lo = compute_atmosphere(boundary - 1e-6).unwrap();
            let hi = compute_atmosphere(boundary + 1e-6).unwrap();
            assert!((lo.temperature - hi.temperature).abs() < 1e-6);
            assert!(((lo.pressure - hi.pressure) / hi.pressure).abs() < 1e-6);
        }
    }

    #[test]
    fn boundary_belongs_to_lower_layer() {
        let atm = StandardAtmosphere::new();
        assert_eq!(atm.layer_for(11_000.0).unwrap().name, "troposphere");
        assert_eq!(atm.layer_for(11_000.1).unwrap().name, "stratosphere I");
        assert_eq!(atm.layer_for(94_000.0).unwrap().name, "thermosphere");
        assert!(atm.layer_for(94_000.1).is_none());
    }

    #[test]
    fn density_monotonically_decreases() {
        let mut prev = compute_atmosphere(MIN_ALTITUDE).unwrap().density;
        let mut h = MIN_ALTITUDE + 500.0;
        while h <= MAX_ALTITUDE {
            let rho = compute_atmosphere(h).unwrap().density;
            assert!(rho < prev, "density not decreasing at {} m", h);
            prev = rho;
            h += 500.0;
        }
    }

    #[test]
    fn isothermal_limit_matches_power_law() {
        let dh = 1_500.0;
        let iso = pressure_from(250.0, 1_000.0, 0.0, dh);
        let near = pressure_from(250.0, 1_000.0, 1e-9, dh);
        assert_relative_eq!(iso, near, max_relative = 1e-6);
    }
}
