// ---------------------------------------------------------------------------
// Gravity and geopotential height
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2
pub const EARTH_RADIUS: f64 = 6_356_767.0; // conditional Earth radius, m

/// Gravitational acceleration at a geometric altitude (inverse-square law).
pub fn gravity_at(altitude: f64) -> f64 {
    G0 * (EARTH_RADIUS / (EARTH_RADIUS + altitude)).powi(2)
}

/// Geopotential height for a geometric altitude: H = R·h / (R + h).
pub fn geopotential_height(altitude: f64) -> f64 {
    EARTH_RADIUS * altitude / (EARTH_RADIUS + altitude)
}
