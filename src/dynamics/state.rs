use std::fmt;

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Planar point-mass state: V, θc, x, y, ωz, θ, m
// ---------------------------------------------------------------------------

/// Packed form used by the integrators.
pub type StateVector = SVector<f64, 7>;

/// Vehicle state at a single point in time. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleState {
    pub velocity: f64,          // m/s
    pub flight_path_angle: f64, // deg, θc
    pub downrange: f64,         // m, x
    pub altitude: f64,          // m, y
    pub pitch_rate: f64,        // 1/s, ωz
    pub pitch_angle: f64,       // deg, θ
    pub mass: f64,              // kg
}

impl VehicleState {
    pub fn to_vector(&self) -> StateVector {
        StateVector::from([
            self.velocity,
            self.flight_path_angle,
            self.downrange,
            self.altitude,
            self.pitch_rate,
            self.pitch_angle,
            self.mass,
        ])
    }

    pub fn from_vector(v: &StateVector) -> Self {
        Self {
            velocity: v[0],
            flight_path_angle: v[1],
            downrange: v[2],
            altitude: v[3],
            pitch_rate: v[4],
            pitch_angle: v[5],
            mass: v[6],
        }
    }

    /// Advance by a derivative scaled by dt, without any clamping.
    pub fn apply(&self, d: &StateDerivative, dt: f64) -> VehicleState {
        Self::from_vector(&(self.to_vector() + d.to_vector() * dt))
    }

    /// Stage predictor: altitude floored at zero.
    pub fn with_ground_floor(mut self) -> Self {
        self.altitude = self.altitude.max(0.0);
        self
    }

    /// End-of-step projection: altitude and speed floored at zero.
    pub fn clamped(mut self) -> Self {
        self.altitude = self.altitude.max(0.0);
        self.velocity = self.velocity.max(0.0);
        self
    }

    pub fn horizontal_velocity(&self) -> f64 {
        self.velocity * self.flight_path_angle.to_radians().cos()
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.velocity * self.flight_path_angle.to_radians().sin()
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

/// Time derivative of [`VehicleState`]. Angular rates are in deg/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StateDerivative {
    pub dvelocity: f64,
    pub dflight_path_angle: f64,
    pub ddownrange: f64,
    pub daltitude: f64,
    pub dpitch_rate: f64,
    pub dpitch_angle: f64,
    pub dmass: f64,
}

impl StateDerivative {
    pub fn to_vector(&self) -> StateVector {
        StateVector::from([
            self.dvelocity,
            self.dflight_path_angle,
            self.ddownrange,
            self.daltitude,
            self.dpitch_rate,
            self.dpitch_angle,
            self.dmass,
        ])
    }
}

// ---------------------------------------------------------------------------
// Angle-of-attack control law
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlphaLaw {
    /// α = θ − θc
    ThetaMinusThetaC,
    /// α = 0
    Zero,
}

impl AlphaLaw {
    /// Angle of attack in degrees.
    pub fn angle_of_attack(self, state: &VehicleState) -> f64 {
        match self {
            AlphaLaw::ThetaMinusThetaC => state.pitch_angle - state.flight_path_angle,
            AlphaLaw::Zero => 0.0,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AlphaLaw::ThetaMinusThetaC => "theta",
            AlphaLaw::Zero => "zero",
        }
    }
}

impl fmt::Display for AlphaLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphaLaw::ThetaMinusThetaC => write!(f, "alpha = theta - theta_c"),
            AlphaLaw::Zero => write!(f, "alpha = 0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> VehicleState {
        VehicleState {
            velocity: 100.0,
            flight_path_angle: 60.0,
            downrange: 10.0,
            altitude: 500.0,
            pitch_rate: 0.0,
            pitch_angle: 62.0,
            mass: 1_000.0,
        }
    }

    #[test]
    fn vector_round_trip_preserves_order() {
        let s = sample();
        let v = s.to_vector();
        assert_eq!(v[3], 500.0);
        assert_eq!(v[6], 1_000.0);
        assert_eq!(VehicleState::from_vector(&v), s);
    }

    #[test]
    fn apply_scales_by_dt() {
        let d = StateDerivative {
            daltitude: 50.0,
            dmass: -20.0,
            ..Default::default()
        };
        let next = sample().apply(&d, 0.5);
        assert_abs_diff_eq!(next.altitude, 525.0);
        assert_abs_diff_eq!(next.mass, 990.0);
        assert_abs_diff_eq!(next.velocity, 100.0);
    }

    #[test]
    fn clamping_floors_altitude_and_speed() {
        let s = VehicleState {
            altitude: -3.0,
            velocity: -1.0,
            ..sample()
        };
        let floored = s.with_ground_floor();
        assert_eq!(floored.altitude, 0.0);
        assert_eq!(floored.velocity, -1.0);
        let c = s.clamped();
        assert_eq!((c.altitude, c.velocity), (0.0, 0.0));
    }

    #[test]
    fn velocity_components() {
        let s = sample();
        assert_abs_diff_eq!(s.horizontal_velocity(), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.vertical_velocity(), 86.602_540_378, epsilon = 1e-6);
    }

    #[test]
    fn alpha_laws() {
        let s = sample();
        assert_abs_diff_eq!(AlphaLaw::ThetaMinusThetaC.angle_of_attack(&s), 2.0);
        assert_eq!(AlphaLaw::Zero.angle_of_attack(&s), 0.0);
    }
}
