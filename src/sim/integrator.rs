use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dynamics::state::VehicleState;
use crate::dynamics::EquationsOfMotion;

// ---------------------------------------------------------------------------
// Fixed-step integrators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMethod {
    /// Explicit Euler, first order
    Euler,
    /// Heun predictor-corrector, second order
    ModifiedEuler,
    /// Classical Runge-Kutta, fourth order
    Rk4,
}

impl IntegrationMethod {
    pub const ALL: [IntegrationMethod; 3] = [
        IntegrationMethod::Euler,
        IntegrationMethod::ModifiedEuler,
        IntegrationMethod::Rk4,
    ];

    /// Advance `state` from `t` to `t + dt`.
    pub fn step<E: EquationsOfMotion>(self, eom: &E, t: f64, state: &VehicleState, dt: f64) -> VehicleState {
        match self {
            IntegrationMethod::Euler => euler_step(eom, t, state, dt),
            IntegrationMethod::ModifiedEuler => heun_step(eom, t, state, dt),
            IntegrationMethod::Rk4 => rk4_step(eom, t, state, dt),
        }
    }

    /// Global order of accuracy on smooth problems.
    pub fn order(self) -> u32 {
        match self {
            IntegrationMethod::Euler => 1,
            IntegrationMethod::ModifiedEuler => 2,
            IntegrationMethod::Rk4 => 4,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            IntegrationMethod::Euler => "euler",
            IntegrationMethod::ModifiedEuler => "modified_euler",
            IntegrationMethod::Rk4 => "runge_kutta4",
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationMethod::Euler => "Euler",
            IntegrationMethod::ModifiedEuler => "modified Euler",
            IntegrationMethod::Rk4 => "Runge-Kutta 4",
        };
        f.write_str(name)
    }
}

/// state += f(t, state)·dt
pub fn euler_step<E: EquationsOfMotion>(eom: &E, t: f64, state: &VehicleState, dt: f64) -> VehicleState {
    let k1 = eom.derivative(t, state);
    state.apply(&k1, dt).clamped()
}

/// Heun: Euler predictor, trapezoidal corrector.
pub fn heun_step<E: EquationsOfMotion>(eom: &E, t: f64, state: &VehicleState, dt: f64) -> VehicleState {
    let k1 = eom.derivative(t, state);
    let predictor = state.apply(&k1, dt).with_ground_floor();
    let k2 = eom.derivative(t + dt, &predictor);

    let y = state.to_vector() + (k1.to_vector() + k2.to_vector()) * (dt / 2.0);
    VehicleState::from_vector(&y).clamped()
}

/// Classical RK4. Stage predictors are floored at ground level.
pub fn rk4_step<E: EquationsOfMotion>(eom: &E, t: f64, state: &VehicleState, dt: f64) -> VehicleState {
    let half = dt * 0.5;
    let k1 = eom.derivative(t, state);
    let k2 = eom.derivative(t + half, &state.apply(&k1, half).with_ground_floor());
    let k3 = eom.derivative(t + half, &state.apply(&k2, half).with_ground_floor());
    let k4 = eom.derivative(t + dt, &state.apply(&k3, dt).with_ground_floor());

    let y = state.to_vector()
        + (k1.to_vector() + 2.0 * k2.to_vector() + 2.0 * k3.to_vector() + k4.to_vector()) * (dt / 6.0);
    VehicleState::from_vector(&y).clamped()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::StateDerivative;
    use approx::assert_abs_diff_eq;

    /// dV/dt = -V, everything else frozen.
    struct Decay;

    impl EquationsOfMotion for Decay {
        fn derivative(&self, _t: f64, s: &VehicleState) -> StateDerivative {
            StateDerivative { dvelocity: -s.velocity, ..Default::default() }
        }
    }

    /// Constant climb at -10 m/s, used to probe the ground floor.
    struct Sink;

    impl EquationsOfMotion for Sink {
        fn derivative(&self, _t: f64, s: &VehicleState) -> StateDerivative {
            // Reports a positive rate whenever it is queried below ground.
            let daltitude = if s.altitude < 0.0 { 1e6 } else { -10.0 };
            StateDerivative { daltitude, dvelocity: -50.0, ..Default::default() }
        }
    }

    fn start(velocity: f64, altitude: f64) -> VehicleState {
        VehicleState {
            velocity,
            flight_path_angle: 0.0,
            downrange: 0.0,
            altitude,
            pitch_rate: 0.0,
            pitch_angle: 0.0,
            mass: 1.0,
        }
    }

    fn decay_error(method: IntegrationMethod, dt: f64) -> f64 {
        let steps = (1.0 / dt).round() as usize;
        let mut s = start(100.0, 0.0);
        for i in 0..steps {
            s = method.step(&Decay, i as f64 * dt, &s, dt);
        }
        (s.velocity - 100.0 * (-1.0_f64).exp()).abs()
    }

    #[test]
    fn observed_order_matches_nominal() {
        let bounds = [
            (IntegrationMethod::Euler, 1.9, 2.2),
            (IntegrationMethod::ModifiedEuler, 3.8, 4.4),
            (IntegrationMethod::Rk4, 14.0, 18.0),
        ];
        for (method, lo, hi) in bounds {
            let e1 = decay_error(method, 0.1);
            let e2 = decay_error(method, 0.05);
            let e3 = decay_error(method, 0.025);
            for ratio in [e1 / e2, e2 / e3] {
                assert!(
                    ratio > lo && ratio < hi,
                    "{method}: error ratio {ratio} outside ({lo}, {hi})"
                );
            }
            assert_abs_diff_eq!(ratio_to_order(e1 / e2), method.order() as f64, epsilon = 0.2);
        }
    }

    fn ratio_to_order(ratio: f64) -> f64 {
        ratio.log2()
    }

    #[test]
    fn single_euler_step_is_exact_for_constant_rate() {
        let s = IntegrationMethod::Euler.step(&Decay, 0.0, &start(10.0, 0.0), 0.1);
        assert_abs_diff_eq!(s.velocity, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn end_of_step_clamps_altitude_and_speed() {
        for method in IntegrationMethod::ALL {
            let s = method.step(&Sink, 0.0, &start(1.0, 0.5), 0.1);
            assert_eq!(s.velocity, 0.0, "{method}");
            assert!(s.altitude >= 0.0, "{method}");
        }
    }

    #[test]
    fn stage_predictors_never_go_below_ground() {
        // A predictor below ground would inject the 1e6 m/s rate.
        for method in IntegrationMethod::ALL {
            let s = method.step(&Sink, 0.0, &start(1.0, 0.5), 0.1);
            assert!(s.altitude < 1.0, "{method}: {}", s.altitude);
        }
    }

    #[test]
    fn serde_and_display_names() {
        let m: IntegrationMethod = serde_json::from_str("\"modified-euler\"").unwrap();
        assert_eq!(m, IntegrationMethod::ModifiedEuler);
        let m: IntegrationMethod = serde_json::from_str("\"rk4\"").unwrap();
        assert_eq!(m, IntegrationMethod::Rk4);
        assert_eq!(IntegrationMethod::Rk4.slug(), "runge_kutta4");
    }
}
