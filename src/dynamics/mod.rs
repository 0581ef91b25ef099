pub mod evaluator;
pub mod state;

pub use evaluator::{DerivativeEvaluator, Evaluation};
pub use state::{AlphaLaw, StateDerivative, StateVector, VehicleState};

/// Anything that can supply the state derivative for the integrators.
pub trait EquationsOfMotion {
    fn derivative(&self, t: f64, state: &VehicleState) -> StateDerivative;
}
