pub mod event;
pub mod integrator;
pub mod runner;
pub mod sample;

pub use event::Termination;
pub use integrator::{euler_step, heun_step, rk4_step, IntegrationMethod};
pub use runner::{reference_matrix, run_trajectory, simulate, simulate_with, IntegrationConfig, Trajectory};
pub use sample::TrajectorySample;
