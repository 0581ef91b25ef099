pub mod config;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use error::SimError;
pub use physics::atmosphere::{compute_atmosphere, AtmosphericState};
pub use sim::{run_trajectory, IntegrationConfig, IntegrationMethod, TrajectorySample};
pub use dynamics::state::{AlphaLaw, VehicleState};
pub use vehicle::{InitialConditions, VehicleParameters};
