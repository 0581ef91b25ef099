pub mod aerodynamics;
pub mod atmosphere;
pub mod gravity;
pub mod nozzle;

pub use aerodynamics::{AeroCoefficients, AeroTable};
pub use atmosphere::{compute_atmosphere, AtmosphereLayer, AtmosphericState, StandardAtmosphere};
