use thiserror::Error;

/// Failures surfaced by the simulation core.
///
/// Domain violations inside a running simulation never reach this type; the
/// derivative evaluator resolves them with fallback values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("altitude {altitude} m is outside the atmosphere model domain [{min}, {max}] m")]
    OutOfDomainAltitude { altitude: f64, min: f64, max: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
