//! Faults a simulation step can report
//!
//! None of these end a round. The tick repairs the offending value, records
//! the fault in its report and carries on with the remaining steps.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("non-finite {what} reset to a safe value")]
    NonFinite { what: &'static str },
    #[error("frame delta {0} is not a usable duration")]
    InvalidDelta(f32),
    #[error("spawn interval {0} is not a usable duration")]
    InvalidInterval(f64),
}
