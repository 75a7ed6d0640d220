//! Feedback records, log trait and the HITL refiner

mod entity;
mod log;
mod refiner;

pub use entity::{FeedbackKind, FeedbackRecord};
pub use log::FeedbackLog;
pub use refiner::{FeedbackRefiner, RefinementOutcome};

#[cfg(test)]
pub use log::mock;
