//! The step-by-step data collection flow.

pub mod forms;
pub mod handlers;
pub mod records;
pub mod steps;
pub mod validation;
