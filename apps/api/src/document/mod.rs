//! The assembled resume: one read-only model built from all wizard records.

pub mod assemble;
pub mod dates;
pub mod handlers;
pub mod model;
pub mod theme;

pub use assemble::{assemble, load_source};
pub use model::ResumeDocument;
pub use theme::Theme;
