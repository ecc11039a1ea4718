pub mod lifecycle;
pub mod service;

pub use service::{DeleteOutcome, MistakeService, NewMistake};
