//! HTTP handlers for the story service.

pub mod health;
pub mod story;

pub use health::{health_check, root};
pub use story::generate_story;
