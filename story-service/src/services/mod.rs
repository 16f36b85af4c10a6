pub mod assembler;
pub mod illustrator;
pub mod normalizer;
pub mod placeholder;
pub mod prompts;
pub mod providers;
pub mod quota;

pub use assembler::StoryAssembler;
pub use illustrator::Illustrator;
pub use normalizer::{normalize_response, ParsingError};
pub use placeholder::placeholder_image;

use providers::ProviderError;
use thiserror::Error;

/// Failures that abort story generation.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Text generation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("Text backend returned no content")]
    EmptyResponse,

    #[error("No story parts generated")]
    EmptyStory,
}
