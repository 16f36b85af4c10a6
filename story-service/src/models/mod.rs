//! Domain models for the story service.

pub mod story;

pub use story::{
    ParsedStory, RawStoryPart, StoryDraft, StoryPart, StoryRequest, StoryResponse, STORY_PARTS,
};
