//! # cbie-labeling
//!
//! Human-facing text only: a concise label and a longer name per cluster and
//! one archetype per profile. Nothing here feeds back into scoring. Every
//! generation failure resolves to a documented fallback.

pub mod cleanup;
pub mod generators;
pub mod prompts;
pub mod selector;

pub use generators::{create_generator, ChatCompletionsClient, NoOpGenerator};
pub use selector::{LabelSelector, LabelStats};
