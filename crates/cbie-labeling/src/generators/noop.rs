use cbie_core::errors::{CbieResult, GenerationError};
use cbie_core::models::CompletionRequest;
use cbie_core::traits::ITextGenerator;

/// Generator that is never available. Every label, name, and archetype
/// resolves to its fallback.
pub struct NoOpGenerator;

impl ITextGenerator for NoOpGenerator {
    fn complete(&self, _request: &CompletionRequest) -> CbieResult<String> {
        Err(GenerationError::Unavailable {
            provider: self.name().to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }
}
