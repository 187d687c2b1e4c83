use std::sync::Arc;

use crate::errors::CbieResult;
use crate::models::CompletionRequest;

/// Short-text completion provider used for labels, names, and archetypes.
///
/// Callers treat every error as "use the fallback".
pub trait ITextGenerator: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> CbieResult<String>;

    fn name(&self) -> &str;

    fn is_available(&self) -> bool;
}

impl<T: ITextGenerator + ?Sized> ITextGenerator for Arc<T> {
    fn complete(&self, request: &CompletionRequest) -> CbieResult<String> {
        (**self).complete(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
