//! User Prompt Boundary
//!
//! Link insertion and the import merge flow need a blocking question
//! answered by the operator ("Enter URL:", "Replace existing content?").
//! Where those answers come from is the embedding surface's business;
//! the engine only sees this trait.

// ─────────────────────────────────────────────────────────────────────────────
// Prompter Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Blocking prompt/confirm collaborator.
pub trait Prompter {
    /// Ask the operator for a URL. `None` means the prompt was dismissed.
    fn request_url(&self) -> Option<String>;

    /// Ask a yes/no question. `true` is the affirmative answer.
    fn confirm(&self, message: &str) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripted Prompter (test support)
// ─────────────────────────────────────────────────────────────────────────────

/// A prompter with canned answers, for exercising the flows headlessly.
#[cfg(test)]
pub(crate) struct ScriptedPrompter {
    pub url: Option<String>,
    pub confirm_answer: bool,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            confirm_answer: true,
        }
    }

    pub fn dismissed() -> Self {
        Self {
            url: None,
            confirm_answer: false,
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn request_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirm_answer
    }
}
