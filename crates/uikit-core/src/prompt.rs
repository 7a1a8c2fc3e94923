//! Yes/no questions asked during an install

/// Interactive confirmation
pub trait Confirm: Send + Sync {
    /// Ask `message`; `default` is the answer when the user just presses enter
    fn confirm(&self, message: &str, default: bool) -> bool;
}

/// Answers every question the same way, for non-interactive runs
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, message: &str, _default: bool) -> bool {
        tracing::debug!(%message, answer = self.0, "Answering without prompting");
        self.0
    }
}
