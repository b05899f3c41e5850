use thiserror::Error;

/// Errors surfaced by sessions, the trainer, and drill lookup.
///
/// Everything here is local and non-fatal: the caller decides whether to
/// refresh the session or ignore the keystroke.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypingError {
    /// The target text was empty; a session needs at least one character.
    #[error("target text is empty")]
    EmptyTarget,

    /// A keystroke was submitted after the last character was resolved.
    #[error("session is already finished")]
    SessionFinished,

    /// A new template text was outside the accepted length bounds.
    #[error("practice text must be {min}..={max} characters, got {len}")]
    TemplateLength { len: usize, min: usize, max: usize },

    /// No embedded drill with the given name exists.
    #[error("unknown drill {0:?}")]
    UnknownDrill(String),
}
