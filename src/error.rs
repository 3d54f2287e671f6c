use thiserror::Error;

/// Errors raised by the game core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The guess does not have as many letters as the current target word.
    #[error("guess has {actual} letters, expected {expected}")]
    InvalidGuessLength { expected: usize, actual: usize },

    /// No candidate word remains for the required length.
    #[error("word bank exhausted: no {length}-letter words left")]
    WordBankExhausted { length: usize },

    #[error("no game is running")]
    NotRunning,

    #[error("a game is already running")]
    AlreadyRunning,
}

/// Errors raised by a presentation adapter while applying a render command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A display element the command refers to does not exist.
    #[error("render target missing: {0}")]
    TargetMissing(String),
}
