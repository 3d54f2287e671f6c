// Library interface for rapid-wordle
// The game core is independent of the terminal front end

pub mod cli;
pub mod clock;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod render;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use clock::{Clock, IntervalClock, ManualClock};
pub use error::{GameError, RenderError};
pub use feedback::{Feedback, LetterFeedback, evaluate};
pub use game_state::{Game, GameConfig, GuessOutcome, Phase};
pub use render::{RenderCommand, Renderer, present};
pub use wordbank::{EMBEDDED_WORDBANK, WordBank, load_wordbank_from_str};
