use crate::error::RenderError;
use crate::feedback::LetterFeedback;
use crate::game_state::Phase;
use log::warn;

/// Display update emitted by the game after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    /// Seconds left on the clock.
    Timer(u32),
    Score(u32),
    /// Status line shown to the player.
    Message(String),
    Phase(Phase),
    /// Clear the grid and size it for words of `columns` letters.
    ResetGrid { columns: usize },
    /// Show `letter` in a grid cell colored by `feedback`. Rows are appended
    /// one guess at a time, so `row` is at most the current row count.
    PaintCell {
        row: usize,
        column: usize,
        letter: char,
        feedback: LetterFeedback,
    },
}

/// Presentation adapter that interprets render commands.
pub trait Renderer {
    /// Apply a single command.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TargetMissing`] when the command refers to a
    /// display element that does not exist.
    fn render(&mut self, command: &RenderCommand) -> Result<(), RenderError>;
}

/// Apply `commands` in order. Failures are logged and skipped; rendering
/// never interrupts the game.
pub fn present<R, I>(renderer: &mut R, commands: I)
where
    R: Renderer + ?Sized,
    I: IntoIterator<Item = RenderCommand>,
{
    for command in commands {
        if let Err(e) = renderer.render(&command) {
            warn!("Skipping {command:?}: {e}");
        }
    }
}
