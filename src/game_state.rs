//! Timed game state machine.
//!
//! `Idle` → `Running` on [`Game::start`]; `Running` → `Ended` when the clock
//! runs out, the word bank has no word of the required length, or
//! [`Game::end`] is called. A finished game can be started again.
//!
//! The game never draws anything itself. Every transition queues
//! [`RenderCommand`]s which the caller hands to a [`Renderer`].

use crate::clock::Clock;
use crate::error::GameError;
use crate::feedback::{Feedback, evaluate};
use crate::render::{RenderCommand, Renderer, present};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use log::{info, warn};
use rand::Rng;
use rand_pcg::Pcg32;
use std::time::Duration;

pub const STARTING_WORD_LENGTH: usize = 4;
pub const DEFAULT_TIME_LIMIT: u32 = 60;
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
const POINTS_PER_LENGTH_STEP: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Settings for a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Seconds on the clock at the start of each game.
    pub time_limit: u32,
    /// Seed for word selection. Random when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            seed: None,
        }
    }
}

/// Result of a guess that had the right length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched the target; a new word has been drawn.
    Solved(Feedback),
    Missed(Feedback),
}

impl GuessOutcome {
    pub fn feedback(&self) -> &Feedback {
        match self {
            Self::Solved(feedback) | Self::Missed(feedback) => feedback,
        }
    }
}

pub struct Game<C, R = Pcg32> {
    time_limit: u32,
    bank: WordBank<R>,
    clock: C,
    phase: Phase,
    score: u32,
    word_length: usize,
    time_remaining: u32,
    current_word: String,
    guesses: Vec<String>,
    /// Grid rows painted for the current target word.
    round_rows: usize,
    outbox: Vec<RenderCommand>,
}

impl<C: Clock> Game<C, Pcg32> {
    /// Game over the embedded word list, seeded from `config`.
    pub fn from_config(config: &GameConfig, clock: C) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        // Release logs need the seed to replay a game
        info!("Word selection seed: {seed}");
        Self::new(config.time_limit, WordBank::embedded(seed), clock)
    }
}

impl<C: Clock, R: Rng> Game<C, R> {
    pub fn new(time_limit: u32, bank: WordBank<R>, clock: C) -> Self {
        Self {
            time_limit,
            bank,
            clock,
            phase: Phase::Idle,
            score: 0,
            word_length: STARTING_WORD_LENGTH,
            time_remaining: time_limit,
            current_word: String::new(),
            guesses: Vec::new(),
            round_rows: 0,
            outbox: Vec::new(),
        }
    }

    /// Begin a new game from `Idle` or `Ended`.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyRunning`] if a game is in progress, or
    /// [`GameError::WordBankExhausted`] if no starting word exists, in which
    /// case the game ends immediately.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::Running {
            return Err(GameError::AlreadyRunning);
        }

        self.score = 0;
        self.word_length = STARTING_WORD_LENGTH;
        self.time_remaining = self.time_limit;
        self.guesses.clear();
        self.current_word.clear();
        self.round_rows = 0;
        self.bank.reset();
        info_log!("Starting game with {}s on the clock", self.time_limit);

        self.emit(RenderCommand::Timer(self.time_remaining));
        self.emit(RenderCommand::Score(self.score));

        let word = match self.bank.draw(self.word_length) {
            Ok(word) => word,
            Err(e) => {
                warn!("Cannot start: {e}");
                self.finish(format!("No words available. Game over! Your score: {}", self.score));
                return Err(e);
            }
        };
        self.set_target(word);
        self.phase = Phase::Running;
        self.emit(RenderCommand::Phase(Phase::Running));
        self.emit(RenderCommand::Message(format!(
            "Guess the {}-letter word!",
            self.word_length
        )));

        if self.time_remaining == 0 {
            self.finish(self.game_over_message());
        } else {
            self.clock.schedule(TICK_PERIOD);
        }
        Ok(())
    }

    /// Advance the clock by one second. No effect unless running.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.emit(RenderCommand::Timer(self.time_remaining));
        if self.time_remaining == 0 {
            info_log!("Time is up");
            self.finish(self.game_over_message());
        }
    }

    /// Feed every tick the clock has due into [`Game::tick`]. Returns the
    /// number of ticks applied.
    pub fn run_due_ticks(&mut self) -> u32 {
        let due = self.clock.due();
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Check `text` against the current target word.
    ///
    /// The guess is trimmed and lowercased first. A wrong guess is not an
    /// error; it comes back as [`GuessOutcome::Missed`].
    ///
    /// # Errors
    ///
    /// - [`GameError::NotRunning`] outside a running game.
    /// - [`GameError::InvalidGuessLength`] when the guess length differs from
    ///   the current word length. Nothing changes.
    /// - [`GameError::WordBankExhausted`] when the guess was correct but no
    ///   word of the next length remains. The point is kept and the game ends.
    pub fn submit_guess(&mut self, text: &str) -> Result<GuessOutcome, GameError> {
        if self.phase != Phase::Running {
            return Err(GameError::NotRunning);
        }

        let guess = text.trim().to_lowercase();
        let actual = guess.chars().count();
        if actual != self.word_length {
            debug_log!("Rejected '{}': expected {} letters", guess, self.word_length);
            self.emit(RenderCommand::Message("Incorrect word length.".to_string()));
            return Err(GameError::InvalidGuessLength {
                expected: self.word_length,
                actual,
            });
        }

        let feedback = evaluate(&guess, &self.current_word)?;
        self.paint_row(&guess, &feedback);
        info_log!("Guess '{}' -> {}", guess, feedback.pattern());
        self.guesses.push(guess);

        if !feedback.is_solved() {
            self.emit(RenderCommand::Message("Try again.".to_string()));
            return Ok(GuessOutcome::Missed(feedback));
        }

        self.score += 1;
        if self.score % POINTS_PER_LENGTH_STEP == 0 {
            self.word_length += 1;
            info_log!("Word length is now {}", self.word_length);
        }
        self.emit(RenderCommand::Score(self.score));

        match self.bank.draw(self.word_length) {
            Ok(word) => {
                self.set_target(word);
                self.emit(RenderCommand::Message("Correct!".to_string()));
                Ok(GuessOutcome::Solved(feedback))
            }
            Err(e) => {
                warn!("Ending game: {e}");
                self.finish(format!(
                    "Word bank exhausted. Game over! Your score: {}",
                    self.score
                ));
                Err(e)
            }
        }
    }

    /// Stop the game from any phase. Ending an already finished game does
    /// nothing.
    pub fn end(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.finish(self.game_over_message());
    }

    /// Drain the render commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Hand queued render commands to `renderer`.
    pub fn flush<Ren: Renderer + ?Sized>(&mut self, renderer: &mut Ren) {
        present(renderer, self.take_commands());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Target word of the current round; empty before the first start.
    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    /// Every valid-length guess submitted this game, oldest first.
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn bank(&self) -> &WordBank<R> {
        &self.bank
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn set_target(&mut self, word: String) {
        debug_log!("Current word: {}", word);
        self.current_word = word;
        self.round_rows = 0;
        self.emit(RenderCommand::ResetGrid {
            columns: self.word_length,
        });
    }

    fn paint_row(&mut self, guess: &str, feedback: &Feedback) {
        let row = self.round_rows;
        for (column, (letter, &fb)) in guess.chars().zip(feedback.letters()).enumerate() {
            self.emit(RenderCommand::PaintCell {
                row,
                column,
                letter,
                feedback: fb,
            });
        }
        self.round_rows += 1;
    }

    fn finish(&mut self, message: String) {
        self.phase = Phase::Ended;
        if self.clock.is_scheduled() {
            self.clock.cancel();
        }
        info_log!("Game over with score {}", self.score);
        self.emit(RenderCommand::Phase(Phase::Ended));
        self.emit(RenderCommand::Message(message));
    }

    fn game_over_message(&self) -> String {
        format!("Game over! Your score: {}", self.score)
    }

    fn emit(&mut self, command: RenderCommand) {
        self.outbox.push(command);
    }
}
