// Integration tests for rapid-wordle
// These drive the game core through its public API with a manual clock and a
// recording renderer standing in for the terminal

use rand::SeedableRng;
use rand_pcg::Pcg32;
use rapid_wordle::*;
use std::collections::HashSet;

#[derive(Default)]
struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, command: &RenderCommand) -> Result<(), RenderError> {
        self.commands.push(command.clone());
        Ok(())
    }
}

impl RecordingRenderer {
    fn messages(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Message(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    fn last_timer(&self) -> Option<u32> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::Timer(t) => Some(*t),
            _ => None,
        })
    }
}

fn seeded_game(time_limit: u32, seed: u64) -> Game<ManualClock> {
    Game::new(time_limit, WordBank::embedded(seed), ManualClock::new())
}

#[test]
fn test_short_game_times_out_with_zero_score() {
    let mut game = seeded_game(2, 1);
    let mut renderer = RecordingRenderer::default();

    game.start().unwrap();
    game.tick();
    assert_eq!(game.phase(), Phase::Running);
    game.tick();
    game.flush(&mut renderer);

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.score(), 0);
    assert_eq!(renderer.last_timer(), Some(0));
    assert_eq!(renderer.messages().last(), Some(&"Game over! Your score: 0"));
}

#[test]
fn test_clock_driven_timeout_cancels_tick_once() {
    let mut game = seeded_game(5, 2);
    game.start().unwrap();

    game.clock_mut().advance(3);
    assert_eq!(game.run_due_ticks(), 3);
    assert_eq!(game.time_remaining(), 2);

    game.clock_mut().advance(2);
    game.run_due_ticks();
    assert_eq!(game.phase(), Phase::Ended);
    assert!(!game.clock().is_scheduled());
    assert_eq!(game.clock().cancel_count, 1);

    // The cancelled clock produces nothing further
    game.clock_mut().advance(4);
    assert_eq!(game.run_due_ticks(), 0);
    game.end();
    assert_eq!(game.clock().cancel_count, 1);
    assert_eq!(game.time_remaining(), 0);
}

#[test]
fn test_playing_through_rounds_grows_word_length() {
    let mut game = seeded_game(60, 3);
    let mut renderer = RecordingRenderer::default();
    game.start().unwrap();

    let mut seen = HashSet::new();
    for expected_score in 1..=6u32 {
        let word = game.current_word().to_string();
        assert!(seen.insert(word.clone()), "'{word}' drawn twice");
        assert_eq!(word.len(), game.word_length());

        // A miss first, then the right answer
        let miss = "z".repeat(game.word_length());
        let outcome = game.submit_guess(&miss).unwrap();
        assert!(matches!(outcome, GuessOutcome::Missed(_)));

        let outcome = game.submit_guess(&word).unwrap();
        assert!(outcome.feedback().is_solved());
        assert_eq!(game.score(), expected_score);
    }
    game.flush(&mut renderer);

    // Score 2 -> 5 letters, 4 -> 6, 6 -> 7
    assert_eq!(game.word_length(), 7);
    assert_eq!(game.guesses().len(), 12);
    let grid_sizes: Vec<usize> = renderer
        .commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::ResetGrid { columns } => Some(*columns),
            _ => None,
        })
        .collect();
    assert_eq!(grid_sizes, vec![4, 4, 5, 5, 6, 6, 7]);
}

#[test]
fn test_invalid_length_guess_is_recoverable() {
    let mut game = seeded_game(60, 4);
    game.start().unwrap();
    let word = game.current_word().to_string();

    for bad in ["", "abc", "abcdef"] {
        assert!(matches!(
            game.submit_guess(bad),
            Err(GameError::InvalidGuessLength { expected: 4, .. })
        ));
    }
    assert_eq!(game.score(), 0);
    assert!(game.guesses().is_empty());
    assert_eq!(game.current_word(), word);
    assert!(game.submit_guess(&word).is_ok());
}

#[test]
fn test_small_bank_runs_out() {
    let bank = WordBank::from_words(["test", "play", "react"], Pcg32::seed_from_u64(9));
    let mut game = Game::new(60, bank, ManualClock::new());
    let mut renderer = RecordingRenderer::default();
    game.start().unwrap();

    // Two four-letter words, then one five-letter word, then nothing
    for _ in 0..2 {
        let word = game.current_word().to_string();
        game.submit_guess(&word).unwrap();
    }
    assert_eq!(game.word_length(), 5);
    assert_eq!(game.current_word(), "react");

    assert_eq!(
        game.submit_guess("react"),
        Err(GameError::WordBankExhausted { length: 5 })
    );
    game.flush(&mut renderer);
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.score(), 3);
    assert_eq!(
        renderer.messages().last(),
        Some(&"Word bank exhausted. Game over! Your score: 3")
    );
}

#[test]
fn test_history_rows_match_feedback() {
    let bank = WordBank::from_words(["code", "bobs"], Pcg32::seed_from_u64(0));
    let mut game = Game::new(60, bank, ManualClock::new());
    let mut board = tui::Board::new(60);
    game.start().unwrap();
    let word = game.current_word().to_string();
    let other = if word == "code" { "bobs" } else { "code" };

    game.submit_guess(other).unwrap();
    game.submit_guess(other).unwrap();
    game.flush(&mut board);

    assert_eq!(board.rows().len(), 2);
    let expected = evaluate(other, &word).unwrap();
    for row in board.rows() {
        let states: Vec<tui::CellState> = row.iter().map(|cell| cell.state).collect();
        let wanted: Vec<tui::CellState> = expected
            .letters()
            .iter()
            .map(|&f| tui::CellState::from(f))
            .collect();
        assert_eq!(states, wanted);
        let letters: String = row.iter().map(|cell| cell.letter).collect();
        assert_eq!(letters, other.to_uppercase());
    }
}

#[test]
fn test_evaluator_repeated_letter_fixtures() {
    use rapid_wordle::LetterFeedback::{Absent, Correct, Present};

    let cases = [
        ("bobby", "blood", vec![Correct, Present, Absent, Absent, Absent]),
        ("blood", "bobby", vec![Correct, Absent, Present, Absent, Absent]),
        ("speed", "abide", vec![Absent, Absent, Present, Absent, Present]),
        ("llama", "ladle", vec![Correct, Present, Present, Absent, Absent]),
    ];
    for (guess, target, expected) in cases {
        assert_eq!(
            evaluate(guess, target).unwrap().letters(),
            expected.as_slice(),
            "{guess} vs {target}"
        );
    }
}

#[test]
fn test_same_seed_replays_same_game() {
    let mut a = seeded_game(60, 77);
    let mut b = seeded_game(60, 77);
    a.start().unwrap();
    b.start().unwrap();
    for _ in 0..5 {
        assert_eq!(a.current_word(), b.current_word());
        let word = a.current_word().to_string();
        a.submit_guess(&word).unwrap();
        b.submit_guess(&word).unwrap();
    }
}

#[test]
fn test_restart_after_game_over() {
    let mut game = seeded_game(1, 5);
    game.start().unwrap();
    game.tick();
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.submit_guess("test"), Err(GameError::NotRunning));

    game.start().unwrap();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.time_remaining(), 1);
    assert!(game.clock().is_scheduled());
    assert_eq!(game.clock().schedule_count, 2);
    assert_eq!(game.clock().cancel_count, 1);
}
