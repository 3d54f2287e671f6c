use rapid_wordle::cli::parse_cli;
use rapid_wordle::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let log_path = cli.log_file.clone().or_else(logging::default_log_path);
    if let Some(path) = &log_path
        && let Err(e) = logging::init(path, cli.verbose)
    {
        eprintln!("Logging disabled: cannot open '{}': {e}", path.display());
    }

    match rapid_wordle::tui::run(&cli.game_config()) {
        Ok(score) => {
            println!("Final score: {score}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Terminal error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
