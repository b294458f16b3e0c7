//! Connect-N command line
//!
//! Lists the level catalogue, plays a full match between the computer (O)
//! and the advisor (X), or asks the advisor for a move on a board diagram.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connect_n::board::{Board, Player};
use connect_n::config::EngineConfig;
use connect_n::engine::{suggest_move, AIEngine};
use connect_n::error::{BoardError, ConfigError, GameError};
use connect_n::game::{Match, RoundStatus};
use connect_n::level::{levels, Difficulty, Level, TWO_PLAYER_LEVELS};

/// Connect-N rules engine and computer opponent
#[derive(Parser, Debug)]
#[command(name = "connect_n")]
#[command(about = "Connect-N on obstacle boards with a tiered computer opponent", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in levels
    Levels,

    /// Play one match: the computer (O) against the advisor (X)
    Play {
        /// Tier of the computer player
        #[arg(short, long, default_value = "simple")]
        difficulty: Difficulty,

        /// Level number within the tier
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Seed for obstacles and random moves
        #[arg(long)]
        seed: Option<u64>,

        /// Engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Wall-clock budget per computer move; Pro defaults to 2000 ms
        #[arg(short, long)]
        time_limit_ms: Option<u64>,

        /// Give up on the match after this many rounds
        #[arg(long, default_value_t = 9)]
        max_rounds: u32,
    },

    /// Print the advisor's move for a board diagram
    Suggest {
        /// File with the board diagram (`.` empty, `#` obstacle, `X`, `O`)
        #[arg(short, long)]
        board: PathBuf,

        /// Player to advise
        #[arg(short, long)]
        player: Player,

        /// Pieces in a row needed to win
        #[arg(short, long)]
        win: usize,

        /// Seed for the random fallback
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no level {level} in the {difficulty} tier")]
    UnknownLevel { difficulty: Difficulty, level: u32 },

    #[error("win condition must be at least 1")]
    WinCondition,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,connect_n=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Levels => {
            print_levels();
            Ok(())
        }
        Command::Play {
            difficulty,
            level,
            seed,
            config,
            time_limit_ms,
            max_rounds,
        } => run_match(
            difficulty,
            level,
            seed,
            config.as_deref(),
            time_limit_ms,
            max_rounds,
        ),
        Command::Suggest {
            board,
            player,
            win,
            seed,
        } => run_suggest(&board, player, win, seed),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn print_levels() {
    println!("{:<8} {:>5} {:>5} {:>3} {:>9}", "tier", "level", "size", "K", "obstacles");
    for difficulty in Difficulty::ALL {
        for l in levels(difficulty) {
            print_level(l);
        }
    }
    println!();
    println!("two-player presets:");
    for l in &TWO_PLAYER_LEVELS {
        print_level(l);
    }
}

fn print_level(l: &Level) {
    println!(
        "{:<8} {:>5} {:>5} {:>3} {:>9}",
        l.difficulty.to_string(),
        l.level,
        l.board_size,
        l.win_condition,
        l.obstacles
    );
}

fn run_match(
    difficulty: Difficulty,
    level: u32,
    seed: Option<u64>,
    config: Option<&Path>,
    time_limit_ms: Option<u64>,
    max_rounds: u32,
) -> Result<(), CliError> {
    let level = Level::find(difficulty, level).ok_or(CliError::UnknownLevel { difficulty, level })?;
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let config = config
        .with_time_limit(time_limit_ms)
        .with_budget_for(difficulty);
    config.validate()?;
    let engine = AIEngine::with_config(config);
    let mut rng = make_rng(seed);
    let mut game = Match::new(level, &mut rng)?;

    info!(
        %difficulty,
        level = level.level,
        size = level.board_size,
        k = level.win_condition,
        "match started"
    );

    loop {
        let k = level.win_condition;
        while !game.round().status().is_over() {
            let round = game.round();
            let mover = round.to_move();
            let pos = match mover {
                Player::X => suggest_move(round.board(), mover, k, &mut rng),
                Player::O => engine.computer_move(round.board(), mover, &level, game.score(), &mut rng),
            };
            let Some(pos) = pos else {
                warn!("no move available on an unfinished round");
                break;
            };
            game.play(pos)?;
        }

        println!("round {}:", game.rounds_played());
        print!("{}", game.round().board());
        match game.round().status() {
            RoundStatus::Won(win) => {
                let cells: Vec<String> = win.line.iter().map(ToString::to_string).collect();
                println!("{} wins with {}", win.winner, cells.join(" "));
            }
            RoundStatus::Draw => println!("draw"),
            RoundStatus::InProgress => println!("unfinished"),
        }
        println!("score: {}", game.score());
        println!();

        if let Some(winner) = game.winner() {
            println!("{winner} takes the match");
            break;
        }
        if game.rounds_played() >= max_rounds {
            println!("no winner after {max_rounds} rounds");
            break;
        }
        if game.is_tie_breaker() {
            info!("tie-breaker round");
        }
        game.next_round(&mut rng)?;
    }
    Ok(())
}

fn run_suggest(path: &Path, player: Player, win: usize, seed: Option<u64>) -> Result<(), CliError> {
    if win == 0 {
        return Err(CliError::WinCondition);
    }
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let board: Board = text.parse()?;
    let mut rng = make_rng(seed);

    match suggest_move(&board, player, win, &mut rng) {
        Some(pos) => println!("{player} should play {pos}"),
        None => println!("no move available"),
    }
    Ok(())
}
