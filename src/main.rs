//! Sliding-Block Puzzle Solver
//!
//! Solves the classic 5x4 sliding-block openings: move the 2x2 block to
//! the bottom-center exit in the minimum number of single-cell moves.
//! Besides the one-time solve, the `hint` command answers "shortest
//! remaining path" for any mid-game state given in its packed decimal
//! form.

use std::path::Path;

use clap::{Parser, Subcommand};

use huarong::board::{format_board, serialize, Layout};
use huarong::layouts::{self, COLS, ROWS};
use huarong::pathfinder::PathFinder;
use huarong::persistence;

/// Solves sliding-block puzzles and answers mid-game hint queries.
#[derive(Parser)]
#[command(name = "huarong")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a named opening and save the optimal path.
    Solve {
        /// Opening name from the built-in catalog.
        #[arg(long, default_value = "classic")]
        layout: String,
    },
    /// Print the shortest remaining path from a mid-game state.
    Hint {
        /// Opening the session started from.
        #[arg(long, default_value = "classic")]
        layout: String,
        /// Current state in its packed decimal form.
        state: String,
    },
    /// Show the number of moves in the saved solution.
    Count,
    /// List the built-in openings.
    List,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { layout }) => run_solve(&layout),
        Some(Command::Hint { layout, state }) => run_hint(&layout, &state),
        Some(Command::Count) => run_count(),
        Some(Command::List) => run_list(),
        None => run_solve("classic"),
    }
}

/// Encodes a catalog opening, reporting failures to the user.
fn opening_layout(name: &str) -> Option<Layout> {
    let Some(grid) = layouts::by_name(name) else {
        eprintln!("Unknown opening '{name}'. Try 'huarong list'.");
        return None;
    };
    match serialize::<ROWS, COLS>(&layouts::to_rows(grid)) {
        Ok(layout) => Some(layout),
        Err(err) => {
            eprintln!("Opening '{name}' failed to encode: {err}");
            None
        }
    }
}

/// Solves an opening, prints the move count, and saves the path.
fn run_solve(name: &str) {
    let Some(initial) = opening_layout(name) else {
        return;
    };

    let mut finder: PathFinder<ROWS, COLS> = PathFinder::new();
    let path = finder.compute_initial_solution(initial);
    if path.is_empty() {
        eprintln!("No solution exists from '{name}'. Hints are disabled.");
        return;
    }

    println!("Solved '{name}' in {} moves", path.len() - 1);
    if let Err(err) = persistence::save::<ROWS, COLS>(Path::new("."), &path) {
        eprintln!("Failed to save solution: {err}");
    } else {
        println!("Wrote solution.txt and solution.dat");
    }
}

/// Answers a hint query for a mid-game state.
fn run_hint(name: &str, state: &str) {
    let Some(initial) = opening_layout(name) else {
        return;
    };
    let current = match state.parse::<Layout>() {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("'{state}' is not a packed layout: {err}");
            return;
        }
    };
    if let Err(err) = huarong::board::deserialize::<ROWS, COLS>(current) {
        eprintln!("State {current} is corrupted: {err}");
        return;
    }

    let mut finder: PathFinder<ROWS, COLS> = PathFinder::new();
    finder.compute_initial_solution(initial);

    let path = finder.query_shortest_path_from(current);
    match path.len() {
        0 => println!("No hint available from this state."),
        1 => println!("Already solved."),
        moves_left => {
            println!("{} moves remaining. Next:", moves_left - 1);
            print!("{}", format_board::<ROWS, COLS>(path[1]));
        }
    }
}

/// Prints the move count of the saved solution.
fn run_count() {
    match persistence::count(Path::new(".")) {
        Some(entries) => println!("{} moves", entries.saturating_sub(1)),
        None => eprintln!("No solution.dat found. Run 'huarong solve' first."),
    }
}

/// Prints every opening in the catalog with its packed decimal form.
fn run_list() {
    for (name, grid) in layouts::CATALOG {
        match serialize::<ROWS, COLS>(&layouts::to_rows(grid)) {
            Ok(layout) => {
                println!("{name} ({layout}):");
                print!("{}", format_board::<ROWS, COLS>(layout));
                println!();
            }
            Err(err) => eprintln!("{name}: failed to encode: {err}"),
        }
    }
}
