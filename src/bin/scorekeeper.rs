//! Terminal scorekeeper.
//!
//! Reads one command per line from stdin and prints the scoreboard after
//! each one. The game is saved to a JSON file after every change and picked
//! up again on the next start.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use scorekeeper::{
    Command, GameConfig, GameController, GameView, JsonFileStore, MemoryStore, Outcome, Phase, SnapshotStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Game = GameController<Box<dyn SnapshotStore>>;

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Round-by-round scorekeeping for tabletop games")]
struct Args {
    /// Snapshot file (defaults to bg_score_app_v1.json in the current directory)
    #[arg(long, env = "SCOREKEEPER_DATA")]
    data_file: Option<PathBuf>,

    /// Total that ends the game
    #[arg(long, default_value_t = scorekeeper::core::DEFAULT_GOAL_SCORE)]
    goal: i64,

    /// Keep the game in memory only
    #[arg(long, conflicts_with = "data_file")]
    memory: bool,

    /// Log filter (tracing env-filter syntax), written to stderr
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log: String,
}

const HELP: &str = "\
commands:
  add NAME     register a player (setup)
  start        start the game
  round        open score entry for the round
  <digits>     type digits for the focused player
  focus N      focus player N (1-based)
  c            clear the focused value
  ok           next player
  cancel       close entry without saving
  commit       record the round
  reset        new game (asks for confirmation)
  json         print the view as JSON
  show | help | quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(io::stderr)
        .init();

    let store: Box<dyn SnapshotStore> = if args.memory {
        Box::new(MemoryStore::new())
    } else {
        let store = match args.data_file {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::in_dir("."),
        };
        info!(path = %store.path().display(), "using snapshot file");
        Box::new(store)
    };

    let config = GameConfig::new().with_goal_score(args.goal);
    let mut game: Game = GameController::restore(config, store);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    render(&mut out, &game.view())?;

    let mut confirming_reset = false;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if confirming_reset {
            confirming_reset = false;
            if line.eq_ignore_ascii_case("yes") {
                game.reset();
            } else {
                writeln!(out, "reset cancelled")?;
            }
            render(&mut out, &game.view())?;
            continue;
        }

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            "show" => {}
            "json" => {
                writeln!(out, "{}", serde_json::to_string_pretty(&game.view())?)?;
                continue;
            }
            "reset" => {
                write!(out, "discard the current game? type yes to confirm: ")?;
                out.flush()?;
                confirming_reset = true;
                continue;
            }
            _ => {
                let applied = run(&mut game, line);
                if !applied {
                    writeln!(out, "(nothing to do: {})", line)?;
                }
            }
        }
        render(&mut out, &game.view())?;
    }

    Ok(())
}

/// Translate one input line into controller commands.
fn run(game: &mut Game, line: &str) -> bool {
    if let Some(name) = line.strip_prefix("add ") {
        return game.apply(Command::AddPlayer { name: name.to_string() }).is_applied();
    }
    if let Some(n) = line.strip_prefix("focus ") {
        let Some(player) = n
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| game.ledger().players().get(i))
            .map(|p| p.id())
        else {
            return false;
        };
        return game.apply(Command::Focus { player }).is_applied();
    }
    if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
        let mut any = false;
        for b in line.bytes() {
            any |= game.apply(Command::Digit { digit: b - b'0' }).is_applied();
        }
        return any;
    }

    let command = match line {
        "start" => Command::StartGame,
        "round" => Command::OpenRoundEntry,
        "c" => Command::Clear,
        "ok" => Command::ConfirmAndAdvance,
        "cancel" => Command::CancelEntry,
        "commit" => Command::Commit,
        _ => return false,
    };
    match game.apply(command) {
        Outcome::Committed(snapshot) if snapshot.status == Phase::Finished => {
            info!(round = snapshot.round, "final round committed");
            true
        }
        outcome => outcome.is_applied(),
    }
}

fn render(out: &mut impl Write, view: &GameView) -> io::Result<()> {
    writeln!(out)?;
    match view.phase {
        Phase::Setup => {
            writeln!(out, "== new game (goal {}) ==", view.goal)?;
            for (i, p) in view.players.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, p.name)?;
            }
            if view.can_start {
                writeln!(out, "type `start` when everyone is in")?;
            } else {
                writeln!(out, "add at least one player with `add NAME`")?;
            }
        }
        Phase::Active => {
            writeln!(out, "== round {} (goal {}) ==", view.round, view.goal)?;
            for entry in &view.ranking {
                let bar_len = view
                    .player(entry.id)
                    .map_or(0, |p| (p.progress * 20.0).round() as usize);
                writeln!(out, "  {:<12} {:>6}  {}", entry.name, entry.total, "#".repeat(bar_len))?;
            }
            match &view.entry {
                Some(entry) => {
                    writeln!(out, "-- scores for round {} --", entry.round)?;
                    for row in &entry.rows {
                        let marker = if row.focused { ">" } else { " " };
                        writeln!(out, " {} {:<12} {:>6}", marker, row.name, row.display)?;
                    }
                }
                None => writeln!(out, "type `round` to enter scores")?,
            }
        }
        Phase::Finished => {
            writeln!(out, "== final standings ==")?;
            for entry in &view.ranking {
                writeln!(out, "  {}. {:<12} {:>6}", entry.rank, entry.name, entry.total)?;
            }
            if !view.winners.is_empty() {
                writeln!(out, "winner: {}", view.winners.join(", "))?;
            }
            writeln!(out, "type `reset` for a new game")?;
        }
    }
    out.flush()
}
