//! # Reflekt CLI
//!
//! Developer driver for the puzzle engine: loads a level from JSON, places
//! mirrors given on the command line, traces the beam, and prints the board
//! with the lit trail plus the solved verdict.

use clap::Parser;
use log::info;
use reflekt::{illuminated_cells, GameState, Level, MirrorKind, Position, ReflektResult};
use std::str::FromStr;

/// Command line arguments for the Reflekt driver.
#[derive(Parser, Debug)]
#[command(name = "reflekt")]
#[command(about = "A grid-based light-reflection puzzle engine")]
#[command(version)]
struct Args {
    /// Path to a level JSON file
    level: std::path::PathBuf,

    /// Mirrors to place before tracing, as X,Y,K where K is / or \
    #[arg(short, long = "mirror", value_name = "X,Y,K")]
    mirrors: Vec<MirrorArg>,

    /// Print the beam path cell by cell
    #[arg(long)]
    trace: bool,
}

/// A mirror placement parsed from the command line.
#[derive(Debug, Clone, Copy)]
struct MirrorArg {
    position: Position,
    kind: MirrorKind,
}

impl FromStr for MirrorArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [x, y, kind] = parts.as_slice() else {
            return Err(format!("expected X,Y,K, got '{s}'"));
        };
        let x: i32 = x.trim().parse().map_err(|_| format!("bad x in '{s}'"))?;
        let y: i32 = y.trim().parse().map_err(|_| format!("bad y in '{s}'"))?;
        let kind = kind
            .trim()
            .chars()
            .next()
            .and_then(MirrorKind::from_char)
            .ok_or_else(|| format!("mirror kind must be / or \\ in '{s}'"))?;
        Ok(MirrorArg {
            position: Position::new(x, y),
            kind,
        })
    }
}

fn main() -> ReflektResult<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Reflekt v{}", reflekt::VERSION);

    let level = Level::from_file(&args.level)?;
    info!(
        "loaded level '{}' ({}x{}, difficulty {})",
        level.metadata().name,
        level.width(),
        level.height(),
        level.metadata().difficulty
    );

    let mut state = GameState::new(level);
    for mirror in &args.mirrors {
        if !state.add_mirror(mirror.position, mirror.kind) {
            println!(
                "rejected mirror '{}' at {}",
                mirror.kind.as_char(),
                mirror.position
            );
        }
    }

    let path = state.beam_path();
    let solved = state.check_completion();

    print_board(&state, &path);

    if args.trace {
        for cell in &path {
            println!("  {} {:?}", cell.position, cell.direction);
        }
    }
    println!(
        "beam: {} cells, mirrors: {}/{}, solved: {}",
        path.len(),
        state.mirror_count(),
        state.max_mirrors(),
        solved
    );

    if !solved && path.is_empty() {
        // Distinguish "beam blocked at the source" from a plain miss.
        println!("the beam is blocked before its first cell");
    }

    Ok(())
}

/// Prints the level as ASCII: walls `#`, lamp `L`, target `T`, mirrors as
/// their own characters, lit cells `*`, everything else `.`.
fn print_board(state: &GameState, path: &[reflekt::BeamCell]) {
    let level = state.level();
    let lit = illuminated_cells(Some(level), path);

    for y in 0..level.height() {
        let mut row = String::with_capacity(level.width() as usize);
        for x in 0..level.width() {
            let pos = Position::new(x, y);
            let ch = if pos == level.lamp().position {
                'L'
            } else if pos == level.target().position {
                'T'
            } else if let Some(mirror) = state.get_mirror(pos) {
                mirror.kind.as_char()
            } else if level.is_wall(pos) {
                '#'
            } else if lit.contains(&pos) {
                '*'
            } else {
                '.'
            };
            row.push(ch);
        }
        println!("{row}");
    }
}
