//! Interactive terminal driver for the Waylode cell-state engine.
//!
//! A thin consumer: reads player commands from stdin, forwards them to a
//! [`GameEngine`], and renders the window the engine returns as an ASCII
//! grid. Nothing here touches game state directly.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use core_engine::{
    ActionError, CellId, EngineConfig, FileSlot, GameEngine, MemorySlot, SaveSlot, WindowView,
};

#[derive(Parser, Debug)]
#[command(name = "cli_play", about = "Walk the lattice, collect tokens, craft doubles")]
struct Args {
    /// Save file path.
    #[arg(long, default_value = "waylode_save.json")]
    save: PathBuf,

    /// Keep the session in memory only; nothing is written to disk.
    #[arg(long)]
    ephemeral: bool,

    /// Probability that an untouched cell spawns a token.
    #[arg(long, default_value_t = 0.1)]
    spawn_rate: f64,

    /// Chebyshev radius of the visible window.
    #[arg(long, default_value_t = 8)]
    view_radius: u32,

    /// Chebyshev radius within which cells can be activated.
    #[arg(long, default_value_t = 2)]
    interact_radius: u32,

    /// Inventory value that wins the game.
    #[arg(long, default_value_t = 64)]
    win_threshold: u32,

    /// Cell edge length in degrees, for `pos` commands.
    #[arg(long, default_value_t = 0.0005)]
    tile_size: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = EngineConfig {
        tile_size_deg: args.tile_size,
        spawn_rate: args.spawn_rate,
        view_radius: args.view_radius,
        interact_radius: args.interact_radius,
        win_threshold: args.win_threshold,
        ..EngineConfig::default()
    };

    let slot: Box<dyn SaveSlot> = if args.ephemeral {
        Box::new(MemorySlot::new())
    } else {
        Box::new(FileSlot::new(&args.save))
    };

    let mut engine = match GameEngine::new(config, slot) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    info!(target: "waylode::cli", "session ready");
    println!("waylode: reach {} to win. Type 'help' for commands.", args.win_threshold);
    draw(&engine);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("stdin error: {err}");
                break;
            }
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["q"] | ["exit"] => break,
            ["help"] | ["h"] => help(),
            ["look"] | ["l"] => draw(&engine),
            ["stats"] => stats(&engine),
            ["n"] => step(&mut engine, 1, 0),
            ["s"] => step(&mut engine, -1, 0),
            ["e"] => step(&mut engine, 0, 1),
            ["w"] => step(&mut engine, 0, -1),
            ["move", di, dj] => match (di.parse(), dj.parse()) {
                (Ok(di), Ok(dj)) => step(&mut engine, di, dj),
                _ => println!("usage: move <di> <dj>"),
            },
            ["pos", lat, lng] => match (lat.parse(), lng.parse()) {
                (Ok(lat), Ok(lng)) => {
                    if engine.update_position(lat, lng).is_some() {
                        draw(&engine);
                    } else {
                        println!("still in the same cell");
                    }
                }
                _ => println!("usage: pos <lat> <lng>"),
            },
            ["act", di, dj] | ["take", di, dj] | ["craft", di, dj] => {
                match (di.parse::<i64>(), dj.parse::<i64>()) {
                    (Ok(di), Ok(dj)) => {
                        let cell = engine.player().location.offset(di, dj);
                        activate(&mut engine, cell);
                    }
                    _ => println!("usage: act <di> <dj>  (offsets from your cell)"),
                }
            }
            ["reset"] => match engine.reset() {
                Ok(_) => {
                    println!("world reset.");
                    draw(&engine);
                }
                Err(err) => println!("reset done in memory, but: {err}"),
            },
            _ => println!("unknown command, try 'help'"),
        }
    }
}

fn help() {
    println!(
        "commands:\n  \
         move <di> <dj>   step by a grid offset (n/s/e/w for single steps)\n  \
         pos <lat> <lng>  jump via a geographic coordinate\n  \
         act <di> <dj>    pick up or craft at an offset from your cell\n  \
         look             redraw the window\n  \
         stats            session counters\n  \
         reset            wipe the world and the save\n  \
         quit             leave (progress is already saved)"
    );
}

fn step(engine: &mut GameEngine<Box<dyn SaveSlot>>, di: i64, dj: i64) {
    engine.move_by(di, dj);
    draw(engine);
}

fn activate(engine: &mut GameEngine<Box<dyn SaveSlot>>, cell: CellId) {
    match engine.activate(cell) {
        Ok(report) => {
            match report.inventory {
                Some(value) => println!("picked up {value}."),
                None => println!(
                    "crafted {} at {}.",
                    report.cell_token.unwrap_or_default(),
                    report.cell
                ),
            }
            if report.win {
                println!("*** you reached the target, you win! keep playing if you like ***");
            }
            if let Some(err) = report.save_error {
                println!("warning, progress not saved: {err}");
            }
            draw(engine);
        }
        Err(ActionError::OutOfRange(cell)) => println!("{cell} is too far away."),
        Err(ActionError::EmptyCell(cell)) => println!("nothing to pick up at {cell}."),
        Err(ActionError::Mismatch { held, found }) => {
            println!("can't merge your {held} with a {found}.");
        }
    }
}

fn stats(engine: &GameEngine<Box<dyn SaveSlot>>) {
    let metrics = engine.metrics();
    println!(
        "moves {}  pickups {}  crafts {}  rejected {}  saves {} (failed {})  overrides {}",
        metrics.moves,
        metrics.pickups,
        metrics.crafts,
        metrics.rejected_actions,
        metrics.saves,
        metrics.save_failures,
        engine.overrides().len()
    );
}

fn draw(engine: &GameEngine<Box<dyn SaveSlot>>) {
    let view = engine.window();
    println!("{}", render_window(view, engine.player().location));
    match engine.inventory() {
        Some(value) => println!("at {}  holding {value}", engine.player().location),
        None => println!("at {}  hands empty", engine.player().location),
    }
}

/// Lay the window out as rows of fixed-width cells, highest `i` on top.
/// Tokens in interaction range are bracketed; `@` marks the player.
fn render_window(view: &WindowView, player: CellId) -> String {
    let radius = i64::from(view.radius());
    let center = view.center();
    let mut out = String::new();

    for row in (-radius..=radius).rev() {
        for col in -radius..=radius {
            let cell = center.offset(row, col);
            let state = match view.get(cell) {
                Some(state) => state,
                None => continue,
            };
            let slot = if cell == player {
                "  @  ".to_string()
            } else {
                match (state.token, state.interactable) {
                    (Some(value), true) => format!("[{value:^3}]"),
                    (Some(value), false) => format!(" {value:^3} "),
                    (None, _) => "  .  ".to_string(),
                }
            };
            out.push_str(&slot);
        }
        out.push('\n');
    }
    out
}
