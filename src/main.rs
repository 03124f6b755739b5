#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use fleetwar::{
    init_logging, place_fleet_randomly, Board, FleetError, Player, TargetingAgent, TurnState,
    FLEET,
};
#[cfg(feature = "std")]
use log::{debug, warn};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde_json::json;

/// Fresh fleets generated before a game is abandoned.
#[cfg(feature = "std")]
const FLEET_RETRIES: usize = 10;

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "std")]
#[derive(Subcommand)]
enum Commands {
    /// Play one computer-versus-computer game and print both boards.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play many computer-versus-computer games and print JSON statistics.
    Sim {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible runs")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
struct Outcome {
    winner: Player,
    shots: [usize; 2],
    boards: [Board; 2],
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// Deploy the canonical fleet, starting over from an empty board whenever
/// the generator gives up.
#[cfg(feature = "std")]
fn deploy(board: &mut Board, rng: &mut SmallRng) -> anyhow::Result<()> {
    for attempt in 1..=FLEET_RETRIES {
        match place_fleet_randomly(board, &FLEET, rng) {
            Ok(_) => return Ok(()),
            Err(e @ FleetError::Rejected { .. }) => return Err(e.into()),
            Err(e) => warn!("fleet attempt {attempt} failed: {e}"),
        }
    }
    anyhow::bail!("could not deploy fleet after {FLEET_RETRIES} attempts")
}

#[cfg(feature = "std")]
fn play(rng: &mut SmallRng) -> anyhow::Result<Outcome> {
    let mut boards = [Board::standard(), Board::standard()];
    for board in boards.iter_mut() {
        deploy(board, rng)?;
    }
    let mut agents = [TargetingAgent::new(), TargetingAgent::new()];
    let mut shots = [0usize; 2];
    let mut state = TurnState::first_turn();

    while let Some(attacker) = state.current() {
        let defender = &mut boards[attacker.opponent().index()];
        let shot = agents[attacker.index()].take_turn(defender, rng)?;
        shots[attacker.index()] += 1;
        debug!("{:?} fires at {}: {:?}", attacker, shot.coord, shot.report.outcome);
        state = state.after_attack(&shot.report, defender.all_ships_sunk());
    }

    let winner = state
        .winner()
        .ok_or_else(|| anyhow::anyhow!("game ended without a winner"))?;
    Ok(Outcome {
        winner,
        shots,
        boards,
    })
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = seeded_rng(seed);
            let outcome = play(&mut rng)?;
            for player in [Player::One, Player::Two] {
                println!("\n{:?} fleet ({} shots fired):", player, outcome.shots[player.index()]);
                println!("{}", outcome.boards[player.index()]);
            }
            println!("\n{:?} wins", outcome.winner);
        }
        Commands::Sim { games, seed } => {
            let mut rng = seeded_rng(seed);
            let mut wins = [0usize; 2];
            let mut winning_shots = Vec::with_capacity(games);
            for _ in 0..games {
                let outcome = play(&mut rng)?;
                wins[outcome.winner.index()] += 1;
                winning_shots.push(outcome.shots[outcome.winner.index()]);
            }
            let average = if winning_shots.is_empty() {
                0.0
            } else {
                winning_shots.iter().sum::<usize>() as f64 / winning_shots.len() as f64
            };
            let result = json!({
                "games": games,
                "wins": { "player1": wins[0], "player2": wins[1] },
                "winning_shots": {
                    "average": average,
                    "min": winning_shots.iter().min(),
                    "max": winning_shots.iter().max(),
                },
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}
