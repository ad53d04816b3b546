use broadside::{opponent_for, play_seeded_duel, Difficulty, Seat};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Hard against Hard: `seed1` places the first fleet and drives the first
/// player, `seed2` the second.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);
    let mut p1 = opponent_for(Difficulty::Hard);
    let mut p2 = opponent_for(Difficulty::Hard);
    let report = play_seeded_duel(p1.as_mut(), p2.as_mut(), &mut rng1, &mut rng2)?;

    let winner = match report.winner {
        Some(Seat::First) => Some("player1"),
        Some(Seat::Second) => Some("player2"),
        None => None,
    };
    let result = json!({
        "player1": {"moves": report.first_moves, "hits": report.first_hits, "sunk": report.first_sunk},
        "player2": {"moves": report.second_moves, "hits": report.second_hits, "sunk": report.second_sunk},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
