use std::sync::Arc;

use broadside::{
    generate_random_fleet, init_logging, opponent::HuntTargetStrategy, opponent_for, play_duel,
    ui, Action, Difficulty, EventSink, GameConfig, GameEvent, GameSession, GameStatus, Opponent,
    Seat, SessionSinks, SpecialMove, SpecialOutcome, TurnReport, METER_MAX,
};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer on the local machine.
    Local {
        #[arg(long, default_value_t = Difficulty::Hard)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Type your own shots instead of letting a hunt/target player stand in.
        #[arg(long)]
        interactive: bool,
    },
    /// Pit two difficulty tiers against each other over many games.
    Duel {
        #[arg(long)]
        first: Difficulty,
        #[arg(long)]
        second: Difficulty,
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            difficulty,
            seed,
            interactive,
        } => run_local(difficulty, seed, interactive).await,
        Commands::Duel {
            first,
            second,
            games,
            seed,
        } => run_duel(first, second, games, seed),
    }
}

async fn run_local(difficulty: Difficulty, seed: Option<u64>, interactive: bool) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    // nobody watches the meter fill when a player stands in
    let config = if interactive {
        GameConfig::new(difficulty)
    } else {
        GameConfig::new(difficulty).instant_meter()
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<GameEvent>();
    let reporter = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                GameEvent::StatsReady(result) => println!(
                    "Enemy fleet destroyed: {} hits in {} moves ({}%), {:.1}s",
                    result.hits(),
                    result.moves(),
                    result.percent_hits(),
                    result.duration().as_secs_f64()
                ),
                GameEvent::SpecialProgress { new, .. } if new == METER_MAX => {
                    println!("Special ability ready!")
                }
                other => debug!("{:?}", other),
            }
        }
    });

    let sink: Arc<dyn EventSink> = Arc::new(tx);
    let human_fleet = generate_random_fleet(&mut rng)?;
    let session_rng = SmallRng::from_rng(&mut rng);
    let mut session = GameSession::new(config, human_fleet, session_rng, SessionSinks::shared(sink))?;
    session.start();
    println!(
        "Playing against the {} computer ({})",
        difficulty,
        session.opponent_name()
    );

    if interactive {
        play_interactive(&mut session).await?;
    } else {
        play_stand_in(&mut session, &mut rng);
    }

    println!("Computer's fleet:\n{}", ui::render_board(session.ai_board(), true));
    println!("Your fleet:\n{}", ui::render_board(session.human_board(), true));
    match session.status() {
        GameStatus::Won => println!("You won!"),
        GameStatus::Lost => println!("You lost."),
        GameStatus::InProgress => println!("Game abandoned."),
    }

    // closing the boards' senders ends the reporter
    drop(session);
    reporter.await?;
    Ok(())
}

async fn play_interactive(session: &mut GameSession) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while session.status() == GameStatus::InProgress {
        println!("Computer's waters:\n{}", ui::render_board(session.ai_board(), false));
        println!("Your fleet:\n{}", ui::render_board(session.human_board(), true));
        println!("Special ability: {}%", session.ai_board().meter());
        println!("Target (e.g. C5), optionally followed by fire/nuke/strafe/reveal/second/shield:");

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match ui::parse_command(&line) {
            Ok((target, action)) => {
                let report = session.human_turn(target, action);
                describe(&report);
            }
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(())
}

fn describe(report: &TurnReport) {
    match &report.special {
        Some(SpecialOutcome::Salvo(shots)) => {
            let hits = shots.iter().filter(|(_, o)| o.is_hit()).count();
            println!("Salvo of {} shots, {} hits", shots.len(), hits);
        }
        Some(SpecialOutcome::Revealed(Some(kind))) => println!("Revealed the {}", kind.name()),
        Some(SpecialOutcome::Revealed(None)) => println!("Nothing left to reveal"),
        None => {}
    }
    if let Some(outcome) = report.shot {
        println!("Your shot: {}", outcome);
    }
    if let Some(outcome) = report.shield {
        println!("Shield: {}", outcome);
    }
    if let Some((coord, outcome)) = report.reply {
        println!("Computer fires at {}: {}", coord, outcome);
    }
}

/// A hunt/target player takes the human's seat and nukes whenever the
/// meter allows.
fn play_stand_in(session: &mut GameSession, rng: &mut SmallRng) {
    let mut player = HuntTargetStrategy::new();
    while session.status() == GameStatus::InProgress {
        let target = player.next_move(rng, session.ai_board());
        let action = if session.ai_board().can_make_shield_move() {
            Action::Special(SpecialMove::Nuke)
        } else {
            Action::Fire
        };
        let report = session.human_turn(target, action);
        if let Some(SpecialOutcome::Salvo(shots)) = &report.special {
            for &(coord, outcome) in shots {
                player.register_result(coord, outcome, session.ai_board());
            }
        }
        if let Some(outcome) = report.shot {
            player.register_result(target, outcome, session.ai_board());
        }
    }
    info!(
        "stand-in finished after {} moves",
        session.ai_board().move_count()
    );
}

fn run_duel(first: Difficulty, second: Difficulty, games: u32, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut first_wins = 0u32;
    let mut second_wins = 0u32;
    let mut draws = 0u32;
    let mut first_moves = 0u64;

    for _ in 0..games {
        let mut a = opponent_for(first);
        let mut b = opponent_for(second);
        let report = play_duel(a.as_mut(), b.as_mut(), &mut rng)?;
        first_moves += u64::from(report.first_moves);
        match report.winner {
            Some(Seat::First) => first_wins += 1,
            Some(Seat::Second) => second_wins += 1,
            None => draws += 1,
        }
    }

    println!("{} vs {} over {} games", first, second, games);
    println!("  {} wins: {}", first, first_wins);
    println!("  {} wins: {}", second, second_wins);
    if draws > 0 {
        println!("  unfinished: {}", draws);
    }
    if games > 0 {
        println!(
            "  {} averaged {:.1} shots per game",
            first,
            first_moves as f64 / f64::from(games)
        );
    }
    Ok(())
}
