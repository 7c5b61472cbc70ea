use oxiblast_engine::{BOARD_SIZE, BlockTray, GameState, Position, TraySeed};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimArg {
    /// Number of games to play
    #[clap(long, default_value_t = 10)]
    games: usize,
    /// Seed for the whole batch (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<TraySeed>,
    /// Emit the report as JSON instead of a table
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct GameReport {
    seed: TraySeed,
    moves: usize,
    score: usize,
    cleared_lines: usize,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    seed: TraySeed,
    games: Vec<GameReport>,
}

pub(crate) fn run(arg: &SimArg) -> anyhow::Result<()> {
    let SimArg { games, seed, json } = arg;

    let batch_seed = (*seed).unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::from_seed(batch_seed.as_bytes());

    let games = (0..*games)
        .map(|_| {
            let game_seed: TraySeed = rng.random();
            play_random_game(game_seed, &mut rng)
        })
        .collect::<Vec<_>>();
    let report = BatchReport {
        seed: batch_seed,
        games,
    };

    if *json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Plays one game to completion, picking uniformly among the legal moves.
fn play_random_game<R>(game_seed: TraySeed, rng: &mut R) -> GameReport
where
    R: Rng,
{
    let mut state = GameState::with_seed(game_seed);
    let mut moves = 0;

    while !state.is_over() {
        let legal = (0..BlockTray::SLOTS)
            .flat_map(|slot| {
                (0..BOARD_SIZE).flat_map(move |row| {
                    (0..BOARD_SIZE).map(move |col| (slot, Position::new(row, col)))
                })
            })
            .filter(|&(slot, position)| state.can_place(slot, position))
            .collect::<Vec<_>>();
        // is_over guarantees at least one legal move exists
        let Some(&(slot, position)) = legal.choose(rng) else {
            break;
        };
        state = state.apply_move(slot, position);
        moves += 1;
    }

    GameReport {
        seed: game_seed,
        moves,
        score: state.score(),
        cleared_lines: state.scoring().total_cleared_lines(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn print_report(report: &BatchReport) {
    println!("batch seed: {}", report.seed);
    println!();
    println!("{:>34} {:>8} {:>8} {:>8}", "seed", "moves", "score", "lines");
    for game in &report.games {
        println!(
            "{:>34} {:>8} {:>8} {:>8}",
            game.seed.to_string(),
            game.moves,
            game.score,
            game.cleared_lines
        );
    }

    let num_games = report.games.len();
    if num_games == 0 {
        return;
    }
    let max_score = report.games.iter().map(|g| g.score).max().unwrap_or(0);
    let mean_score =
        report.games.iter().map(|g| g.score).sum::<usize>() as f64 / num_games as f64;
    let mean_moves =
        report.games.iter().map(|g| g.moves).sum::<usize>() as f64 / num_games as f64;
    println!();
    println!("games: {num_games}");
    println!("max score: {max_score}");
    println!("mean score: {mean_score:.1}");
    println!("mean moves: {mean_moves:.1}");
}
