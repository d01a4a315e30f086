use std::path::PathBuf;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use sequence_engine::{Game, GameSeed, Team};
use sequence_evaluator::{
    move_selector::{AiMoveSelector, SelectorConfig},
    session::SessionRunner,
};

use crate::{
    command::{AiArg, GameArg},
    model::{
        seat::{self, SeatKind},
        summary::{GameSummary, SimulationSummary},
    },
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    game: GameArg,
    /// Seat kinds in seat order: heuristic or random (default: all heuristic)
    #[clap(long, value_delimiter = ',')]
    ai: Vec<SeatKind>,
    #[clap(flatten)]
    ai_arg: AiArg,
    /// Number of games to play
    #[clap(long, default_value_t = 10)]
    games: usize,
    /// Turns after which a game is abandoned
    #[clap(long, default_value_t = SessionRunner::DEFAULT_TURN_LIMIT)]
    turn_limit: usize,
    /// Output file for the JSON summary (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        game: game_arg,
        ai,
        ai_arg,
        games,
        turn_limit,
        output,
    } = arg;

    let kinds = seat::fill_seats(ai, game_arg.seats, SeatKind::Heuristic)?;
    seat::reject_humans(&kinds)?;
    let config = ai_arg.selector_config()?;
    let runner = SessionRunner::new(*turn_limit);

    // every game gets its own seed so any of them can be replayed alone
    let mut master = Pcg32::from_seed(game_arg.seed().to_bytes());
    let mut summaries = Vec::with_capacity(*games);
    for i in 0..*games {
        let seed = master.random::<GameSeed>();
        let summary = play_one(seed, game_arg.seats, &kinds, config, runner)?;
        eprintln!(
            "Game {}/{games}: {:?} after {} turns, sequences {:?}",
            i + 1,
            summary.outcome,
            summary.turns,
            summary.scores
        );
        summaries.push(summary);
    }

    let summary = SimulationSummary::new(kinds, config, *turn_limit, summaries);
    eprintln!(
        "{} games. Wins: Team 1 {}, Team 2 {}; deck exhausted {}; stalled {}; turn limit {}",
        summary.totals.games(),
        summary.totals.wins(Team::First),
        summary.totals.wins(Team::Second),
        summary.totals.deck_exhausted,
        summary.totals.stalled,
        summary.totals.turn_limit
    );
    Output::save_json(&summary, output.clone())?;
    Ok(())
}

fn play_one(
    seed: GameSeed,
    seats: usize,
    kinds: &[SeatKind],
    config: SelectorConfig,
    runner: SessionRunner,
) -> anyhow::Result<GameSummary> {
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    let mut game = Game::with_rng(seats, &mut rng)?;
    let mut selectors = kinds
        .iter()
        .filter_map(|kind| kind.fitness())
        .map(|fitness| AiMoveSelector::from_rng(SelectorConfig { fitness, ..config }, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    let result = runner.play(&mut game, &mut selectors);
    Ok(GameSummary::new(seed, &result))
}
