use std::path::PathBuf;

use sequence_engine::{Game, GameSnapshot};

use crate::{command::GameArg, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SnapshotArg {
    #[clap(flatten)]
    game: GameArg,
    /// Output file for the JSON snapshot (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SnapshotArg) -> anyhow::Result<()> {
    let SnapshotArg {
        game: game_arg,
        output,
    } = arg;

    let game = Game::with_seed(game_arg.seats, game_arg.seed())?;
    Output::save_json(&GameSnapshot::new(&game), output.clone())?;
    Ok(())
}
