use std::io::{self, BufRead, Write as _};

use anyhow::{Context as _, bail};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use sequence_engine::{BOARD_SIZE, Board, Card, Game, Position};
use sequence_evaluator::{
    move_selector::{AiMoveSelector, SelectorConfig},
    session::SessionRunner,
};

use crate::{
    command::{AiArg, GameArg},
    model::seat::{self, SeatKind},
    view::text,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
    /// Seat kinds in seat order: human, heuristic or random
    ///
    /// Seats left out are heuristic. Without this option seat 1 is human.
    #[clap(long, value_delimiter = ',')]
    ai: Vec<SeatKind>,
    #[clap(flatten)]
    ai_arg: AiArg,
    /// Stop after this many turns
    #[clap(long, default_value_t = SessionRunner::DEFAULT_TURN_LIMIT)]
    turn_limit: usize,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            game: GameArg::default(),
            ai: Vec::new(),
            ai_arg: AiArg::default(),
            turn_limit: SessionRunner::DEFAULT_TURN_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub(crate) enum MoveInputError {
    #[display("enter a cell as \"x y\" or a card label such as 5h1")]
    Malformed,
    #[display("({x}, {y}) is off the board; both coordinates go from 1 to {BOARD_SIZE}")]
    OutOfRange { x: usize, y: usize },
    #[display("no cell shows {card}")]
    NoSuchLabel { card: Card },
}

/// Reads a human move: 1-based `x y`, or the exact label of a board cell.
pub(crate) fn parse_move(input: &str, board: &Board) -> Result<Position, MoveInputError> {
    let words = input.split_whitespace().collect::<Vec<_>>();
    match words.as_slice() {
        [x, y] => {
            let (Ok(x), Ok(y)) = (x.parse::<usize>(), y.parse::<usize>()) else {
                return Err(MoveInputError::Malformed);
            };
            let out_of_range = MoveInputError::OutOfRange { x, y };
            let (Some(x0), Some(y0)) = (x.checked_sub(1), y.checked_sub(1)) else {
                return Err(out_of_range);
            };
            Position::try_new(x0, y0).map_err(|_| out_of_range)
        }
        [label] => {
            let card = label
                .parse::<Card>()
                .map_err(|_| MoveInputError::Malformed)?;
            board
                .find_label(card)
                .ok_or(MoveInputError::NoSuchLabel { card })
        }
        _ => Err(MoveInputError::Malformed),
    }
}

enum Seat {
    Human,
    Ai(AiMoveSelector),
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game: game_arg,
        ai,
        ai_arg,
        turn_limit,
    } = arg;

    let kinds = seat::fill_seats(ai, game_arg.seats, SeatKind::Human)?;
    let config = ai_arg.selector_config()?;
    let mut rng = Pcg32::from_seed(game_arg.seed().to_bytes());
    let mut game = Game::with_rng(game_arg.seats, &mut rng)?;
    let mut seats = kinds
        .iter()
        .map(|kind| -> anyhow::Result<Seat> {
            match kind.fitness() {
                None => Ok(Seat::Human),
                Some(fitness) => {
                    let config = SelectorConfig { fitness, ..config };
                    Ok(Seat::Ai(AiMoveSelector::from_rng(config, &mut rng)?))
                }
            }
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut input = io::stdin().lock();
    while game.outcome().is_none() {
        if game.stats().turns() >= *turn_limit {
            println!("Turn limit of {turn_limit} reached");
            break;
        }
        let seat = game.current_player();
        let position = match &mut seats[seat] {
            Seat::Human => {
                println!("{}", text::render_board(game.board()));
                println!(
                    "{}",
                    text::render_hand(seat, game.current_team(), game.current_hand())
                );
                if game.legal_moves().is_empty() {
                    println!("Seat {} has no legal cell; the game cannot go on", seat + 1);
                    break;
                }
                read_human_move(&mut input, &game)?
            }
            Seat::Ai(selector) => match selector.select_move(&game) {
                Ok(choice) => choice.position,
                Err(error) => {
                    println!("{error}; the game cannot go on");
                    break;
                }
            },
        };
        let report = game.play_turn(position)?;
        for line in text::describe_report(&report) {
            println!("{line}");
        }
    }

    println!("{}", text::render_board(game.board()));
    let [first, second] = game.stats().scores();
    println!(
        "Sequences: Team 1 {first}, Team 2 {second} after {} turns",
        game.stats().turns()
    );
    Ok(())
}

/// Prompts until the player names a legal cell.
fn read_human_move<R>(input: &mut R, game: &Game) -> anyhow::Result<Position>
where
    R: BufRead,
{
    let mut line = String::new();
    loop {
        print!("Seat {} move (x y or card): ", game.current_player() + 1);
        io::stdout().flush().context("Failed to flush stdout")?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Failed to read a move from stdin")?;
        if read == 0 {
            bail!("input closed before the game ended");
        }

        let position = match parse_move(&line, game.board()) {
            Ok(position) => position,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };
        let check = game.classify(position);
        if check.legal {
            return Ok(position);
        }
        println!("Cannot play at {}: {}", text::cell_name(position), check.reason);
    }
}
