//! Plain-text rendering for the terminal.
//!
//! Coordinates are shown 1-based, matching what `play` reads back.

use std::fmt::Write as _;

use sequence_engine::{
    Axis, BOARD_SIZE, Board, DrawResult, GameOutcome, Hand, Position, Team, TurnAction, TurnReport,
};

const LABEL_WIDTH: usize = 3;

/// Token marker: `x` for team 1, `o` for team 2, upper case once locked.
fn marker(occupant: Option<Team>, locked: bool) -> char {
    let c = match occupant {
        None => return ' ',
        Some(Team::First) => 'x',
        Some(Team::Second) => 'o',
    };
    if locked { c.to_ascii_uppercase() } else { c }
}

#[must_use]
pub fn cell_name(pos: Position) -> String {
    format!("({}, {})", pos.x() + 1, pos.y() + 1)
}

/// Renders the board with `x` across and `y` down.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for x in 1..=BOARD_SIZE {
        write!(out, " {x:<width$}", width = LABEL_WIDTH + 1).unwrap();
    }
    out.push('\n');
    for y in 0..BOARD_SIZE {
        write!(out, "{:>2} ", y + 1).unwrap();
        for x in 0..BOARD_SIZE {
            let cell = board.cell(Position::new(x, y));
            let label = cell.label().to_string();
            let marker = marker(cell.occupant(), cell.is_locked());
            write!(out, " {label:<LABEL_WIDTH$}{marker}").unwrap();
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_hand(seat: usize, team: Team, hand: &Hand) -> String {
    let cards = hand
        .sorted_by_face()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    format!("Seat {} ({team}) hand: {}", seat + 1, cards.join(" "))
}

const fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Vertical => "column",
        Axis::Horizontal => "row",
        Axis::Diagonal => "diagonal",
        Axis::AntiDiagonal => "anti-diagonal",
    }
}

#[must_use]
pub fn describe_outcome(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Won { team } => format!("{team} wins"),
        GameOutcome::DeckExhausted => "No playable card left in the deck; nobody wins".to_owned(),
    }
}

/// One line per event of the turn.
#[must_use]
pub fn describe_report(report: &TurnReport) -> Vec<String> {
    let cell = cell_name(report.position);
    let mut lines = vec![match report.action {
        TurnAction::Placed { card } => {
            format!("Seat {} ({}) played {card} at {cell}", report.seat + 1, report.team)
        }
        TurnAction::PlacedWithJoker { card } => format!(
            "Seat {} ({}) played wild {card} at {cell}",
            report.seat + 1,
            report.team
        ),
        TurnAction::Removed { card } => format!(
            "Seat {} ({}) removed the token at {cell} with {card}",
            report.seat + 1,
            report.team
        ),
    }];
    for sequence in &report.sequences {
        lines.push(format!(
            "{} completed a sequence along the {} from {} to {}",
            sequence.team,
            axis_name(sequence.axis),
            cell_name(sequence.cells[0]),
            cell_name(sequence.cells[sequence.cells.len() - 1]),
        ));
    }
    match report.draw {
        DrawResult::Drew { card, cycled: 0 } => lines.push(format!("Drew {card}")),
        DrawResult::Drew { card, cycled } => lines.push(format!(
            "Drew {card} after sending {cycled} unplayable cards to the bottom"
        )),
        DrawResult::Exhausted { .. } => {}
    }
    match report.outcome {
        Some(outcome) => lines.push(describe_outcome(outcome)),
        None => lines.push(format!("Seat {} to play", report.next_player + 1)),
    }
    lines
}
