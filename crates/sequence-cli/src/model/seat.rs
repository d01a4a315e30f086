use sequence_evaluator::fitness::FitnessKind;
use serde::Serialize;

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::FromStr)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    Human,
    Heuristic,
    Random,
}

impl SeatKind {
    /// Fitness function of a computer seat, `None` for a human.
    #[must_use]
    pub const fn fitness(self) -> Option<FitnessKind> {
        match self {
            Self::Human => None,
            Self::Heuristic => Some(FitnessKind::Heuristic),
            Self::Random => Some(FitnessKind::Random),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeatListError {
    #[display("{given} seat kinds given for a {seats}-seat table")]
    TooMany { given: usize, seats: usize },
    #[display("seat {seat} is human, but this mode only runs computer seats")]
    HumanNotAllowed { seat: usize },
}

/// Expands the `--ai` list to one kind per seat.
///
/// An empty list starts with `first`; seats not covered by the list are
/// heuristic.
pub fn fill_seats(
    given: &[SeatKind],
    seats: usize,
    first: SeatKind,
) -> Result<Vec<SeatKind>, SeatListError> {
    if given.len() > seats {
        return Err(SeatListError::TooMany {
            given: given.len(),
            seats,
        });
    }
    let mut kinds = if given.is_empty() {
        vec![first]
    } else {
        given.to_vec()
    };
    kinds.resize(seats, SeatKind::Heuristic);
    Ok(kinds)
}

pub fn reject_humans(kinds: &[SeatKind]) -> Result<(), SeatListError> {
    match kinds.iter().position(|&kind| kind == SeatKind::Human) {
        Some(seat) => Err(SeatListError::HumanNotAllowed { seat }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("human".parse::<SeatKind>().unwrap(), SeatKind::Human);
        assert_eq!("Heuristic".parse::<SeatKind>().unwrap(), SeatKind::Heuristic);
        assert_eq!("random".parse::<SeatKind>().unwrap(), SeatKind::Random);
        assert!("greedy".parse::<SeatKind>().is_err());
    }

    #[test]
    fn test_fill_defaults() {
        assert_eq!(
            fill_seats(&[], 4, SeatKind::Human).unwrap(),
            [
                SeatKind::Human,
                SeatKind::Heuristic,
                SeatKind::Heuristic,
                SeatKind::Heuristic
            ]
        );
        assert_eq!(
            fill_seats(&[SeatKind::Random], 2, SeatKind::Human).unwrap(),
            [SeatKind::Random, SeatKind::Heuristic]
        );
    }

    #[test]
    fn test_fill_rejects_extra_kinds() {
        let err = fill_seats(&[SeatKind::Random; 3], 2, SeatKind::Heuristic).unwrap_err();
        assert_eq!(err, SeatListError::TooMany { given: 3, seats: 2 });
    }

    #[test]
    fn test_reject_humans() {
        assert!(reject_humans(&[SeatKind::Random, SeatKind::Heuristic]).is_ok());
        assert_eq!(
            reject_humans(&[SeatKind::Random, SeatKind::Human]),
            Err(SeatListError::HumanNotAllowed { seat: 1 })
        );
    }

    #[test]
    fn test_fitness_mapping() {
        assert_eq!(SeatKind::Human.fitness(), None);
        assert_eq!(SeatKind::Random.fitness(), Some(FitnessKind::Random));
    }
}
