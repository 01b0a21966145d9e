use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

/// New board produced by [`open`], the previous snapshot is never touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenResult {
    pub board: Board,
    /// Tiles that went from unopened to open in this call, mines revealed by a loss included.
    pub opened: CellCount,
    pub outcome: RevealOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlagResult {
    pub board: Board,
    pub outcome: MarkOutcome,
}

/// Opens a hidden tile on a generated board.
///
/// Zero tiles cascade breadth-first: every unopened neighbor of a zero is opened, and zeros reached that way keep
/// expanding. A flag next to a zero is necessarily wrong, so the cascade opens flagged tiles too. Opening a mine opens
/// every other mine and reports [`RevealOutcome::HitMine`].
pub fn open(board: &Board, index: TileIndex) -> Result<OpenResult> {
    let index = board.validate_index(index)?;
    if !board.is_generated() {
        return Err(GameError::MinesNotPlaced);
    }

    if board[index].state() != TileState::Hidden {
        return Ok(OpenResult {
            board: board.clone(),
            opened: 0,
            outcome: RevealOutcome::NoChange,
        });
    }

    let mut next = board.clone();
    let opened_before = next.open_count();

    let outcome = match board[index].value() {
        TileValue::Mine => {
            next.set_state(index, TileState::Open);
            next.set_triggered_mine(index);
            reveal_mines(&mut next);
            log::debug!("Opened mine at {}", index);
            RevealOutcome::HitMine
        }
        TileValue::Count(count) => {
            next.set_state(index, TileState::Open);
            log::debug!("Open tile at {}, mine count: {}", index, count);

            if count == 0 {
                flood_fill(&mut next, index);
            }

            if next.hidden_or_flagged() == next.mine_total() {
                RevealOutcome::Won
            } else {
                RevealOutcome::Revealed
            }
        }
    };

    let opened = next.open_count() - opened_before;
    Ok(OpenResult {
        board: next,
        opened,
        outcome,
    })
}

/// Toggles a flag on an unopened tile. Open tiles are left alone.
pub fn toggle_flag(board: &Board, index: TileIndex) -> Result<FlagResult> {
    let index = board.validate_index(index)?;

    let next_state = match board[index].state() {
        TileState::Hidden => TileState::Flagged,
        TileState::Flagged => TileState::Hidden,
        TileState::Open => {
            return Ok(FlagResult {
                board: board.clone(),
                outcome: MarkOutcome::NoChange,
            });
        }
    };

    let mut next = board.clone();
    next.set_state(index, next_state);
    Ok(FlagResult {
        board: next,
        outcome: MarkOutcome::Changed,
    })
}

/// Opens every mine that is not open yet. Flags on safe tiles stay as they are.
pub fn reveal_mines(board: &mut Board) {
    for index in 0..board.tile_count() {
        if board[index].is_mine() {
            board.set_state(index, TileState::Open);
        }
    }
}

fn flood_fill(board: &mut Board, start: TileIndex) {
    let mut visited = BTreeSet::from([start]);
    let mut to_visit: VecDeque<_> = board
        .neighbors(start)
        .filter(|&pos| board[pos].state().is_unopened())
        .collect();
    log::trace!(
        "Starting flood-fill from {}, initial neighbors: {:?}",
        start,
        to_visit
    );

    while let Some(visit) = to_visit.pop_front() {
        if !visited.insert(visit) {
            continue;
        }

        let tile = board[visit];
        if tile.state() == TileState::Open {
            continue;
        }

        // unreachable with a consistent board, a zero never borders a mine
        let TileValue::Count(visit_count) = tile.value() else {
            continue;
        };

        board.set_state(visit, TileState::Open);
        log::trace!("Flood opened tile at {}, mine count: {}", visit, visit_count);

        if visit_count == 0 {
            to_visit.extend(
                board
                    .neighbors(visit)
                    .filter(|&pos| board[pos].state().is_unopened())
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }
}
