use super::board::{Board, CounterState, Position, MAX_ROWS};

/// Presentation addressing: row 0 is the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresentationPosition {
    pub row: usize,
    pub column: usize,
}

impl PresentationPosition {
    pub fn new(row: usize, column: usize) -> Self {
        PresentationPosition { row, column }
    }
}

/// Map a presentation cell to engine coordinates.
pub fn to_engine(cell: PresentationPosition) -> Position {
    Position {
        column: cell.column,
        row: MAX_ROWS - 1 - cell.row,
    }
}

/// Map engine coordinates to a presentation cell.
pub fn to_presentation(position: Position) -> PresentationPosition {
    PresentationPosition {
        row: MAX_ROWS - 1 - position.row,
        column: position.column,
    }
}

impl From<PresentationPosition> for Position {
    fn from(cell: PresentationPosition) -> Self {
        to_engine(cell)
    }
}

impl From<Position> for PresentationPosition {
    fn from(position: Position) -> Self {
        to_presentation(position)
    }
}

impl Board {
    pub fn presentation_exists(&self, cell: PresentationPosition) -> bool {
        self.exists(to_engine(cell))
    }

    pub fn presentation_status(&self, cell: PresentationPosition) -> CounterState {
        self.status_at(to_engine(cell))
    }
}
