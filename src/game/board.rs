pub const MAX_ROWS: usize = 6;
pub const MAX_COLUMNS: usize = 7;

/// Number of counters in a line needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CounterState {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
    /// Part of a winning line. Overwrites the owner once the game is decided.
    Winning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub state: CounterState,
}

impl Counter {
    pub fn new(state: CounterState) -> Self {
        Counter { state }
    }
}

/// Engine coordinates. Row 0 is the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Position { column, row }
    }
}

/// Unit step across the board. North has no entry: counters above the
/// landing position never exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 7] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (Δcolumn, Δrow)
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }
}

/// A stack of counters. Index 0 is the floor; counters are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    counters: Vec<Counter>,
}

impl Column {
    pub fn new() -> Self {
        Column {
            counters: Vec::with_capacity(MAX_ROWS),
        }
    }

    pub fn height(&self) -> usize {
        self.counters.len()
    }

    pub fn is_full(&self) -> bool {
        self.counters.len() >= MAX_ROWS
    }

    /// Push a counter on top. Does nothing when the column is full.
    pub fn add(&mut self, counter: Counter) {
        if self.is_full() {
            return;
        }
        self.counters.push(counter);
    }

    pub fn get(&self, row: usize) -> Option<&Counter> {
        self.counters.get(row)
    }

    fn get_mut(&mut self, row: usize) -> Option<&mut Counter> {
        self.counters.get_mut(row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [Column; MAX_COLUMNS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            columns: std::array::from_fn(|_| Column::new()),
        }
    }

    pub fn columns(&self) -> &[Column; MAX_COLUMNS] {
        &self.columns
    }

    /// Number of counters stacked in `column`.
    pub fn column_height(&self, column: usize) -> usize {
        self.columns[column].height()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.columns[column].is_full()
    }

    pub fn exists(&self, position: Position) -> bool {
        position.row < self.column_height(position.column)
    }

    /// Counter at `position`.
    ///
    /// # Panics
    /// If no counter has been placed there; check with [`Board::exists`].
    pub fn counter_at(&self, position: Position) -> &Counter {
        match self.columns[position.column].get(position.row) {
            Some(counter) => counter,
            None => panic!(
                "no counter at column {} row {}",
                position.column, position.row
            ),
        }
    }

    pub(crate) fn counter_at_mut(&mut self, position: Position) -> &mut Counter {
        match self.columns[position.column].get_mut(position.row) {
            Some(counter) => counter,
            None => panic!(
                "no counter at column {} row {}",
                position.column, position.row
            ),
        }
    }

    /// State at `position`, `Empty` when nothing has been placed there.
    pub fn status_at(&self, position: Position) -> CounterState {
        if !self.exists(position) {
            return CounterState::Empty;
        }
        self.counter_at(position).state
    }

    /// Drop a counter onto `column`. A full column is left untouched.
    pub fn add(&mut self, column: usize, counter: Counter) {
        self.columns[column].add(counter);
    }

    /// One step from `from` towards `direction`, or `None` past the edge.
    pub fn next_position(&self, from: Position, direction: Direction) -> Option<Position> {
        let (d_col, d_row) = direction.offset();
        let column = from.column.checked_add_signed(d_col)?;
        let row = from.row.checked_add_signed(d_row)?;
        if column >= MAX_COLUMNS || row >= MAX_ROWS {
            return None;
        }
        Some(Position { column, row })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
