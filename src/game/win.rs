//! Win detection around the most recently placed counter.

use super::board::{Board, CounterState, Direction, Position, WIN_LENGTH};

/// The four axes a winning line can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Vertical,
    Horizontal,
    /// Bottom-left to top-right, `/`
    RisingDiagonal,
    /// Top-left to bottom-right, `\`
    FallingDiagonal,
}

impl Line {
    pub const ALL: [Line; 4] = [
        Line::Vertical,
        Line::Horizontal,
        Line::RisingDiagonal,
        Line::FallingDiagonal,
    ];

    /// Directions walked out from the landing position. Vertical only looks
    /// down because nothing can sit above the newest counter.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Line::Vertical => &[Direction::South],
            Line::Horizontal => &[Direction::East, Direction::West],
            Line::RisingDiagonal => &[Direction::NorthEast, Direction::SouthWest],
            Line::FallingDiagonal => &[Direction::SouthEast, Direction::NorthWest],
        }
    }
}

impl Board {
    /// Consecutive `state` counters after `from` towards `direction`,
    /// not counting `from` itself.
    pub fn count_matching(
        &self,
        from: Position,
        direction: Direction,
        state: CounterState,
    ) -> usize {
        let mut count = 0;
        let mut current = from;
        while let Some(next) = self.next_position(current, direction) {
            if self.status_at(next) != state {
                break;
            }
            count += 1;
            current = next;
        }
        count
    }

    /// Every line through `landing` holding at least [`WIN_LENGTH`] counters of `state`.
    pub fn winning_lines(&self, landing: Position, state: CounterState) -> Vec<Line> {
        Line::ALL
            .into_iter()
            .filter(|line| {
                let neighbours: usize = line
                    .directions()
                    .iter()
                    .map(|&direction| self.count_matching(landing, direction, state))
                    .sum();
                neighbours >= WIN_LENGTH - 1
            })
            .collect()
    }

    /// Mark the landing counter and every run of `state` along `lines` as
    /// [`CounterState::Winning`]. Returns the marked positions, landing first.
    pub fn mark_winning(
        &mut self,
        landing: Position,
        state: CounterState,
        lines: &[Line],
    ) -> Vec<Position> {
        self.counter_at_mut(landing).state = CounterState::Winning;
        let mut marked = vec![landing];

        for line in lines {
            for &direction in line.directions() {
                let mut current = landing;
                while let Some(next) = self.next_position(current, direction) {
                    if self.status_at(next) != state {
                        break;
                    }
                    self.counter_at_mut(next).state = CounterState::Winning;
                    marked.push(next);
                    current = next;
                }
            }
        }

        marked
    }
}
