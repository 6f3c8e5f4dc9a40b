use crate::engine::{GameState, Player};
use crate::logic::board::{Board, Cell, HEIGHT, WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    IllegalAction(Cell),
}

/// One ply of knight's Isolation.
///
/// Each player owns a token that moves like a chess knight. The cell a token
/// lands on is closed for the rest of the game; a player with no open jump
/// on their turn loses. Before a token is placed, its first move may go to
/// any open cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isolation {
    pub board: Board,
    pub ply_count: u32,
    pub locs: [Option<Cell>; 2],
}

impl Default for Isolation {
    fn default() -> Self {
        Self::new()
    }
}

impl Isolation {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            ply_count: 0,
            locs: [None, None],
        }
    }

    /// Position with an explicit set of open cells. Token cells are closed
    /// whether or not they appear in `open`.
    pub fn custom(
        open: impl IntoIterator<Item = Cell>,
        locs: [Option<Cell>; 2],
        ply_count: u32,
    ) -> Self {
        let board = locs
            .iter()
            .flatten()
            .fold(Board::from_open_cells(open), |board, &cell| {
                board.with_closed(cell)
            });
        Self {
            board,
            ply_count,
            locs,
        }
    }

    #[must_use]
    pub const fn player(&self) -> Player {
        Player::to_move(self.ply_count)
    }

    #[must_use]
    pub fn has_liberties(&self, player: Player) -> bool {
        match self.location(player) {
            Some(cell) => self.board.open_neighbors(cell).next().is_some(),
            None => self.board.count_open() > 0,
        }
    }

    /// Checked version of `result` for moves coming from untrusted players.
    pub fn apply(&self, action: Cell) -> Result<Self, MoveError> {
        if self.terminal_test() {
            return Err(MoveError::GameOver);
        }
        if !self.actions().contains(&action) {
            return Err(MoveError::IllegalAction(action));
        }
        Ok(self.result(action))
    }

    /// Winner of a finished game.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.terminal_test().then(|| self.player().opponent())
    }

    fn location(&self, player: Player) -> Option<Cell> {
        self.locs.get(player.index()).copied().flatten()
    }
}

impl GameState for Isolation {
    type Action = Cell;

    fn actions(&self) -> Vec<Cell> {
        self.liberties(self.location(self.player()))
    }

    fn result(&self, action: Cell) -> Self {
        let mut locs = self.locs;
        if let Some(slot) = locs.get_mut(self.player().index()) {
            *slot = Some(action);
        }
        Self {
            board: self.board.with_closed(action),
            ply_count: self.ply_count + 1,
            locs,
        }
    }

    fn terminal_test(&self) -> bool {
        !self.has_liberties(self.player())
    }

    fn utility(&self, player: Player) -> f64 {
        if !self.terminal_test() {
            return 0.0;
        }
        if player == self.player() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    fn loc(&self, player: Player) -> Option<Cell> {
        self.location(player)
    }

    fn liberties(&self, loc: Option<Cell>) -> Vec<Cell> {
        match loc {
            Some(cell) => self.board.open_neighbors(cell).collect(),
            None => self.board.open_cells().collect(),
        }
    }

    fn ply_count(&self) -> u32 {
        self.ply_count
    }
}

impl fmt::Display for Isolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..HEIGHT).rev() {
            for x in 0..WIDTH {
                let cell = Cell::new(x, y);
                let symbol = match cell {
                    Some(c) if self.location(Player::First) == Some(c) => '1',
                    Some(c) if self.location(Player::Second) == Some(c) => '2',
                    Some(c) if self.board.is_open(c) => '.',
                    _ => '#',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
