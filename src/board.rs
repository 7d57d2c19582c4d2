use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{HEIGHT, WIDTH, WIN_LENGTH};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    /// The side controlled by the search engine
    Engine,
    /// The side the engine plays against
    Opponent,
}

impl Player {
    /// Returns the other side
    pub fn opponent(self) -> Self {
        match self {
            Player::Engine => Player::Opponent,
            Player::Opponent => Player::Engine,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Engine,
    Opponent,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Engine => Cell::Engine,
            Player::Opponent => Cell::Opponent,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    EngineWin,
    OpponentWin,
    Draw,
}

/// A Connect 4 grid with incremental win detection
///
/// Row 0 is the bottom of the board, column 0 the leftmost column.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    num_moves: usize,
    // (player, row, column) of the most recent drop
    last_move: Option<(Player, usize, usize)>,
    state: GameState,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
            last_move: None,
            state: GameState::Playing,
        }
    }

    /// Builds a board from a string of 1-indexed column digits, the sides
    /// alternating from `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Player) -> Result<Self> {
        let mut board = Self::new();
        let mut player = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    // abort if the position is already decided
                    if board.is_terminal() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board.play_checked(column, player)?;
                    player = player.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Drops a tile for `player` into a 1-indexed column, validating the move
    pub fn play_checked(&mut self, column_one_indexed: usize, player: Player) -> Result<GameState> {
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }
        let column = column_one_indexed - 1;
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }
        self.play(column, player);

        Ok(self.state)
    }

    /// Drops a tile for `player` into a 0-indexed column
    ///
    /// The column must be playable.
    pub fn play(&mut self, column: usize, player: Player) {
        debug_assert!(self.playable(column));

        let row = self.heights[column];
        self.cells[column + WIDTH * row] = player.into();
        self.heights[column] += 1;
        self.num_moves += 1;
        self.last_move = Some((player, row, column));

        // a decided game stays decided
        if self.is_terminal() {
            return;
        }
        self.state = if self.check_win_at(row, column) {
            match player {
                Player::Engine => GameState::EngineWin,
                Player::Opponent => GameState::OpponentWin,
            }
        } else if self.num_moves == WIDTH * HEIGHT {
            GameState::Draw
        } else {
            GameState::Playing
        };
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The 0-indexed columns that can currently be played, left to right
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.playable(column))
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    pub fn row(&self, row: usize) -> [Cell; WIDTH] {
        let mut cells = [Cell::Empty; WIDTH];
        cells.copy_from_slice(&self.cells[WIDTH * row..WIDTH * (row + 1)]);
        cells
    }

    pub fn column(&self, column: usize) -> [Cell; HEIGHT] {
        let mut cells = [Cell::Empty; HEIGHT];
        for (row, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(row, column);
        }
        cells
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state != GameState::Playing
    }

    pub fn is_draw(&self) -> bool {
        self.state == GameState::Draw
    }

    pub fn winner(&self) -> Option<Player> {
        match self.state {
            GameState::EngineWin => Some(Player::Engine),
            GameState::OpponentWin => Some(Player::Opponent),
            _ => None,
        }
    }

    pub fn last_move(&self) -> Option<(Player, usize, usize)> {
        self.last_move
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    // only lines through the tile just placed can have been completed
    fn check_win_at(&self, row: usize, column: usize) -> bool {
        let player = self.cell(row, column);

        // horizontal, vertical and both diagonals
        for &(dx, dy) in [(1i32, 0i32), (0, 1), (1, 1), (1, -1)].iter() {
            let mut run = 1;
            for &sign in [-1i32, 1].iter() {
                let mut x = column as i32 + sign * dx;
                let mut y = row as i32 + sign * dy;
                while x >= 0
                    && x < WIDTH as i32
                    && y >= 0
                    && y < HEIGHT as i32
                    && self.cell(y as usize, x as usize) == player
                {
                    run += 1;
                    x += sign * dx;
                    y += sign * dy;
                }
            }
            if run >= WIN_LENGTH {
                return true;
            }
        }

        false
    }

    pub fn clear_screen() -> Result<()> {
        let mut stdout = stdout();
        stdout.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        stdout.flush()?;
        Ok(())
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        for row in (0..HEIGHT).rev() {
            for cell in self.row(row).iter() {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::Engine => Color::Yellow,
                            Cell::Opponent => Color::Red,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            let line: String = self
                .row(row)
                .iter()
                .map(|cell| match cell {
                    Cell::Engine => 'O',
                    Cell::Opponent => 'X',
                    Cell::Empty => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
