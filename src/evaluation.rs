//! Static scoring of board positions from the engine's point of view

use crate::{
    board::{Board, Cell, Player},
    HEIGHT, WIDTH, WIN_LENGTH,
};

/// The score of a position the engine has won, above any heuristic score
pub const WIN_SCORE: i32 = i32::MAX;
/// The score of a position the opponent has won, below any heuristic score
pub const LOSS_SCORE: i32 = i32::MIN;

/// Value of a single tile inside a window
const TILE_WEIGHT: i32 = 2;
/// Value of a window holding `WIN_LENGTH - 1` tiles of one side and a gap
const OPEN_THREE_WEIGHT: i32 = 1000;
/// Extra value of each tile in the center column
const CENTER_WEIGHT: i32 = 3;

/// The column that takes part in the most alignments
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// Column/row steps of the four alignment directions: horizontal,
/// vertical, diagonal / and diagonal \
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Scores a position, higher being better for the engine
///
/// Decided positions score [`WIN_SCORE`], [`LOSS_SCORE`] or 0 for a draw.
/// Undecided positions add up the contribution of every window of
/// `WIN_LENGTH` cells on the board, then weight the center column again.
pub fn evaluate(board: &Board) -> i32 {
    if board.is_draw() {
        return 0;
    }
    match board.winner() {
        Some(Player::Engine) => return WIN_SCORE,
        Some(Player::Opponent) => return LOSS_SCORE,
        None => (),
    }

    let mut score = 0;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            for &(dx, dy) in DIRECTIONS.iter() {
                if let Some(window) = window(board, row, column, dx, dy) {
                    score += score_window(&window);
                }
            }
        }
    }

    for cell in board.column(CENTER_COLUMN).iter() {
        match cell {
            Cell::Engine => score += CENTER_WEIGHT,
            Cell::Opponent => score -= CENTER_WEIGHT,
            Cell::Empty => (),
        }
    }

    score
}

// the window starting at (row, column) heading along (dx, dy), if it fits on the board
fn window(board: &Board, row: usize, column: usize, dx: i32, dy: i32) -> Option<[Cell; WIN_LENGTH]> {
    let last_x = column as i32 + dx * (WIN_LENGTH as i32 - 1);
    let last_y = row as i32 + dy * (WIN_LENGTH as i32 - 1);
    if last_x < 0 || last_x >= WIDTH as i32 || last_y < 0 || last_y >= HEIGHT as i32 {
        return None;
    }

    let mut cells = [Cell::Empty; WIN_LENGTH];
    for (i, cell) in cells.iter_mut().enumerate() {
        let x = column as i32 + dx * i as i32;
        let y = row as i32 + dy * i as i32;
        *cell = board.cell(y as usize, x as usize);
    }
    Some(cells)
}

/// Scores the tiles of a single window
///
/// Mixed windows can never be completed but still count tile for tile.
pub fn score_window(window: &[Cell]) -> i32 {
    let engine = window.iter().filter(|&&c| c == Cell::Engine).count();
    let opponent = window.iter().filter(|&&c| c == Cell::Opponent).count();
    let empty = window.len() - engine - opponent;

    let mut score = TILE_WEIGHT * engine as i32 - TILE_WEIGHT * opponent as i32;

    if empty == 1 {
        if engine == WIN_LENGTH - 1 {
            score += OPEN_THREE_WEIGHT;
        } else if opponent == WIN_LENGTH - 1 {
            score -= OPEN_THREE_WEIGHT;
        }
    }

    score
}
