use super::Coordinate;

/// A full-length line of a square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

impl Line {
    /// All lines that can win on a `size × size` board: rows, columns, then
    /// the two main diagonals.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// The `size` coordinates of this line, in order.
    pub fn cells(self, size: usize) -> impl Iterator<Item = Coordinate> {
        (0..size).map(move |i| match self {
            Line::Row(y) => (i, y),
            Line::Column(x) => (x, i),
            Line::Diagonal => (i, i),
            Line::AntiDiagonal => (size - 1 - i, i),
        })
    }
}
