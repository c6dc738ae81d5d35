use std::fmt;

use thiserror::Error;

use super::Coordinate;

/// Reference maze shipped with the binary (8 rows x 12 columns).
///
/// `#` is a wall, a blank is open floor, `A`/`B` mark start and end, and
/// anything else is a label drawn as-is.
pub const DEFAULT_MAZE: &[&[&str]] = &[
    &["8", "#", "9", "#", "11", "#", "#", "#", "18", "19", "#", "B"],
    &[" ", "#", " ", "#", "10", "12", "13", "#", " ", "#", "#", " "],
    &["6", "5", "7", "#", " ", "#", "14", " ", "17", "#", "#", " "],
    &["#", " ", "#", "#", " ", "#", " ", "#", " ", "#", "#", " "],
    &["#", "3", " ", "2", "4", "#", " ", "#", "20", " ", " ", "21"],
    &["#", "#", "#", " ", "#", "#", " ", "#", "#", "#", "#", "#"],
    &[" ", " ", " ", " ", "#", "#", " ", " ", " ", " ", " ", " "],
    &["A", " ", " ", "1", "#", "#", "15", " ", " ", " ", " ", "16"],
];

/// Start position of [`DEFAULT_MAZE`]
pub const DEFAULT_START: Coordinate = Coordinate::new(7, 0);

/// End position of [`DEFAULT_MAZE`]
pub const DEFAULT_END: Coordinate = Coordinate::new(0, 11);

/// Classification of a single maze cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Open,
    Labeled(String),
    Start,
    End,
}

impl CellKind {
    /// Classify a configuration label. Start/end markers are plain floor here;
    /// the configured positions decide where `Start` and `End` go.
    fn from_label(label: &str) -> Self {
        match label.trim() {
            "#" => CellKind::Wall,
            "" | "A" | "B" => CellKind::Open,
            other => CellKind::Labeled(other.to_string()),
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, CellKind::Wall)
    }
}

/// Grid construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Maze has no cells")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{marker} position {coord} is outside the maze")]
    MarkerOutOfBounds {
        marker: &'static str,
        coord: Coordinate,
    },
    #[error("Start and end share position {0}")]
    MarkersCoincide(Coordinate),
}

/// Immutable rectangular maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    start: Coordinate,
    end: Coordinate,
}

impl Grid {
    /// Build a grid from a table of cell labels plus fixed start/end positions.
    pub fn from_labels<R, S>(rows: &[R], start: Coordinate, end: Coordinate) -> Result<Self, GridError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::RaggedRow {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|label| CellKind::from_label(label.as_ref())));
        }

        let mut grid = Self {
            rows: rows.len(),
            cols,
            cells,
            start,
            end,
        };

        if start == end {
            return Err(GridError::MarkersCoincide(start));
        }
        let start_idx = grid.index(start).ok_or(GridError::MarkerOutOfBounds {
            marker: "Start",
            coord: start,
        })?;
        let end_idx = grid.index(end).ok_or(GridError::MarkerOutOfBounds {
            marker: "End",
            coord: end,
        })?;
        grid.cells[start_idx] = CellKind::Start;
        grid.cells[end_idx] = CellKind::End;

        Ok(grid)
    }

    /// The bundled reference maze
    pub fn default_maze() -> Self {
        // DEFAULT_MAZE is rectangular and both markers are in bounds
        Self::from_labels(DEFAULT_MAZE, DEFAULT_START, DEFAULT_END)
            .unwrap_or_else(|e| unreachable!("bundled maze is invalid: {e}"))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Whether `coord` lies inside the grid
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.index(coord).is_some()
    }

    /// Cell kind at `coord`, or `None` when it falls outside the grid.
    pub fn get(&self, coord: Coordinate) -> Option<&CellKind> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Iterate every coordinate in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).map(move |c| Coordinate::new(r as i64, c as i64))
        })
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                let text = match cell {
                    CellKind::Wall => "###",
                    CellKind::Open => "   ",
                    CellKind::Start => " A ",
                    CellKind::End => " B ",
                    CellKind::Labeled(label) => {
                        write!(f, "{:^3}", label)?;
                        continue;
                    }
                };
                f.write_str(text)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
