// Cell grid shared by the workbook reader/writer and the cleaning pass.
// Rows and columns are 1-indexed here, matching what the operator sees.

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet serial date-time (1900 system).
    DateTime(f64),
    /// Typed non-text value (error code, ISO duration) carried through verbatim.
    Literal(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// Dense rows × columns grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    cols: usize,
}

static EMPTY: Cell = Cell::Empty;

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from row vectors; ragged rows are padded with blanks.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(cols, Cell::Empty);
                row
            })
            .collect();
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at 1-indexed `(row, col)`; blank outside the extent.
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .unwrap_or(&EMPTY)
    }

    /// Set the cell at 1-indexed `(row, col)`, growing the grid as needed.
    /// Position 0 is not addressable and is ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row == 0 || col == 0 {
            return;
        }
        if col > self.cols {
            self.cols = col;
            for r in &mut self.rows {
                r.resize(col, Cell::Empty);
            }
        }
        while self.rows.len() < row {
            self.rows.push(vec![Cell::Empty; self.cols]);
        }
        self.rows[row - 1][col - 1] = cell;
    }

    /// Row-major iteration over every position, blanks included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| (r + 1, c + 1, cell))
        })
    }
}
