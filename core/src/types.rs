/// Position of a cell in the grid, row-major.
pub type CellIndex = u8;

/// Single coordinate axis used for grid width and height.
pub type Coord = u8;

/// Two-dimensional size `(columns, rows)`.
pub type Coord2 = (Coord, Coord);

/// Money amounts and the running multiplier.
pub type Amount = u64;

pub const GRID_SIZE: Coord2 = (3, 3);

pub const GRID_LEN: usize = GRID_SIZE.0 as usize * GRID_SIZE.1 as usize;
