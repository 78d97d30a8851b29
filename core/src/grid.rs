use serde::{Deserialize, Serialize};

use crate::*;

/// The nine cards of a round, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Cell; GRID_LEN]", into = "[Cell; GRID_LEN]")]
pub struct Grid {
    cells: [Cell; GRID_LEN],
}

impl Grid {
    /// Builds a face-down grid from explicit contents, checking the fixed composition.
    pub fn from_contents(contents: [CellContent; GRID_LEN]) -> Result<Self> {
        let grid = Self {
            cells: contents.map(Cell::hidden),
        };
        grid.validate()?;
        Ok(grid)
    }

    pub(crate) fn from_cells_unchecked(cells: [Cell; GRID_LEN]) -> Self {
        Self { cells }
    }

    pub fn validate(&self) -> Result<()> {
        for kind in CellKind::ALL {
            if self.count_kind(kind) != kind.count_per_grid() {
                return Err(GameError::InvalidLayout);
            }
        }
        Ok(())
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<usize> {
        let index = usize::from(index);
        if index < self.cells.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    /// Card at `index`, `None` past the end of the grid.
    pub fn get(&self, index: CellIndex) -> Option<Cell> {
        self.cells.get(usize::from(index)).copied()
    }

    pub fn cells(&self) -> &[Cell; GRID_LEN] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.iter().filter(|cell| cell.kind() == kind).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_revealed()).count()
    }

    pub fn any_revealed(&self) -> bool {
        self.iter().any(Cell::is_revealed)
    }

    pub fn all_revealed(&self) -> bool {
        self.iter().all(Cell::is_revealed)
    }

    pub(crate) fn reveal_at(&mut self, index: usize) -> bool {
        self.cells[index].reveal()
    }

    pub(crate) fn reveal_all(&mut self) {
        for cell in &mut self.cells {
            cell.reveal();
        }
    }
}

impl TryFrom<[Cell; GRID_LEN]> for Grid {
    type Error = GameError;

    fn try_from(cells: [Cell; GRID_LEN]) -> Result<Self> {
        let grid = Self::from_cells_unchecked(cells);
        grid.validate()?;
        Ok(grid)
    }
}

impl From<Grid> for [Cell; GRID_LEN] {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Cash 300 at 0, multiplier at 1, cash 200 at 2, bomb at 3, zeros at 4 and 5.
    pub(crate) fn fixed_grid() -> Grid {
        use CellContent::*;
        let cash = |value| Cash(crate::Cash::new(value).unwrap());
        Grid::from_contents([
            cash(300),
            Multiplier,
            cash(200),
            Bomb,
            Zero,
            Zero,
            cash(100),
            cash(590),
            cash(450),
        ])
        .unwrap()
    }

    #[test]
    fn from_contents_starts_face_down() {
        let grid = fixed_grid();

        assert!(!grid.any_revealed());
        assert_eq!(grid.revealed_count(), 0);
        assert_eq!(grid.get(3).map(Cell::kind), Some(CellKind::Bomb));
    }

    #[test]
    fn from_contents_rejects_wrong_composition() {
        use CellContent::*;
        let cash = Cash(crate::Cash::new(100).unwrap());

        let two_bombs = [cash, cash, cash, cash, cash, Zero, Bomb, Multiplier, Bomb];
        assert_eq!(Grid::from_contents(two_bombs), Err(GameError::InvalidLayout));

        let no_multiplier = [cash, cash, cash, cash, cash, Zero, Zero, Zero, Bomb];
        assert_eq!(Grid::from_contents(no_multiplier), Err(GameError::InvalidLayout));
    }

    #[test]
    fn validate_index_checks_bounds() {
        let grid = fixed_grid();

        assert_eq!(grid.validate_index(8), Ok(8));
        assert_eq!(grid.validate_index(9), Err(GameError::InvalidIndex));
        assert_eq!(grid.get(9), None);
        assert_eq!(grid.get(CellIndex::MAX), None);
    }

    #[test]
    fn deserializing_checks_composition() {
        let grid = fixed_grid();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);

        // the multiplier card swapped for a second bomb
        let two_bombs = json.replacen("\"Multiplier\"", "\"Bomb\"", 1);
        assert_ne!(two_bombs, json);
        assert!(serde_json::from_str::<Grid>(&two_bombs).is_err());

        let eight_cells = serde_json::to_string(&grid.cells()[..8]).unwrap();
        assert!(serde_json::from_str::<Grid>(&eight_cells).is_err());
    }
}
