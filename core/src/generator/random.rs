use rand::Rng;
use rand::seq::SliceRandom;

use super::*;

/// Deals a fresh grid: five random cash cards, two zeros, one x2 and one bomb, shuffled with
/// Fisher-Yates so every ordering is equally likely.
pub fn generate_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    let mut cells = [Cell::hidden(CellContent::Zero); GRID_LEN];
    for cell in &mut cells[..CellKind::Cash.count_per_grid()] {
        let units: Amount = rng.random_range(CASH_MIN_UNITS..=CASH_MAX_UNITS);
        *cell = Cell::hidden(CellContent::Cash(Cash::from_units_unchecked(units)));
    }
    // slots 5 and 6 keep their zeros
    cells[7] = Cell::hidden(CellContent::Multiplier);
    cells[8] = Cell::hidden(CellContent::Bomb);

    cells.shuffle(rng);

    let grid = Grid::from_cells_unchecked(cells);
    log::trace!("Dealt grid: {:?}", grid);
    grid
}

/// Purely random generation from a fixed seed, same seed deals the same grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self) -> Grid {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        log::debug!("Generating grid from seed {}", self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let grid = generate_grid(&mut rng);

        if let Err(err) = grid.validate() {
            log::warn!("Generated grid failed validation: {}", err);
        }
        grid
    }
}
