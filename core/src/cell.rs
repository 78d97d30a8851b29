use serde::{Deserialize, Serialize};

use crate::*;

/// Smallest cash value, in units of [`CASH_STEP`].
pub const CASH_MIN_UNITS: Amount = 10;
/// Largest cash value, in units of [`CASH_STEP`].
pub const CASH_MAX_UNITS: Amount = 59;
pub const CASH_STEP: Amount = 10;

/// Payload of a cash cell. Only values in `{100, 110, ..., 590}` can be built, deserializing
/// included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Amount", into = "Amount")]
pub struct Cash {
    value: Amount,
}

impl Cash {
    pub fn new(value: Amount) -> Result<Self> {
        let units = value / CASH_STEP;
        if value % CASH_STEP == 0 && (CASH_MIN_UNITS..=CASH_MAX_UNITS).contains(&units) {
            Ok(Self { value })
        } else {
            Err(GameError::InvalidCashValue)
        }
    }

    pub(crate) const fn from_units_unchecked(units: Amount) -> Self {
        Self {
            value: units * CASH_STEP,
        }
    }

    pub const fn value(self) -> Amount {
        self.value
    }
}

impl TryFrom<Amount> for Cash {
    type Error = GameError;

    fn try_from(value: Amount) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Cash> for Amount {
    fn from(cash: Cash) -> Self {
        cash.value
    }
}

/// What is hidden under a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Cash(Cash),
    Zero,
    Multiplier,
    Bomb,
}

impl CellContent {
    pub const fn kind(self) -> CellKind {
        match self {
            Self::Cash(_) => CellKind::Cash,
            Self::Zero => CellKind::Zero,
            Self::Multiplier => CellKind::Multiplier,
            Self::Bomb => CellKind::Bomb,
        }
    }
}

/// Payload-free discriminant of [`CellContent`], used for display and counting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Cash,
    Zero,
    Multiplier,
    Bomb,
}

impl CellKind {
    pub const ALL: [CellKind; 4] = [Self::Cash, Self::Zero, Self::Multiplier, Self::Bomb];

    /// Image shown on the front of a revealed card.
    pub const fn asset(self) -> &'static str {
        use CellKind::*;
        match self {
            Cash => "/static/image/Cash.png",
            Zero => "/static/image/zero.png",
            Multiplier => "/static/image/x2.png",
            Bomb => "/static/image/bomb.png",
        }
    }

    /// How many cells of this kind every grid holds.
    pub const fn count_per_grid(self) -> usize {
        use CellKind::*;
        match self {
            Cash => 5,
            Zero => 2,
            Multiplier => 1,
            Bomb => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    content: CellContent,
    revealed: bool,
}

impl Cell {
    pub const fn hidden(content: CellContent) -> Self {
        Self {
            content,
            revealed: false,
        }
    }

    pub const fn content(self) -> CellContent {
        self.content
    }

    pub const fn kind(self) -> CellKind {
        self.content.kind()
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    /// Returns `false` when the cell was already face up.
    pub(crate) fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.revealed, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_accepts_only_stepped_values_in_range() {
        assert_eq!(Cash::new(100).map(Cash::value), Ok(100));
        assert_eq!(Cash::new(590).map(Cash::value), Ok(590));
        assert_eq!(Cash::new(90), Err(GameError::InvalidCashValue));
        assert_eq!(Cash::new(600), Err(GameError::InvalidCashValue));
        assert_eq!(Cash::new(305), Err(GameError::InvalidCashValue));
        assert_eq!(Cash::new(0), Err(GameError::InvalidCashValue));
    }

    #[test]
    fn cash_deserializes_through_validation() {
        let cash: Cash = serde_json::from_str("450").unwrap();
        assert_eq!(cash.value(), 450);
        assert_eq!(serde_json::to_string(&cash).unwrap(), "450");

        assert!(serde_json::from_str::<Cash>("5").is_err());
        assert!(serde_json::from_str::<Cash>("455").is_err());
        assert!(serde_json::from_str::<Cash>("600").is_err());
    }

    #[test]
    fn reveal_reports_first_flip_only() {
        let mut cell = Cell::hidden(CellContent::Zero);

        assert!(cell.reveal());
        assert!(cell.is_revealed());
        assert!(!cell.reveal());
        assert!(cell.is_revealed());
    }

    #[test]
    fn every_kind_has_an_asset() {
        assert_eq!(CellKind::Cash.asset(), "/static/image/Cash.png");
        assert_eq!(CellKind::Multiplier.asset(), "/static/image/x2.png");
        assert!(CellKind::ALL.iter().all(|kind| kind.asset().ends_with(".png")));
    }

    #[test]
    fn kind_counts_fill_the_grid() {
        let total: usize = CellKind::ALL.iter().map(|kind| kind.count_per_grid()).sum();
        assert_eq!(total, GRID_LEN);
    }
}
