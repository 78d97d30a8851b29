use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No card turned yet
    Ready,
    Active,
    /// Player cashed out
    Claimed,
    /// Player turned the bomb
    Busted,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Claimed | Self::Busted)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One round of the game: the dealt grid plus the running balance and multiplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    grid: Grid,
    balance: Saturating<Amount>,
    multiplier: Saturating<Amount>,
    state: SessionState,
    triggered_bomb: Option<CellIndex>,
}

impl Session {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            balance: Saturating(0),
            multiplier: Saturating(1),
            state: Default::default(),
            triggered_bomb: None,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(RandomGridGenerator::new(seed).generate())
    }

    /// Throws the current round away and deals a new one.
    pub fn reset<G: GridGenerator>(&mut self, generator: G) {
        *self = Self::new(generator.generate());
        log::debug!("Session reset");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Card at `index`, `None` when the index is off the grid.
    pub fn cell_at(&self, index: CellIndex) -> Option<Cell> {
        self.grid.get(index)
    }

    pub fn balance(&self) -> Amount {
        self.balance.0
    }

    pub fn multiplier(&self) -> Amount {
        self.multiplier.0
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn hit_bomb(&self) -> bool {
        matches!(self.state, SessionState::Busted)
    }

    pub fn triggered_bomb(&self) -> Option<CellIndex> {
        self.triggered_bomb
    }

    pub fn can_reveal_at(&self, index: CellIndex) -> bool {
        !self.state.is_finished()
            && self
                .grid
                .get(index)
                .is_some_and(|cell| !cell.is_revealed())
    }

    pub fn can_claim(&self) -> bool {
        !self.state.is_finished() && self.grid.any_revealed()
    }

    /// Turns the card at `index` and applies its effect.
    ///
    /// Turning a card that is already face up, or any card once the round is over, leaves the
    /// session untouched and reports [`RevealOutcome::NoChange`].
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        use CellContent::*;
        use RevealOutcome::*;

        let pos = self.grid.validate_index(index).inspect_err(|_| {
            log::warn!("Ignoring reveal at out of range index {}", index);
        })?;

        if self.state.is_finished() || !self.grid.reveal_at(pos) {
            return Ok(NoChange);
        }

        let outcome = match self.grid.cells()[pos].content() {
            Cash(cash) => {
                let payout = Saturating(cash.value()) * self.multiplier;
                self.balance += payout;
                Paid(payout.0)
            }
            Zero => Blank,
            Multiplier => {
                self.multiplier *= Saturating(2);
                self.balance *= Saturating(2);
                Doubled
            }
            Bomb => {
                self.triggered_bomb = Some(index);
                self.end_game(SessionState::Busted);
                Exploded
            }
        };

        if self.state.is_ready() {
            self.state = SessionState::Active;
        }
        log::debug!(
            "Revealed {} -> {:?}, balance: {}, multiplier: {}",
            index,
            outcome,
            self.balance.0,
            self.multiplier.0
        );
        Ok(outcome)
    }

    /// Cashes out the current balance, turning every remaining card.
    pub fn claim(&mut self) -> ClaimOutcome {
        if !self.can_claim() {
            return ClaimOutcome::NoChange;
        }

        self.end_game(SessionState::Claimed);
        log::debug!("Claimed {}", self.balance.0);
        ClaimOutcome::Claimed(self.balance.0)
    }

    fn end_game(&mut self, state: SessionState) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        self.grid.reveal_all();
    }

    /// Checks that balance, multiplier, state and bomb marker could come out of playing `grid`.
    fn check_consistency(&self) -> Result<()> {
        use SessionState::*;

        let turned = |kind: CellKind| {
            self.grid
                .iter()
                .any(|cell| cell.kind() == kind && cell.is_revealed())
        };

        let multiplier_ok = match self.state {
            Ready | Active => {
                self.multiplier.0 == if turned(CellKind::Multiplier) { 2 } else { 1 }
            }
            // every card is face up once the round ends
            Claimed | Busted => matches!(self.multiplier.0, 1 | 2),
        };
        let state_ok = match self.state {
            Ready => !self.grid.any_revealed(),
            Active => self.grid.any_revealed() && !turned(CellKind::Bomb),
            Claimed | Busted => self.grid.all_revealed(),
        };
        let bomb_ok = match (self.state, self.triggered_bomb) {
            (Busted, Some(index)) => self
                .grid
                .get(index)
                .is_some_and(|cell| cell.kind() == CellKind::Bomb),
            (Busted, None) => false,
            (_, triggered) => triggered.is_none(),
        };
        if !(multiplier_ok && state_ok && bomb_ok) {
            return Err(GameError::InvalidSession);
        }

        let collectable: Amount = self
            .grid
            .iter()
            .filter(|cell| self.state.is_finished() || cell.is_revealed())
            .filter_map(|cell| match cell.content() {
                CellContent::Cash(cash) => Some(cash.value()),
                _ => None,
            })
            .sum();
        let ceiling = collectable * self.multiplier.0;
        if self.balance.0 % CASH_STEP != 0 || self.balance.0 > ceiling {
            return Err(GameError::InvalidSession);
        }
        Ok(())
    }
}

/// Unchecked mirror of [`Session`] that deserialization goes through.
#[derive(Deserialize)]
struct SessionRecord {
    grid: Grid,
    balance: Saturating<Amount>,
    multiplier: Saturating<Amount>,
    state: SessionState,
    triggered_bomb: Option<CellIndex>,
}

impl TryFrom<SessionRecord> for Session {
    type Error = GameError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        let session = Self {
            grid: record.grid,
            balance: record.balance,
            multiplier: record.multiplier,
            state: record.state,
            triggered_bomb: record.triggered_bomb,
        };
        session.check_consistency().inspect_err(|err| {
            log::warn!("Rejecting deserialized session: {}", err);
        })?;
        Ok(session)
    }
}
