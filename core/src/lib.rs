#![no_std]

#[cfg(test)]
extern crate std;

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Cash card paid out this much, multiplier included
    Paid(Amount),
    Blank,
    Doubled,
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Paid(_) => true,
            Blank => true,
            Doubled => true,
            Exploded => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    NoChange,
    Claimed(Amount),
}

impl ClaimOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Claimed(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_change_skips_the_redraw() {
        use RevealOutcome::*;

        assert!(!NoChange.has_update());
        for outcome in [Paid(100), Paid(0), Blank, Doubled, Exploded] {
            assert!(outcome.has_update(), "{outcome:?} should redraw");
        }

        assert!(!ClaimOutcome::NoChange.has_update());
        assert!(ClaimOutcome::Claimed(0).has_update());
        assert!(ClaimOutcome::Claimed(1640).has_update());
    }
}
