use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Cash value must be a multiple of 10 between 100 and 590")]
    InvalidCashValue,
    #[error("Grid must hold 5 cash, 2 zero, 1 multiplier and 1 bomb cell")]
    InvalidLayout,
    #[error("Balance, multiplier or state do not match the session's grid")]
    InvalidSession,
}

pub type Result<T> = core::result::Result<T, GameError>;
