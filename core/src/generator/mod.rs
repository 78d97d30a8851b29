use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self) -> Grid;
}
