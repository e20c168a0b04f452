//! Element kind matcher implementations.

pub mod board_tile;
pub mod inline;
pub mod test_id;
pub mod wrapper;

pub use board_tile::BoardTileMatcher;
pub use inline::{wrapper_code, wrapper_links, InlineMatcher};
pub use test_id::TestIdMatcher;
pub use wrapper::WrapperBlockMatcher;
