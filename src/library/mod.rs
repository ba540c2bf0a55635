//! In-memory book store split across logical submodules.

mod seed;
mod store;

pub use seed::{seed_library, SEED_BOOKS};
pub use store::Library;
