//! Repository layer for player persistence.
//!
//! Repositories hold data that CHANGES during play: the player aggregates
//! with their modifiers and progress. Static content (achievement and rule
//! catalogs, penalty templates) is loaded by `scoring-content` instead.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FilePlayerRepository;
pub use memory::InMemoryPlayerRepo;
pub use traits::PlayerRepository;
