//! Public API surface exposed to runtime clients.
//!
//! Re-exports the handle, errors, and the op vocabulary accepted by the
//! scoring worker.

mod errors;
mod handle;
mod ops;
mod standing;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use ops::PlayerOp;
pub use standing::Standing;
