//! Infrastructure: the generation client, prompt builders, persistence,
//! and paper export.

pub mod gen;
pub mod paper;
pub mod prompt;
pub mod store;

pub use gen::{GenClient, GenOutcome, GenPayload, GenTarget, ModelTier};
pub use store::StateStore;
