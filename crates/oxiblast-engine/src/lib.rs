pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid tray seed: {reason}")]
pub struct ParseSeedError {
    pub(crate) reason: String,
}
