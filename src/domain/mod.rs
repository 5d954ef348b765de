pub mod message;
pub mod types;

pub use message::{NewsMessage, PRIORITY_UNSET};
pub use types::{Digest, DispatchStats, PositiveWords};
