pub mod classifier;
pub mod selector;

pub use classifier::{is_positive, parse_message};
pub use selector::select;
