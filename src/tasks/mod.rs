pub mod accumulator;
pub mod presenter;
pub mod reporter;
