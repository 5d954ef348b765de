pub mod feeder;
pub mod generator;
pub mod weighted;

pub use feeder::NewsFeeder;
pub use generator::NewsGenerator;
pub use weighted::WeightedPriority;
