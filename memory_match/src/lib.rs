pub use catalog::*;
pub use clock::*;
pub use comparator::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use features::*;
pub use move_log::*;
pub use protocol_types::*;
pub use square::*;
pub use strategy::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod catalog;
mod clock;
mod comparator;
mod config;
mod engine;
mod errors;
mod features;
mod move_log;
mod pca;
mod protocol_types;
mod square;
mod strategy;
mod visualization;
