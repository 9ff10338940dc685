pub mod accumulator;
pub mod errors;
pub mod events;
pub mod models;
pub mod money;
pub mod services;
pub mod settlement;
pub mod simplifier;
pub mod splitter;
