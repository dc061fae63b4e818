// Application layer: wires config, storage, sinks and the engine together.

pub mod runner;

pub use runner::{completion_message, run};
