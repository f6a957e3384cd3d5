pub mod error;
pub mod generator;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use error::{Result, ShipwrightError};
pub use generator::{generate, generate_batch, GeneratorConfig, Spaceship};
