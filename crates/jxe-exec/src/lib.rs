pub mod contracts;
pub mod error;
pub mod executor;
pub mod json;
pub mod xml;

pub use contracts::*;
pub use error::*;
pub use executor::*;
