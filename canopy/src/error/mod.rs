//! Error types

mod load;
mod selection;
mod structure;

pub use load::*;
pub use selection::*;
pub use structure::*;
