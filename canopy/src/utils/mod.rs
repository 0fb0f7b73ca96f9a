//! Pure tree utilities.
//!
//! Every function here is stateless: hierarchies are borrowed, results are
//! returned as new values, and the only mutated arguments are the explicit
//! `&mut` id sets and state maps documented per function.

mod ancestry;
mod filter;
mod find;
mod flatten;
mod selection;
mod validate;

pub use ancestry::*;
pub use filter::*;
pub use find::*;
pub use flatten::*;
pub use selection::*;
pub use validate::*;
