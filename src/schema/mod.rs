//! Fields and terms.
//!
//! Documents are flat lists of [`Term`]s. Parsing and tokenization are the
//! job of the host index.

mod field;
mod term;

pub use self::field::Field;
pub use self::term::Term;
