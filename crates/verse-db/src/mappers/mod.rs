//! Model <-> entity mappers

mod engagement;

pub use engagement::into_entry;
