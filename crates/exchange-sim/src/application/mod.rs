mod book;
mod front;

pub use book::{Ledger, NewOrder, Stamp};
pub use front::SimFront;
