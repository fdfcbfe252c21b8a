//! Interactive host mode
//!
//! Lets a person take part in a debate as the host, adding a turn after
//! every round.

mod repl;

pub use repl::HostRepl;
