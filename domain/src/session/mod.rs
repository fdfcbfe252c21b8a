//! Interactive debate session domain.
//!
//! - [`entities::Session`]: state of one host-driven debate between rounds
//! - [`entities::SessionParams`]: what the caller supplies to start one

pub mod entities;
