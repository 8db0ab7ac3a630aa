//! Service layer behind the websocket and HTTP handlers.
//!
//! ARCHITECTURE
//! ============
//! Chat-state mutation, store access, disk spooling, and upstream calls all
//! live here; route handlers only translate between the wire and these
//! operations.

pub mod application;
pub mod forward;
pub mod internship;
pub mod relay;
pub mod room;
pub mod upload;
