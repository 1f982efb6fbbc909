//! Core internal logic for station management.
//!
//! This module contains the control-protocol sequences behind the public
//! API: connecting, disconnecting, scanning and state polling.

pub(crate) mod connection;
pub(crate) mod scan;
pub(crate) mod state_wait;
