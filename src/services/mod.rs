//! Session-bus services backing the plugin's actions.

/// MPRIS player discovery and control.
pub mod mpris;
