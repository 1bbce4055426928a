//! Flutter-facing bindings for the Stalkline core.

pub mod api;
