//! Top-level facade crate for promsim.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use promsim_core::*;
}

pub mod server {
    pub use promsim_server::*;
}
