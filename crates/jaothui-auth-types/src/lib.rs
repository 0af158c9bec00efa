//! Auth types shared across Jaothui services.
//!
//! Sessions and OAuth are handled upstream; services only see the identity
//! the gateway injects.

pub mod identity;
