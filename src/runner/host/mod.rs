//! Host-interop layer: the registration table, the host value
//! representation and its conversions, and an example host surface.

pub mod globals;
pub mod registry;
pub mod types;
