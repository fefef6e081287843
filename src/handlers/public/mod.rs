// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service status and liveness probes. No credential is read, so these stay
// reachable when the auth provider or the course store is down.

pub mod status;

pub use status::{health, root};
