// handlers/mod.rs - two security tiers
//
// Public (no credential) -> Protected (bearer credential)
pub mod protected;
pub mod public;
