//! Citizen water-leak reporting platform.
//!
//! The server side exposes a small REST surface over Postgres (see
//! [`features::reports`]); the client side drives the two app surfaces
//! through explicit state flows (see [`flows`]).

pub mod core;
pub mod features;
pub mod flows;
pub mod modules;
pub mod shared;
