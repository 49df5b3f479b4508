//! Client-side flows for the two app surfaces.
//!
//! Each flow owns an explicit state object and mutates it only through its
//! own methods, so the rendering layer observes a single unidirectional
//! update cycle instead of ad hoc shared variables.

pub mod api_client;
pub mod location;
pub mod review;
pub mod submission;
