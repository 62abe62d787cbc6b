//! Emporium
//!
//! Typed promotion drafts for the marketplace admin: condition-list editing,
//! per-archetype detail forms, validation and the step-by-step promotion
//! builder that assembles the payload handed to the marketplace API.

pub mod prelude;
pub mod promotions;
pub mod wizard;
