//! Domains module containing business logic organized by bounded contexts.
//!
//! Only the tools domain is exposed by this server; it has no resources or
//! prompts.

pub mod tools;
