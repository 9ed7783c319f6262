//! Application services built on top of the repositories.

pub mod auth;
