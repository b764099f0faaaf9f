// Fortuna: a community fortune wall.
//
// This is the library root. The interesting part is the content-admission
// pipeline in `moderation` — everything a submitted fortune must pass
// before it becomes publicly visible.

pub mod client;
pub mod config;
pub mod moderation;
pub mod rate_limit;
pub mod store;
pub mod toxicity;
pub mod web;
