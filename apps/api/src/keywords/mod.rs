// Keyword ranking layer: provider trait, Postgres-backed store, listing API.

pub mod handlers;
pub mod provider;
