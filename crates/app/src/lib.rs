//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod invoices;
pub mod money;
pub mod notifications;

#[cfg(test)]
mod test;

mod uuids;
