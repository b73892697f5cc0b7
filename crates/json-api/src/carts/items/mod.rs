//! Cart line endpoints

pub(crate) mod handlers;
