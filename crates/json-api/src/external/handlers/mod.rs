//! External Handlers

pub(crate) mod map_config;
pub(crate) mod weather;
