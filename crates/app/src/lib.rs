//! Urban Harvest domain services and persistence.

pub mod context;
pub mod database;
pub mod domain;
pub mod validation;

#[cfg(test)]
mod test;

mod uuids;
