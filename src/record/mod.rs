//! Medical records: titled, dated documents owned by a profile, with an
//! optional image attachment and free-text analysis fields.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
