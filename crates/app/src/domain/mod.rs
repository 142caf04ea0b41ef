//! Catalog Domain Concerns

pub mod categories;
pub mod companies;
