//! Categories

mod errors;
mod handlers;
mod serializer;

pub(crate) use handlers::*;
