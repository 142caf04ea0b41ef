//! Extension traits

mod depot;
mod path;
mod request;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use path::PathUuidExt as _;
pub(crate) use request::RequestBodyExt as _;
pub(crate) use result::ResultExt as _;
