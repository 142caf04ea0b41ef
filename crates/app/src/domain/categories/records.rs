//! Category Records

use jiff::Timestamp;

use crate::{domain::companies::records::CompanyUuid, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub company: CompanyUuid,
    pub name: String,
    pub parent_category: Option<CategoryUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
