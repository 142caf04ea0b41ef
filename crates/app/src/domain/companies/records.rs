//! Company Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Company UUID
pub type CompanyUuid = TypedUuid<CompanyRecord>;

/// Company Record
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    /// Unique company identifier.
    pub uuid: CompanyUuid,

    /// Human-readable company name.
    pub name: String,

    /// Company creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
