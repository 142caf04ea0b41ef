//! Company Data

use crate::domain::companies::records::CompanyUuid;

/// New Company Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    /// UUID to assign to the company row.
    pub uuid: CompanyUuid,

    /// Company name to persist.
    pub name: String,
}
