//! Company Serializer

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_app::domain::companies::{
    data::NewCompany,
    records::{CompanyRecord, CompanyUuid},
};

use crate::{
    errors::FieldErrors,
    fields::{self, Mode, REQUIRED},
};

pub(crate) const NAME: &str = "name";

/// Company representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompanyResponse {
    /// The unique identifier of the company
    pub id: String,

    /// The company name
    pub name: String,

    /// The date and time the company was created
    pub created_at: String,

    /// The date and time the company was last updated
    pub updated_at: String,
}

impl From<CompanyRecord> for CompanyResponse {
    fn from(company: CompanyRecord) -> Self {
        CompanyResponse {
            id: company.uuid.to_string(),
            name: company.name,
            created_at: company.created_at.to_string(),
            updated_at: company.updated_at.to_string(),
        }
    }
}

pub(crate) fn decode_new(body: &Value, uuid: CompanyUuid) -> Result<NewCompany, FieldErrors> {
    let object = fields::expect_object(body)?;
    let mut errors = FieldErrors::default();

    let name = fields::decode_name(object, NAME, Mode::Full, &mut errors);

    match name {
        Some(name) if errors.is_empty() => Ok(NewCompany { uuid, name }),
        _ if errors.is_empty() => Err(FieldErrors::single(NAME, REQUIRED)),
        _ => Err(errors),
    }
}
