//! Category Serializer
//!
//! Decodes request bodies into domain inputs with per-field validation and encodes
//! stored records into the wire representation.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use catalog_app::domain::{
    categories::{
        data::{CategoryUpdate, NewCategory, ParentUpdate},
        records::{CategoryRecord, CategoryUuid},
    },
    companies::records::CompanyUuid,
};

use crate::{
    errors::FieldErrors,
    fields::{self, Mode, NOT_NULL, REQUIRED},
};

pub(crate) const COMPANY: &str = "company";
pub(crate) const NAME: &str = "name";
pub(crate) const PARENT_CATEGORY: &str = "parent_category";

/// Category representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub id: String,

    /// The company the category belongs to
    pub company: String,

    /// The category name
    pub name: String,

    /// The parent category, if any
    pub parent_category: Option<String>,

    /// The date and time the category was created
    pub created_at: String,

    /// The date and time the category was last updated
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            id: category.uuid.to_string(),
            company: category.company.to_string(),
            name: category.name,
            parent_category: category.parent_category.map(|parent| parent.to_string()),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// Decode a create body. `company` and `name` are required.
pub(crate) fn decode_new(body: &Value, uuid: CategoryUuid) -> Result<NewCategory, FieldErrors> {
    let CategoryUpdate {
        company,
        name,
        parent_category,
    } = decode(body, Mode::Full)?;

    match (company, name) {
        (Some(company), Some(name)) => Ok(NewCategory {
            uuid,
            company,
            name,
            parent_category: parent_category.apply(None),
        }),
        (company, name) => {
            let mut errors = FieldErrors::default();

            if company.is_none() {
                errors.add(COMPANY, REQUIRED);
            }

            if name.is_none() {
                errors.add(NAME, REQUIRED);
            }

            Err(errors)
        }
    }
}

/// Decode a replace (`Mode::Full`) or partial update (`Mode::Partial`) body.
pub(crate) fn decode_update(body: &Value, mode: Mode) -> Result<CategoryUpdate, FieldErrors> {
    decode(body, mode)
}

fn decode(body: &Value, mode: Mode) -> Result<CategoryUpdate, FieldErrors> {
    let object = fields::expect_object(body)?;
    let mut errors = FieldErrors::default();

    let company = decode_company(object, mode, &mut errors);
    let name = fields::decode_name(object, NAME, mode, &mut errors);
    let parent_category = decode_parent(object, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CategoryUpdate {
        company,
        name,
        parent_category,
    })
}

fn decode_company(
    object: &Map<String, Value>,
    mode: Mode,
    errors: &mut FieldErrors,
) -> Option<CompanyUuid> {
    match object.get(COMPANY) {
        None => {
            if mode == Mode::Full {
                errors.add(COMPANY, REQUIRED);
            }

            None
        }
        Some(Value::Null) => {
            errors.add(COMPANY, NOT_NULL);

            None
        }
        Some(value) => match fields::decode_pk(value) {
            Ok(uuid) => Some(uuid.into()),
            Err(message) => {
                errors.add(COMPANY, message);

                None
            }
        },
    }
}

/// An absent parent keeps the stored one; an explicit `null` clears it.
fn decode_parent(object: &Map<String, Value>, errors: &mut FieldErrors) -> ParentUpdate {
    match object.get(PARENT_CATEGORY) {
        None => ParentUpdate::Unchanged,
        Some(Value::Null) => ParentUpdate::Cleared,
        Some(value) => match fields::decode_pk(value) {
            Ok(uuid) => ParentUpdate::Set(uuid.into()),
            Err(message) => {
                errors.add(PARENT_CATEGORY, message);

                ParentUpdate::Unchanged
            }
        },
    }
}
