//! Category Errors

use tracing::error;

use catalog_app::domain::categories::{
    CategoriesServiceError, UnresolvedReferences, data::UniqueScope,
};

use crate::{
    categories::serializer::{COMPANY, NAME, PARENT_CATEGORY},
    errors::{ApiError, FieldErrors, NON_FIELD_ERRORS},
    fields::{self, NOT_BLANK},
};

pub(crate) fn into_api_error(error: CategoriesServiceError, scope: UniqueScope) -> ApiError {
    match error {
        CategoriesServiceError::NotFound => ApiError::NotFound,
        CategoriesServiceError::AlreadyExists => {
            ApiError::Validation(FieldErrors::single(NON_FIELD_ERRORS, unique_message(scope)))
        }
        CategoriesServiceError::UnresolvedReferences(references) => {
            ApiError::Validation(unresolved_errors(&references))
        }
        CategoriesServiceError::InvalidReference => ApiError::Validation(FieldErrors::single(
            NON_FIELD_ERRORS,
            "Referenced object does not exist.",
        )),
        CategoriesServiceError::MissingRequiredData => {
            ApiError::Validation(FieldErrors::single(NAME, NOT_BLANK))
        }
        CategoriesServiceError::InvalidData => {
            ApiError::Validation(FieldErrors::single(NON_FIELD_ERRORS, "Invalid data."))
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage failure: {source}");

            ApiError::Internal
        }
    }
}

fn unique_message(scope: UniqueScope) -> String {
    let fields = match scope {
        UniqueScope::Company => [COMPANY, NAME].join(", "),
        UniqueScope::CompanyParent => [COMPANY, PARENT_CATEGORY, NAME].join(", "),
    };

    format!("The fields {fields} must make a unique set.")
}

fn unresolved_errors(references: &UnresolvedReferences) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Some(company) = references.company {
        errors.add(COMPANY, fields::does_not_exist(company));
    }

    if let Some(parent) = references.parent_category {
        errors.add(PARENT_CATEGORY, fields::does_not_exist(parent));
    }

    errors
}
