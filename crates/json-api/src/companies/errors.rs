//! Company Errors

use tracing::error;

use catalog_app::domain::companies::CompaniesServiceError;

use crate::{
    companies::serializer::NAME,
    errors::{ApiError, FieldErrors, NON_FIELD_ERRORS},
    fields::NOT_BLANK,
};

pub(crate) fn into_api_error(error: CompaniesServiceError) -> ApiError {
    match error {
        CompaniesServiceError::NotFound => ApiError::NotFound,
        CompaniesServiceError::AlreadyExists => ApiError::Validation(FieldErrors::single(
            NON_FIELD_ERRORS,
            "Company already exists.",
        )),
        CompaniesServiceError::MissingRequiredData => {
            ApiError::Validation(FieldErrors::single(NAME, NOT_BLANK))
        }
        CompaniesServiceError::InvalidData => {
            ApiError::Validation(FieldErrors::single(NON_FIELD_ERRORS, "Invalid data."))
        }
        CompaniesServiceError::Sql(source) => {
            error!("company storage failure: {source}");

            ApiError::Internal
        }
    }
}
