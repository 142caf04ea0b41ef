//! Categories service errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{categories::records::CategoryUuid, companies::records::CompanyUuid};

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category already exists")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("unresolved references: {0}")]
    UnresolvedReferences(UnresolvedReferences),

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// References on a category write that point at rows which do not exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnresolvedReferences {
    pub company: Option<CompanyUuid>,
    pub parent_category: Option<CategoryUuid>,
}

impl UnresolvedReferences {
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.parent_category.is_none()
    }
}

impl Display for UnresolvedReferences {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.company, self.parent_category) {
            (Some(company), Some(parent)) => {
                write!(f, "company {company}, parent category {parent}")
            }
            (Some(company), None) => write!(f, "company {company}"),
            (None, Some(parent)) => write!(f, "parent category {parent}"),
            (None, None) => write!(f, "none"),
        }
    }
}

impl From<Error> for CategoriesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
