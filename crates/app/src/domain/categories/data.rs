//! Categories Data

use clap::ValueEnum;

use crate::domain::{categories::records::CategoryUuid, companies::records::CompanyUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub company: CompanyUuid,
    pub name: String,
    pub parent_category: Option<CategoryUuid>,
}

/// Category Update Data
///
/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub company: Option<CompanyUuid>,
    pub name: Option<String>,
    pub parent_category: ParentUpdate,
}

/// Change to apply to a category's parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ParentUpdate {
    /// Keep the stored parent.
    #[default]
    Unchanged,

    /// Make the category top-level.
    Cleared,

    /// Re-parent under the given category.
    Set(CategoryUuid),
}

impl ParentUpdate {
    /// Resolve against the currently stored parent.
    #[must_use]
    pub fn apply(self, current: Option<CategoryUuid>) -> Option<CategoryUuid> {
        match self {
            Self::Unchanged => current,
            Self::Cleared => None,
            Self::Set(parent) => Some(parent),
        }
    }
}

impl From<Option<CategoryUuid>> for ParentUpdate {
    fn from(value: Option<CategoryUuid>) -> Self {
        value.map_or(Self::Cleared, Self::Set)
    }
}

/// Which columns a category name must be unique across.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UniqueScope {
    /// One name per company.
    #[default]
    Company,

    /// One name per parent category within a company; top-level categories share
    /// a single namespace.
    CompanyParent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_update_resolves_against_current_parent() {
        let current = CategoryUuid::new();
        let next = CategoryUuid::new();

        assert_eq!(ParentUpdate::Unchanged.apply(Some(current)), Some(current));
        assert_eq!(ParentUpdate::Cleared.apply(Some(current)), None);
        assert_eq!(ParentUpdate::Set(next).apply(None), Some(next));
    }

    #[test]
    fn explicit_null_parent_clears() {
        assert_eq!(ParentUpdate::from(None), ParentUpdate::Cleared);
    }
}
