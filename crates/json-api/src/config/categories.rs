//! Categories Config

use clap::Args;

use catalog_app::domain::categories::data::UniqueScope;

/// Category resource settings.
#[derive(Debug, Args)]
pub struct CategoriesConfig {
    /// Fields a category name must be unique within (company, company-parent)
    #[arg(
        long = "category-unique-scope",
        env = "CATEGORY_UNIQUE_SCOPE",
        value_enum,
        default_value_t = UniqueScope::Company
    )]
    pub unique_scope: UniqueScope,
}
