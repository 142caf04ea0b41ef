use catalog_app::{
    database::{self, Db},
    domain::companies::{CompaniesService, SqliteCompaniesService},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListCompaniesArgs {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://catalog.db")]
    database_url: String,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: ListCompaniesArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    let companies = SqliteCompaniesService::new(&Db::new(pool))
        .list_companies()
        .await
        .map_err(|error| format!("failed to list companies: {error}"))?;

    for company in companies {
        println!("{}\t{}", company.uuid, company.name);
    }

    Ok(())
}
