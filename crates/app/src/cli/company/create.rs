use catalog_app::{
    database::{self, Db},
    domain::companies::{CompaniesService, SqliteCompaniesService, data::NewCompany},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCompanyArgs {
    /// Company display name
    #[arg(long)]
    name: String,

    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://catalog.db")]
    database_url: String,

    /// Optional company UUID; generated when omitted
    #[arg(long)]
    company_uuid: Option<Uuid>,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: CreateCompanyArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    let service = SqliteCompaniesService::new(&Db::new(pool));
    let company_uuid = args.company_uuid.unwrap_or_else(Uuid::now_v7);

    let company = service
        .create_company(NewCompany {
            uuid: company_uuid.into(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create company: {error}"))?;

    println!("company_uuid: {}", company.uuid);
    println!("company_name: {}", company.name);

    Ok(())
}
