use clap::Args;
use souq_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, UsersServiceError},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email of the user to promote, matched case-insensitively
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .promote_to_admin(&args.email)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => format!("no user with email {}", args.email),
            other => format!("failed to promote user: {other}"),
        })?;

    println!("promoted {} ({}) to admin", user.username, user.uuid);

    Ok(())
}
