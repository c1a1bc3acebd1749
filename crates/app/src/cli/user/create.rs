use clap::Args;
use harvest_app::domain::users::{
    DEFAULT_SESSION_TTL, PgUsersService, UsersService,
    data::NewUser,
    records::{Role, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Initial password (at least 6 characters)
    #[arg(long, env = "HARVEST_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let service = PgUsersService::new(db, DEFAULT_SESSION_TTL);
    let role = if args.admin { Role::Admin } else { Role::User };

    let user = service
        .create_user(
            NewUser {
                uuid: UserUuid::new(),
                name: args.name,
                email: args.email,
                password: args.password,
            },
            role,
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
