use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use streamhub_cli::admin::{self, CliResult, CreateUserInput};
use streamhub_cli::seeder;
use streamhub_db::{PgPool, PgUserRepository, init_db_pool};
use streamhub_models::UserRole;

#[derive(Parser)]
#[command(name = "streamhub-cli")]
#[command(about = "StreamHub CLI - Administrative tools for StreamHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with any role (the API only registers `user`)
    CreateUser {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// user, manager or admin
        #[arg(short = 'r', long)]
        role: Option<UserRole>,
    },
    /// Change the role of an existing account
    SetRole {
        /// Username or email
        user: String,

        /// user, manager or admin
        role: UserRole,
    },
    /// Clear a user's refresh token, ending their session at the next refresh
    RevokeSession {
        /// Username or email
        user: String,
    },
    /// Seed the database with fake `user` accounts
    SeedUsers {
        #[arg(short = 'c', long, default_value = "100")]
        count: usize,
    },
    /// Remove accounts created by `seed-users`
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, pool).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands, pool: PgPool) -> CliResult<()> {
    let users = PgUserRepository::new(pool.clone());

    match command {
        Commands::CreateUser {
            username,
            email,
            full_name,
            password,
            role,
        } => {
            let input = CreateUserInput {
                username: prompt_if_missing(username, "Username")?,
                email: prompt_if_missing(email, "Email address")?,
                full_name: prompt_if_missing(full_name, "Full name")?,
                password: match password {
                    Some(password) => password,
                    None => Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()?,
                },
                role: match role {
                    Some(role) => role,
                    None => prompt_role()?,
                },
            };

            let user = admin::create_user(&users, input).await?;
            println!("\n✅ User created successfully!");
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
        }
        Commands::SetRole { user, role } => {
            let updated = admin::set_role(&users, &user, role).await?;
            println!("✅ {} is now {}", updated.username, role);
        }
        Commands::RevokeSession { user } => {
            let revoked = admin::revoke_session(&users, &user).await?;
            println!("✅ Session revoked for {}", revoked.username);
        }
        Commands::SeedUsers { count } => {
            seeder::seed_users(&pool, count).await?;
        }
        Commands::ClearSeed => {
            seeder::clear_seeded_users(&pool).await?;
        }
    }

    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> CliResult<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn prompt_role() -> CliResult<UserRole> {
    let labels: Vec<&str> = UserRole::ALL.iter().map(UserRole::as_str).collect();
    let selection = Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(UserRole::ALL[selection])
}
