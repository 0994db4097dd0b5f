use classroom_cli::{admin, seeder};
use classroom_cli::seeder::SeedConfig;
use classroom_config::ProvisioningConfig;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "classroom-cli")]
#[command(about = "Classroom CLI - Administrative tools for the Classroom API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator (staff) account
    CreateAdmin {
        /// Display name of the administrator
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address, also used as the login username
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake programs, sections, students and resources
    Seed {
        /// Number of programs to create
        #[arg(short = 'p', long, default_value = "3")]
        programs: usize,

        /// Number of sections per program
        #[arg(long, default_value = "2")]
        sections: usize,

        /// Number of students enrolled per section
        #[arg(long, default_value = "10")]
        students: usize,

        /// Number of resources per section
        #[arg(long, default_value = "4")]
        resources: usize,
    },
    /// Clear all seeded data (keeps staff accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = match classroom_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::Seed {
            programs,
            sections,
            students,
            resources,
        } => {
            let config = SeedConfig::new(programs)
                .with_sections(sections)
                .with_students(students)
                .with_resources(resources);
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt_text("Name"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    match admin::create_admin(pool, &name, &email, &password).await {
        Ok(account) => {
            println!("\n✅ Administrator created successfully!");
            println!("   ID: {}", account.id);
            println!("   Username: {}", account.username);
            println!("   Name: {}", account.first_name);
        }
        Err(e) => fail("Error creating administrator", e),
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    let provisioning = ProvisioningConfig::from_env();
    if let Err(e) = seeder::seed_all(pool, config, &provisioning.default_password_suffix).await {
        fail("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        fail("Error clearing seeded data", e);
    }
}

fn prompt_text(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", prompt.to_lowercase()), e))
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, error);
    std::process::exit(1);
}
