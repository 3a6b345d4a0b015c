use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use scholaris::cli::create_admin;
use scholaris::cli::seeder::seed_store;
use scholaris_store::{EntityStore, PgStore};

#[derive(Parser)]
#[command(name = "scholaris-cli")]
#[command(about = "Scholaris CLI - Administrative tools for Scholaris", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the store with demo users and records
    Seed {
        /// Number of records to create per entity type
        #[arg(short = 'r', long, default_value = "25")]
        records: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    // The store must outlive the process, so the CLI always talks to
    // PostgreSQL regardless of STORE_BACKEND.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let store = PgStore::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&store, first_name, last_name, email, password).await,
        Commands::Seed { records } => handle_seed(&store, records).await,
    }
}

async fn handle_create_admin(
    store: &dyn EntityStore,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    // Use provided values or prompt interactively
    let first_name = first_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("First name")
            .interact_text()
            .expect("Failed to read first name")
    });

    let last_name = last_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Last name")
            .interact_text()
            .expect("Failed to read last name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match create_admin(store, &first_name, &last_name, &email, &password).await {
        Ok(_) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {} {}", first_name, last_name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(store: &dyn EntityStore, records: usize) {
    match seed_store(store, records).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("\n❌ Error seeding store: {}", e);
            std::process::exit(1);
        }
    }
}
