use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use client_contacts::models::{ClientChanges, ClientFilter, ClientRecord};
use client_contacts::{config, db, logging, Database};

/// Keeps a small book of clients and their phone numbers in PostgreSQL.
#[derive(Debug, Parser)]
#[command(name = "client_contacts", version)]
struct Cli {
    /// Database connection URL. Falls back to `DATABASE_URL`.
    #[arg(long, value_name = "url")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recreate the schema and run a scripted walk through every operation
    Demo,
    /// Recreate the schema, empty
    Init,
    /// Print clients matching all given fields
    Find(FindArgs),
}

#[derive(Debug, Args)]
struct FindArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl From<FindArgs> for ClientFilter {
    fn from(args: FindArgs) -> Self {
        ClientFilter {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = config::init()?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }

    logging::init("info");

    let db = db::init(&config).await?;

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&db).await?,
        Command::Init => db.create_db().await?,
        Command::Find(args) => {
            let records = db.find_client(&args.into()).await?;
            print_records(&records);
        }
    }

    Ok(())
}

async fn run_demo(db: &Database) -> Result<()> {
    db.create_db().await?;

    let ivan = db.add_client("Ivan", "Ivanov", "ivan@mail.ru", &[]).await?;
    let petr = db
        .add_client("Petr", "Petrov", "petr@mail.ru", &["79999", "98888", "39999"])
        .await?;

    println!("add phone to Ivan: {}", db.add_phone(ivan, "764646").await?);
    println!("add phone to nobody: {}", db.add_phone(petr + 100, "000000").await?);

    let changes = ClientChanges::default().email("petr.petrov@mail.ru");
    db.change_client(petr, &changes, Some("98888"), Some("98877")).await?;

    println!("\nall clients:");
    print_records(&db.find_client(&ClientFilter::default()).await?);

    println!("\nclients with phone 98877:");
    print_records(&db.find_client(&ClientFilter::default().phone("98877")).await?);

    println!("\ndelete Petr's 39999: {}", db.delete_phone(petr, "39999").await?);
    println!("delete Petr's 39999 again: {}", db.delete_phone(petr, "39999").await?);
    println!("delete Ivan: {}", db.delete_client(ivan).await?);
    println!("delete Ivan again: {}", db.delete_client(ivan).await?);

    println!("\nremaining:");
    print_records(&db.find_client(&ClientFilter::default()).await?);

    info!("demo finished");

    Ok(())
}

fn print_records(records: &[ClientRecord]) {
    if records.is_empty() {
        println!("  (none)");
    }
    for record in records {
        println!(
            "  #{:<4} {} {} <{}> {}",
            record.id,
            record.first_name,
            record.last_name,
            record.email,
            record.phone_number.as_deref().unwrap_or("-"),
        );
    }
}
