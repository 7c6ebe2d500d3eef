use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expenses_rs::{
    NewExpense, PasswordHash, ValidatedPassword, create_expense, create_user, initialize_db,
};

/// A utility for creating a test database for the REST API server of expenses_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many sample expenses to give the test user.
    #[arg(long, default_value_t = 42)]
    expense_count: u32,
}

const SAMPLES: [(&str, f64, &str); 6] = [
    ("Groceries", 84.2, "Food"),
    ("Bus fare", 3.5, "Transport"),
    ("Cinema", 19.0, "Entertainment"),
    ("Power bill", 132.75, "Utilities"),
    ("Coffee", 4.5, "Food"),
    ("Birthday present", 45.0, "Others"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user test@example.com with the password 'test'...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(EmailAddress::from_str("test@example.com")?, password_hash, &conn)?;

    println!("Creating {} expenses...", args.expense_count);

    let now = OffsetDateTime::now_utc();
    for (i, (description, amount, category)) in
        SAMPLES.iter().cycle().take(args.expense_count as usize).enumerate()
    {
        create_expense(
            user.id,
            NewExpense {
                description: description.to_string(),
                amount: *amount,
                category: category.to_string(),
                date: Some(now - Duration::hours(i as i64 * 19)),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
