//! # Seed Data Generator
//!
//! Populates the database with sample bills for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 bills (default)
//! cargo run -p sutra-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p sutra-db --bin seed -- --count 50
//!
//! # Specify database path
//! cargo run -p sutra-db --bin seed -- --db ./data/sutra.db
//! ```
//!
//! ## Generated Bills
//! Creates realistic invoice data:
//! - Sequential invoice numbers: `SC<year>0001`, `SC<year>0002`, ...
//! - Rotating buyers with valid-format GSTINs
//! - 1-3 line items per bill with HSN codes
//! - Invoice dates spread backwards over recent months
//! - Default intra-state tax split (SGST 9% + CGST 9%)

use chrono::{Datelike, Months, Utc};
use rust_decimal::Decimal;
use std::env;
use sutra_core::Bill;
use sutra_db::{Database, DbConfig};

/// Sample buyers: (name, address, gstin)
const BUYERS: &[(&str, &str, &str)] = &[
    (
        "Acme Industries",
        "12 Industrial Estate, Ambattur, Chennai - 600058",
        "33AAACA1234A1Z5",
    ),
    (
        "Bottling Works",
        "4 Mount Road, Chennai - 600002",
        "33AAACB5678B1Z3",
    ),
    (
        "Conveyor Co",
        "88 SIDCO Nagar, Villivakkam, Chennai - 600049",
        "33AAACC9012C1Z1",
    ),
    (
        "Deccan Fabricators",
        "21 Hosur Main Road, Bengaluru - 560068",
        "29AAACD3456D1Z7",
    ),
    (
        "Everest Engineering",
        "7 GST Road, Chromepet, Chennai - 600044",
        "33AAACE7890E1Z9",
    ),
];

/// Sample line items: (description, hsn, rate)
const ITEMS: &[(&str, &str, i64)] = &[
    ("Polyurethane roller 150mm", "3926", 500),
    ("Conveyor belt fastener set", "8431", 350),
    ("Rubber gasket sheet 3mm", "4016", 275),
    ("Industrial caster wheel", "8302", 180),
    ("Nylon bush 40mm", "3926", 95),
    ("Mild steel bracket", "7326", 120),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Quiet by default; RUST_LOG=debug shows pool/repository activity
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path = String::from("./sutra_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sutra Billing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of bills to generate (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./sutra_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Sutra Billing Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Bills:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing bills
    let existing = db.bills().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} bills", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating bills...");

    let today = Utc::now().date_naive();
    let year = today.year();
    let start = std::time::Instant::now();

    let mut generated = 0;
    for n in 0..count {
        let bill = generate_bill(n, year, today);

        if let Err(e) = db.bills().create(&bill).await {
            eprintln!("Failed to insert {}: {}", bill.invoice_no, e);
            continue;
        }

        generated += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} bills in {:?}", generated, elapsed);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single bill with realistic data.
fn generate_bill(seed: usize, year: i32, today: chrono::NaiveDate) -> Bill {
    let invoice_no = format!("SC{}{:04}", year, seed + 1);

    // Spread invoice dates backwards, roughly 3 bills per month
    let months_back = (seed / 3) as u32;
    let invoice_date = today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today);

    let mut bill = Bill::draft(&invoice_no, invoice_date);

    let (name, address, gstin) = BUYERS[seed % BUYERS.len()];
    bill.buyer_name = name.to_string();
    bill.buyer_address = address.to_string();
    bill.buyer_gstin = gstin.to_string();
    bill.transport_mode = "Road".to_string();

    // 1-3 items, walking through the catalog
    let item_count = 1 + seed % 3;
    for _ in 1..item_count {
        bill.add_item();
    }
    for sno in 1..=item_count as u32 {
        let (description, hsn, rate) = ITEMS[(seed + sno as usize) % ITEMS.len()];
        let quantity = Decimal::from(1 + (seed + sno as usize) % 10);
        let _ = bill.update_item(sno, |item| {
            item.description = description.to_string();
            item.hsn_code = hsn.to_string();
            item.quantity = quantity;
            item.rate = Decimal::from(rate);
        });
    }

    bill
}
