//! # Seed Data Generator
//!
//! Populates a data directory with a demo account for development.
//!
//! ## Usage
//! ```bash
//! # Demo account "demo"/"demo" with 25 products (default)
//! cargo run -p stockroom-store --bin seed
//!
//! # Custom amount and location
//! cargo run -p stockroom-store --bin seed -- --products 100 --data ./tmp/data
//! ```
//!
//! ## Generated Data
//! - One account (reused if the credentials already match)
//! - Products across a few categories with sizes, prices and stock levels
//! - A handful of clients
//! - One invoice, so the reports have something to show

use std::env;

use anyhow::{bail, Context};
use stockroom_core::{ClientFields, Order, OrderLine, ProductFields};
use stockroom_store::{Store, StoreConfig, StoreError};

/// Product names for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Hardware", &["Hammer", "Screwdriver", "Wrench", "Pliers", "Tape Measure"]),
    ("Fasteners", &["Wood Screws", "Drywall Anchors", "Hex Bolts", "Washers"]),
    ("Paint", &["Primer", "Wall Paint", "Wood Stain", "Varnish"]),
    ("Electrical", &["Extension Cord", "LED Bulb", "Wall Switch", "Outlet Cover"]),
];

/// Size variants and the price they add
const SIZES: &[(&str, f64)] = &[("Small", 0.0), ("Medium", 2.5), ("Large", 5.0)];

const CLIENTS: &[(&str, &str, &str)] = &[
    ("Acme Builders", "555-0100", "orders@acme.example"),
    ("Northside Repairs", "555-0101", ""),
    ("J. Alvarez", "555-0102", "jalvarez@example.com"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir = String::from("./data");
    let mut username = String::from("demo");
    let mut password = String::from("demo");
    let mut count: usize = 25;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--username" | "-u" => {
                if i + 1 < args.len() {
                    username = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--products" | "-n" => {
                if i + 1 < args.len() {
                    count = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid product count '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <DIR>         Data directory (default: ./data)");
                println!("  -u, --username <NAME>    Account username (default: demo)");
                println!("  -p, --password <PASS>    Account password (default: demo)");
                println!("  -n, --products <N>       Number of products (default: 25)");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument '{other}' (try --help)"),
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Data dir: {}", data_dir);
    println!("Account:  {}", username);
    println!("Products: {}", count);
    println!();

    let store = Store::open(StoreConfig::new(&data_dir)).await?;
    println!("✓ Opened document store");

    let account = match store.accounts().register(&username, &password).await {
        Ok(account) => {
            println!("✓ Registered account {}", account.id);
            account
        }
        Err(StoreError::Duplicate { .. }) => {
            match store.accounts().verify_credentials(&username, &password).await? {
                Some(account) => {
                    println!("✓ Reusing existing account {}", account.id);
                    account
                }
                None => bail!("username '{username}' exists with a different password"),
            }
        }
        Err(e) => return Err(e.into()),
    };

    let existing = store.products().list(&account.id).await.len();
    if existing > 0 {
        println!("⚠ Account already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut product_ids = Vec::new();
    for (seed, fields) in generate_products().take(count).enumerate() {
        let name = fields.name.clone();
        match store.products().create(&account.id, fields).await {
            Ok(product) => product_ids.push(product.id),
            Err(e) => eprintln!("Failed to insert {} (#{}): {}", name, seed, e),
        }
    }
    println!("✓ Generated {} products", product_ids.len());

    let mut client_ids = Vec::new();
    for (name, phone, email) in CLIENTS {
        let client = store
            .clients()
            .create(
                &account.id,
                ClientFields {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    email: email.to_string(),
                    address: String::new(),
                },
            )
            .await?;
        client_ids.push(client.id);
    }
    println!("✓ Generated {} clients", client_ids.len());

    if let (Some(client_id), Some(product_id)) = (client_ids.first(), product_ids.first()) {
        let order = Order {
            client_id: client_id.clone(),
            lines: vec![OrderLine {
                product_id: product_id.clone(),
                quantity: 1,
            }],
        };
        let invoice = store.invoices().create(&account.id, &order).await?;
        println!("✓ Created sample invoice {}", invoice.invoice_number);
    }

    println!();
    println!("✓ Seed complete! Log in as '{}' to use it.", username);

    Ok(())
}

/// Endless stream of products cycling through categories and sizes.
fn generate_products() -> impl Iterator<Item = ProductFields> {
    let variants: Vec<(&str, &str, f64)> = CATEGORIES
        .iter()
        .flat_map(|(_, names)| names.iter())
        .flat_map(|name| SIZES.iter().map(move |(size, addon)| (*name, *size, *addon)))
        .collect();

    (0usize..).map(move |seed| {
        let (name, size, addon) = variants[seed % variants.len()];
        let round = seed / variants.len();

        // Base price 1.99 - 9.99, stock 5 - 104
        let base_price = 1.99 + ((seed * 17) % 800) as f64 / 100.0;
        let quantity = 5 + ((seed * 31) % 100) as i64;

        let name = if round == 0 {
            format!("{} {}", name, size)
        } else {
            format!("{} {} #{}", name, size, round + 1)
        };

        ProductFields {
            name,
            quantity,
            price: ((base_price + addon) * 100.0).round() / 100.0,
        }
    })
}
