//! # Seed Data Generator
//!
//! Populates the key-value store with a sample inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockroom_dev.db
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path, mark the viewer as admin
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db --admin
//! ```
//!
//! Existing inventories are left alone unless `--force` is given.

use std::env;
use stockroom_core::{Inventory, ProductDraft, Unit};
use stockroom_db::{Database, DbConfig};

/// (category, [(name, price, quantity, unit)])
const SAMPLE: &[(&str, &[(&str, f64, i64, &str)])] = &[
    (
        "Grains",
        &[
            ("Rice", 2.5, 4, "kg"),
            ("Oats", 1.2, 10, "kg"),
            ("Quinoa", 6.75, 3, "kg"),
            ("Flour", 0.95, 20, "kg"),
        ],
    ),
    (
        "Dairy",
        &[
            ("Milk", 0.99, 12, "l"),
            ("Butter", 3.4, 6, "paquete"),
            ("Yogurt", 0.6, 24, "unidad"),
        ],
    ),
    (
        "Produce",
        &[
            ("Apples", 1.8, 15, "kg"),
            ("Onions", 0.7, 8, "kg"),
            ("Garlic", 0.25, 40, "unidad"),
        ],
    ),
    (
        "Pantry",
        &[
            ("Olive Oil", 8.9, 5, "l"),
            ("Canned Tomatoes", 1.1, 30, "caja"),
            ("Sugar", 1.5, 2, "lb"),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockroom_dev.db");
    let mut admin = false;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--admin" | "-a" => admin = true,
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -a, --admin        Store isAdmin = true");
                println!("  -f, --force        Replace an existing inventory");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.inventory().load().await?;
    if !existing.is_empty() && !force {
        println!("⚠ Database already has {} products", existing.products().len());
        println!("  Skipping seed to avoid overwriting them.");
        println!("  Pass --force to replace.");
        return Ok(());
    }

    let inventory = sample_inventory()?;
    db.inventory().save(&inventory).await?;

    println!(
        "✓ Stored {} products in {} categories",
        inventory.products().len(),
        inventory.categories().len()
    );

    if admin {
        db.session().set_admin_flag(true).await?;
        println!("✓ isAdmin = true");
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Builds the sample inventory in category order.
fn sample_inventory() -> Result<Inventory, stockroom_core::CoreError> {
    let mut inventory = Inventory::new();

    for (category, products) in SAMPLE {
        for (name, price, quantity, unit) in products.iter() {
            inventory.add_or_update_product(
                ProductDraft {
                    name: name.to_string(),
                    price: *price,
                    quantity: Some(*quantity),
                    unit: Unit::from(*unit),
                    category: category.to_string(),
                },
                None,
            )?;
        }
    }

    Ok(inventory)
}
