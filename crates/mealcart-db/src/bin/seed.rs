//! # Seed Data Generator
//!
//! Populates the database with a demo catalog, recipes, and carts for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p mealcart-db --bin seed
//!
//! # Specify database path
//! cargo run -p mealcart-db --bin seed -- --db ./data/mealcart.db
//! ```
//!
//! ## Generated Data
//! - A small grocery catalog (prices in cents)
//! - Recipes referencing catalog products in a fixed order
//! - Two carts: one empty, one pre-filled with Tomatoes×1 + Onions×1
//!   (total 649) so add/remove flows can be exercised immediately

use std::env;

use chrono::Utc;
use uuid::Uuid;

use mealcart_core::{CartLineItem, Product, Recipe, RecipeItem};
use mealcart_db::{Database, DbConfig};

/// Demo catalog: (name, price in cents).
const PRODUCTS: &[(&str, i64)] = &[
    ("Tomatoes", 399),
    ("Onions", 250),
    ("Garlic", 180),
    ("Spaghetti", 320),
    ("Ground Beef", 899),
    ("Eggs", 450),
    ("Milk", 300),
    ("Cheddar Cheese", 550),
    ("Olive Oil", 1200),
    ("Basil", 275),
];

/// Demo recipes: (name, [(product name, quantity)]).
/// Item order is preserved as the recipe's stored order.
const RECIPES: &[(&str, &[(&str, i64)])] = &[
    ("Salad", &[("Tomatoes", 2), ("Onions", 1)]),
    (
        "Spaghetti Bolognese",
        &[
            ("Spaghetti", 1),
            ("Ground Beef", 1),
            ("Tomatoes", 3),
            ("Onions", 1),
            ("Garlic", 2),
        ],
    ),
    (
        "Omelette",
        &[("Eggs", 3), ("Milk", 1), ("Cheddar Cheese", 1)],
    ),
    ("Caprese", &[("Tomatoes", 2), ("Basil", 1), ("Olive Oil", 1)]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mealcart_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mealcart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mealcart_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mealcart Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Catalog
    println!();
    println!("Seeding catalog...");
    let now = Utc::now();
    let mut product_ids: Vec<(String, String)> = Vec::new(); // (name, id)

    for (name, price_cents) in PRODUCTS {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            price_cents: *price_cents,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
        product_ids.push(((*name).to_string(), product.id));
    }
    println!("  {} products", PRODUCTS.len());

    let id_of = |name: &str| -> String {
        product_ids
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.clone())
            .unwrap_or_default()
    };

    // Recipes
    println!("Seeding recipes...");
    for (name, items) in RECIPES {
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            items: items
                .iter()
                .map(|(product_name, quantity)| RecipeItem {
                    product_id: id_of(product_name),
                    product_name: (*product_name).to_string(),
                    unit_price_cents: 0, // snapshots come from the read-side join
                    quantity: *quantity,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        db.recipes().insert(&recipe).await?;
        println!("  {} ({} items)", name, items.len());
    }

    // Carts
    println!("Seeding carts...");
    let empty_cart = db.carts().create().await?;
    println!("  Empty cart: {}", empty_cart.id);

    let demo_cart = db.carts().create().await?;
    db.carts()
        .upsert_line_item(&CartLineItem::new(&demo_cart.id, &id_of("Tomatoes"), 1))
        .await?;
    db.carts()
        .upsert_line_item(&CartLineItem::new(&demo_cart.id, &id_of("Onions"), 1))
        .await?;
    db.carts().save_total(&demo_cart.id, 399 + 250).await?;
    println!("  Demo cart:  {} (Tomatoes×1 + Onions×1, total 649)", demo_cart.id);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
