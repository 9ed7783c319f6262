//! Seed the database with a demo catalog and player roster.
//!
//! Intended for local development and manual testing; running it twice
//! inserts the rows twice.

use rust_decimal::Decimal;

use matchday_api::db::create_pool;
use matchday_api::db::players::PlayerRepository;
use matchday_api::db::products::ProductRepository;
use matchday_core::{Price, ProductCategory};

use super::database_url;

/// name, price, category, stock
const PRODUCTS: &[(&str, &str, ProductCategory, i32)] = &[
    ("Velocity Pro FG Boots", "8500.00", ProductCategory::Boots, 12),
    ("Classic Home Jersey 2025", "3200.00", ProductCategory::Jersey, 40),
    ("Away Jersey 2025", "3200.00", ProductCategory::Jersey, 35),
    ("Keeper Gloves", "1500.00", ProductCategory::Accessories, 20),
    ("Shin Guards", "650.00", ProductCategory::Accessories, 50),
];

/// name, position
const PLAYERS: &[(&str, &str)] = &[
    ("Anjan Bista", "Forward"),
    ("Kiran Chemjong", "Goalkeeper"),
    ("Rohit Chand", "Midfielder"),
    ("Ananta Tamang", "Defender"),
];

/// Insert the demo rows.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL or an
/// insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    for &(name, price, category, stock) in PRODUCTS {
        let price = Price::new(price.parse::<Decimal>()?)?;
        let image = format!(
            "https://cdn.matchday.store/products/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        );
        let product = products
            .create(name, price, &[image], category, stock)
            .await?;
        tracing::info!(product_id = %product.id, name, "seeded product");
    }

    let players = PlayerRepository::new(&pool);
    for &(name, position) in PLAYERS {
        let image = format!(
            "https://cdn.matchday.store/players/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        );
        let id = players.create(name, position, &image).await?;
        tracing::info!(player_id = %id, name, "seeded player");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}
