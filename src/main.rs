mod error;
mod models;
mod store;

use store::{HttpRecordStore, ListingFilters, PropertyGateway, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Property Scout - Record Store Gateway");
    info!("=========================================");
    info!("");

    let config = StoreConfig::from_env()?;
    let store = HttpRecordStore::new(config)?;
    let gateway = PropertyGateway::new(store);

    // Showcase query: listings with at least two bedrooms under 900k
    let filters = ListingFilters {
        min_beds: Some(2),
        max_price: Some(900_000.0),
        ..Default::default()
    };

    info!("Fetching listings from the record store...");
    let properties = gateway.fetch_all(&filters).await?;
    info!("\n✅ Fetched {} properties\n", properties.len());

    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} ({} USD)", i + 1, property.title, property.price);
        println!(
            "   {} bed, {} bath, {} sqft",
            property.bedrooms, property.bathrooms, property.square_feet
        );
        println!(
            "   {}, {}, {} {}",
            property.address, property.city, property.state, property.zip_code
        );
        let amenities = property.amenities.normalize();
        if !amenities.is_empty() {
            println!("   Amenities: {}", amenities.join(", "));
        }
        println!();
    }

    // Facets the search UI builds its filter controls from
    let types = gateway.distinct_property_types().await;
    let range = gateway.price_range().await;
    info!("Property types on offer: {}", types.join(", "));
    info!("Price range: {} - {} USD", range.min, range.max);

    // Save a listing snapshot
    let json = serde_json::to_string_pretty(&properties)?;
    tokio::fs::write("listings.json", json).await?;
    info!("💾 Saved listing snapshot to listings.json");

    Ok(())
}
