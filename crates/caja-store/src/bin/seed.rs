//! # Seed Data Generator
//!
//! Populates a blob-store directory with demo stationery products for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default data directory
//! cargo run -p caja-store --bin seed
//!
//! # Specify a data directory
//! cargo run -p caja-store --bin seed -- --dir ./data
//! ```
//!
//! Each product gets a unique code, a Spanish name, a realistic COP price
//! and a stock level — some of them deliberately at or below their
//! restock threshold so the alert panel has something to show.

use std::env;

use tracing_subscriber::EnvFilter;

use caja_core::ProductDraft;
use caja_store::{JsonFileStore, PosService};

/// Demo catalog: (code, name, brand, category, buy, sell, stock, min).
const PRODUCTS: &[(&str, &str, &str, &str, f64, f64, i64, i64)] = &[
    ("CUA-001", "Cuaderno Argollado 100h", "Norma", "Escolar", 3200.0, 4500.0, 24, 5),
    ("CUA-002", "Cuaderno Cosido 50h", "Scribe", "Escolar", 1400.0, 2000.0, 40, 10),
    ("LAP-001", "Lápiz HB", "Mirado", "Escolar", 400.0, 700.0, 120, 20),
    ("LAP-002", "Portaminas 0.5mm", "Faber-Castell", "Escolar", 2800.0, 4200.0, 15, 4),
    ("BOL-001", "Bolígrafo Negro", "Kilométrico", "Oficina", 600.0, 1000.0, 80, 15),
    ("BOL-002", "Bolígrafo Gel Azul", "Pilot", "Oficina", 2100.0, 3500.0, 18, 6),
    ("RES-001", "Resma Carta 500h", "Reprograf", "Oficina", 11500.0, 16000.0, 12, 3),
    ("MAR-001", "Marcador Permanente", "Sharpie", "Oficina", 2300.0, 3800.0, 30, 8),
    ("COL-001", "Caja Colores x12", "Prismacolor", "Arte", 9800.0, 14500.0, 9, 3),
    ("TEM-001", "Témperas x6", "Payasito", "Arte", 4100.0, 6500.0, 7, 4),
    ("PIN-001", "Pincel Redondo No. 4", "Toto", "Arte", 1200.0, 2200.0, 2, 5),
    ("TIJ-001", "Tijeras Escolares", "Barrilito", "Escolar", 1800.0, 3000.0, 1, 4),
    ("PEG-001", "Pegante en Barra 40g", "Pritt", "Escolar", 2600.0, 4000.0, 0, 6),
    ("CAR-001", "Carpeta Plastificada", "Normarfil", "Oficina", 900.0, 1500.0, 55, 10),
    ("GRA-001", "Grapadora Mediana", "Rank", "Oficina", 7400.0, 11000.0, 5, 2),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut dir = String::from("./caja_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Caja POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory (default: ./caja_data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Caja POS Seed Data Generator");
    println!("============================");
    println!("Data directory: {}", dir);
    println!();

    let store = JsonFileStore::open(&dir)?;
    let mut service = PosService::open(store)?;

    let existing = service.state().catalog.len();
    if existing > 0 {
        println!("! Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data directory to regenerate.");
        return Ok(());
    }

    let mut created = 0;
    for &(code, name, brand, category, buy, sell, stock, min) in PRODUCTS {
        let draft = ProductDraft {
            code: code.to_string(),
            name: name.to_string(),
            brand: Some(brand.to_string()),
            material_type: Some(category.to_string()),
            buy_price: buy,
            sell_price: sell,
            stock,
            min_stock: min,
        };
        match service.create_product(draft) {
            Ok(_) => created += 1,
            Err(e) => eprintln!("Failed to create {}: {}", code, e),
        }
    }

    println!("✓ Created {} products", created);

    let alerts = service.restock_alerts();
    println!("✓ {} products currently need restocking:", alerts.len());
    for product in alerts {
        println!("  {} — stock {} (min {})", product.name, product.stock, product.min_stock);
    }

    println!();
    println!("✓ Seed complete!");
    Ok(())
}
