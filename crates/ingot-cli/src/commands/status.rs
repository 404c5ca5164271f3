//! `ingot status`: passage store counters

use anyhow::Result;
use ingot_core::Database;
use std::path::Path;

pub fn run(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("No passage store at {}", db_path.display());
        return Ok(());
    }

    let db = Database::open(db_path)?;
    db.initialize()?;
    let status = db.status()?;

    println!("Passage store: {}", db_path.display());
    println!("  passages: {}", status.passages);
    println!("  embedded: {}", status.embedded);
    if let Some(updated_at) = status.last_updated_at {
        println!("  last updated: {updated_at}");
    }

    Ok(())
}
