//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `cardealer_core` wiring: config, logging, database, service.
//! - Print the current inventory as JSON for quick local sanity checks.

use cardealer_core::{init_from_config, CoreConfig, SqliteVehicleRepository, VehicleService};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;

    init_from_config(&config)?;

    let conn = config.open_database()?;
    let service = VehicleService::new(SqliteVehicleRepository::new(&conn));
    let vehicles = service.list_all()?;

    info!(
        "event=cli_list module=cli status=ok count={}",
        vehicles.len()
    );
    println!("cardealer_core version={}", cardealer_core::core_version());
    println!("{}", serde_json::to_string_pretty(&vehicles)?);
    Ok(())
}
