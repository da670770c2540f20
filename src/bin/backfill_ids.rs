//! Assigns unique ids to every user, property and material that lacks one, then exits.

use apm_backend::{config::Config, domain::models::identity::EntityKind, infra::factory::bootstrap_state};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _guard = apm_backend::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let state = match bootstrap_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    for kind in EntityKind::ALL {
        match state.backfill_service.run(kind).await {
            Ok(report) => info!("{}: scanned {}, assigned {}", kind, report.scanned, report.assigned),
            Err(e) => {
                error!("Backfill of {} aborted: {}", kind, e);
                std::process::exit(1);
            }
        }
    }
}
