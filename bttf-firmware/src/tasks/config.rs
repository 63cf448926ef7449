//! Config persistence task
//!
//! Owns the flash storage and writes config trees handed over through
//! [`CONFIG_SAVE`], keeping flash writes off the lamp's scheduler pass.

use defmt::*;

use crate::channels::CONFIG_SAVE;
use crate::config::ConfigPersistence;

#[embassy_executor::task]
pub async fn config_task(mut persistence: ConfigPersistence<'static>) {
    info!("Config task started");

    loop {
        let config = CONFIG_SAVE.wait().await;
        if let Err(e) = persistence.save(&config).await {
            error!("Failed to save configuration: {:?}", e);
        }
    }
}
