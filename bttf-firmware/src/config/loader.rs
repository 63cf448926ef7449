//! Configuration persistence
//!
//! Loads the host config tree from flash storage and saves it back.
//! Falls back to the defaults compiled from lamp.toml if flash is empty.

use defmt::*;

use bttf_core::config::ConfigRoot;
use bttf_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
// Import the FlashStorage trait to bring methods into scope
use bttf_hal_rp2040::FlashStorageTrait;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 256;

/// Defaults compiled from lamp.toml by the build script
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/lamp_config.bin"));

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// Config version mismatch
    VersionMismatch(u8),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Load the config tree from flash, or the embedded defaults
    pub async fn load_or_default(&mut self) -> ConfigRoot {
        match self.load().await {
            Ok(config) => {
                info!("Loaded configuration from flash");
                config
            }
            Err(ConfigError::Flash(FlashError::NotFound)) => {
                info!("No configuration in flash, using embedded defaults");
                embedded_defaults()
            }
            Err(e) => {
                warn!("Failed to load configuration: {:?}, using embedded defaults", e);
                embedded_defaults()
            }
        }
    }

    /// Load the config tree from flash
    pub async fn load(&mut self) -> Result<ConfigRoot, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::LampConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of config from flash", len);

        let config: ConfigRoot =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if config.version != ConfigRoot::VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version,
                ConfigRoot::VERSION
            );
            return Err(ConfigError::VersionMismatch(config.version));
        }

        log_config_summary(&config);
        Ok(config)
    }

    /// Save the config tree to flash
    pub async fn save(&mut self, config: &ConfigRoot) -> Result<(), ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let bytes = postcard::to_slice(config, &mut buffer).map_err(|_| ConfigError::Serialize)?;

        debug!("Saving {} bytes of config to flash", bytes.len());

        self.storage.write(StorageKey::LampConfig, bytes).await?;

        info!("Saved configuration to flash");
        Ok(())
    }
}

/// Defaults compiled into the firmware
pub fn embedded_defaults() -> ConfigRoot {
    match postcard::from_bytes(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(_) => {
            // Only possible if the build script and firmware disagree on the layout
            error!("Embedded configuration is corrupt, using built-in defaults");
            ConfigRoot::new()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ConfigRoot) {
    debug!("  UTC offset: {} h", config.time.utc_offset_h);
    match &config.lamp {
        Some(lamp) => debug!("  Lamp: {}", lamp),
        None => debug!("  Lamp: no section"),
    }
}
