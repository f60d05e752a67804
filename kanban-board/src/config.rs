//! Allocator configuration loading using Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values (`AllocatorConfig::default()`)
//! 2. `position.toml` in the board storage root, if present
//! 3. Environment variables with the `KANBAN_POSITION_` prefix
//!
//! ```toml
//! gap = 65535.0
//! min_gap = 5.820766091346741e-11
//! ```

use crate::error::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use kanban_position::{AllocatorConfig, PositionAllocator};
use std::path::Path;
use tracing::{debug, trace};

/// Config file name looked up in the storage root
pub const CONFIG_FILE: &str = "position.toml";

/// Prefix for environment overrides, e.g. `KANBAN_POSITION_GAP`
pub const ENV_PREFIX: &str = "KANBAN_POSITION_";

/// Build the figment with all sources in precedence order
pub fn build_figment(root: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(AllocatorConfig::default()));

    if let Some(root) = root {
        let path = root.join(CONFIG_FILE);
        trace!("Loading config file: {}", path.display());
        figment = figment.merge(Toml::file(path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX))
}

/// Load and validate the allocator configuration
pub fn load_allocator_config(root: Option<&Path>) -> Result<AllocatorConfig> {
    let config: AllocatorConfig = build_figment(root).extract()?;
    config.validate()?;
    debug!(gap = config.gap, min_gap = config.min_gap, "loaded allocator config");
    Ok(config)
}

/// Load the configuration and build an allocator from it
pub fn load_allocator(root: Option<&Path>) -> Result<PositionAllocator> {
    Ok(PositionAllocator::new(load_allocator_config(root)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use kanban_position::{PositionError, DEFAULT_GAP};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let config = load_allocator_config(None).unwrap();
        assert_eq!(config, AllocatorConfig::default());
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "gap = 1024.0\n").unwrap();

        let config = load_allocator_config(Some(temp.path())).unwrap();
        assert_eq!(config.gap, 1024.0);
        assert_eq!(config.min_gap, AllocatorConfig::default().min_gap);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = load_allocator_config(Some(temp.path())).unwrap();
        assert_eq!(config.gap, DEFAULT_GAP);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "gap = 1024.0\n").unwrap();

        std::env::set_var("KANBAN_POSITION_GAP", "4096");
        let config = load_allocator_config(Some(temp.path()));
        std::env::remove_var("KANBAN_POSITION_GAP");

        assert_eq!(config.unwrap().gap, 4096.0);
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "gap = -1.0\n").unwrap();

        let result = load_allocator(Some(temp.path()));
        assert!(matches!(
            result,
            Err(BoardError::Position(PositionError::InvalidConfig { .. }))
        ));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "gap = \"wide\"\n").unwrap();

        let result = load_allocator_config(Some(temp.path()));
        assert!(matches!(result, Err(BoardError::Config(_))));
    }
}
