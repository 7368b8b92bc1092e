//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `CLARITY_*` variables (e.g. `CLARITY_PROVIDER__BASE_URL`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./clarity.toml` or `./.clarity.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/clarity/config.toml`
    ///    (fallback `~/.config/clarity/config.toml`)
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Global config (XDG or fallback), only when present
        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        // Project-level config file
        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        // Explicit config path beats the discovered files
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment wins over everything; `__` separates nested keys
        figment = figment.merge(Env::prefixed("CLARITY_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/clarity/config.toml if set,
    /// otherwise falls back to ~/.config/clarity/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("clarity").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["clarity.toml", ".clarity.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./clarity.toml or ./.clarity.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "[FOUND]" } else { "[     ]" };
            println!("  {} Global:  {}", marker, path.display());
        }

        println!("  [     ] Env:     CLARITY_* variables");
        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.conversation.max_turns, 8);
        assert!(!config.wrapup.use_model_classifier);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("clarity"));
    }
}
