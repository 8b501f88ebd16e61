pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{ImportSection, RegistryConfig, TomlConfig};
    use crate::utils::error::{ImportError, Result};
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "ban-import")]
    #[command(about = "Import EasyAdmin / vMenu ban exports into the player registry")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Export format: easyadmin or vmenu
        #[arg(long)]
        pub schema: Option<String>,

        /// Path to the JSON ban export
        #[arg(long)]
        pub banfile: Option<String>,

        /// Register bans by POSTing to this URL
        #[arg(long, conflicts_with = "output")]
        pub registry_url: Option<String>,

        /// Append bans as JSON lines to this file instead
        #[arg(long)]
        pub output: Option<String>,

        #[arg(long, help = "Validate and log bans without registering them")]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// 合併 TOML 與命令列參數，命令列優先
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => self.config_from_flags()?,
            };

            if let Some(schema) = &self.schema {
                config.import.schema = schema.clone();
            }
            if let Some(banfile) = &self.banfile {
                config.import.banfile = banfile.clone();
            }
            if let Some(url) = &self.registry_url {
                config.registry = RegistryConfig {
                    headers: config.registry.headers.take(),
                    timeout_seconds: config.registry.timeout_seconds,
                    ..RegistryConfig::http(url.clone())
                };
            } else if let Some(output) = &self.output {
                config.registry = RegistryConfig::file(output.clone());
            }

            config.validate()?;
            Ok(config)
        }

        fn config_from_flags(&self) -> Result<TomlConfig> {
            let missing = |field: &str| ImportError::MissingConfigError {
                field: format!("--{}", field),
            };

            let registry = match (&self.registry_url, &self.output) {
                (Some(url), _) => RegistryConfig::http(url.clone()),
                (None, Some(output)) => RegistryConfig::file(output.clone()),
                // dry-run 不會用到 registry
                (None, None) if self.dry_run => RegistryConfig::file("imported-bans.jsonl"),
                (None, None) => return Err(missing("registry-url or --output")),
            };

            Ok(TomlConfig {
                import: ImportSection {
                    schema: self.schema.clone().ok_or_else(|| missing("schema"))?,
                    banfile: self.banfile.clone().ok_or_else(|| missing("banfile"))?,
                },
                identifiers: None,
                registry,
                logging: None,
            })
        }
    }

}
