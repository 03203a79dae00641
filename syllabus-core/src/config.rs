//! User configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarOptions;
use crate::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_PRODUCT_ID, DEFAULT_TITLE, DEFAULT_UID_DOMAIN};
use crate::error::{SyllabusError, SyllabusResult};
use crate::links::Provider;
use crate::zone::LocalZone;

static CONFIG_DIR_NAME: &str = "syllabus-cal";
static ENV_PREFIX: &str = "SYLLABUS_CAL";

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Configuration at ~/.config/syllabus-cal/config.toml
///
/// Every key is optional. `SYLLABUS_CAL_<KEY>` environment variables
/// override the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusConfig {
    #[serde(default = "default_product_id")]
    pub product_id: String,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    #[serde(default = "default_title")]
    pub default_title: String,

    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// IANA zone for rendering times; the system zone when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub default_provider: Provider,
}

impl Default for SyllabusConfig {
    fn default() -> Self {
        SyllabusConfig {
            product_id: default_product_id(),
            uid_domain: default_uid_domain(),
            default_title: default_title(),
            output_file: default_output_file(),
            timezone: None,
            default_provider: Provider::default(),
        }
    }
}

impl SyllabusConfig {
    pub fn config_path() -> SyllabusResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SyllabusError::Config("Could not determine config directory".into()))?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file means defaults.
    pub fn load() -> SyllabusResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (which may be missing) layered with the environment.
    pub fn load_from(path: &Path) -> SyllabusResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| SyllabusError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SyllabusError::Config(e.to_string()))
    }

    /// The effective settings as TOML, in the config file's format.
    pub fn to_toml(&self) -> SyllabusResult<String> {
        toml::to_string_pretty(self).map_err(|e| SyllabusError::Config(e.to_string()))
    }

    /// Write a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SyllabusResult<()> {
        let contents = format!(
            "\
# syllabus-cal configuration

# PRODID written into generated .ics files:
# product_id = \"{DEFAULT_PRODUCT_ID}\"

# Domain appended to event ids in UIDs:
# uid_domain = \"{DEFAULT_UID_DOMAIN}\"

# Title for events that have none:
# default_title = \"{DEFAULT_TITLE}\"

# Where `syllabus-cal ics` writes when no -o is given:
# output_file = \"{DEFAULT_OUTPUT_FILE}\"

# Zone used to turn syllabus times into UTC (defaults to the system zone):
# timezone = \"America/New_York\"

# Provider for `syllabus-cal links` (google or outlook):
# default_provider = \"google\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SyllabusError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SyllabusError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `output_file` with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output_file.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    pub fn zone(&self) -> SyllabusResult<LocalZone> {
        LocalZone::from_config(self.timezone.as_deref())
    }

    pub fn calendar_options(&self) -> SyllabusResult<CalendarOptions> {
        Ok(CalendarOptions {
            product_id: self.product_id.clone(),
            uid_domain: self.uid_domain.clone(),
            default_title: self.default_title.clone(),
            zone: self.zone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyllabusConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, SyllabusConfig::default());
    }

    #[test]
    fn test_default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        SyllabusConfig::create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = SyllabusConfig::load_from(&path).unwrap();
        assert_eq!(config, SyllabusConfig::default());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "timezone = \"Europe/Berlin\"\ndefault_provider = \"outlook\"\nuid_domain = \"example.edu\"\n",
        )
        .unwrap();

        let config = SyllabusConfig::load_from(&path).unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.default_provider, Provider::Outlook);
        assert_eq!(config.uid_domain, "example.edu");
        assert_eq!(config.product_id, DEFAULT_PRODUCT_ID);

        let options = config.calendar_options().unwrap();
        assert_eq!(options.zone, LocalZone::from_name("Europe/Berlin").unwrap());
    }

    #[test]
    fn test_printed_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = SyllabusConfig {
            default_title: "CS 101".to_string(),
            timezone: Some("America/Chicago".to_string()),
            ..SyllabusConfig::default()
        };
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        assert_eq!(SyllabusConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_timezone_surfaces_on_use() {
        let config = SyllabusConfig {
            timezone: Some("Nowhere/Special".to_string()),
            ..SyllabusConfig::default()
        };
        assert!(matches!(
            config.calendar_options(),
            Err(SyllabusError::UnknownTimezone(_))
        ));
    }
}
