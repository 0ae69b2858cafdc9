use crate::core::entry::InputError;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "soberscore.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub users: Vec<UserConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            users: vec![
                UserConfig::new("Tim", "🦄"),
                UserConfig::new("Rareș", "🦭"),
                UserConfig::new("Rebecca", "🐿️"),
            ],
        }
    }
}

impl Config {
    /// Looks a user up by name, ignoring case.
    pub fn user(&self, name: &str) -> Result<&UserConfig, InputError> {
        self.users
            .iter()
            .find(|user| user.name.to_lowercase() == name.trim().to_lowercase())
            .ok_or_else(|| {
                InputError::UnknownUser(
                    name.to_string(),
                    self.users
                        .iter()
                        .map(|user| user.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            })
    }

    /// Data directory, resolved against `base` when relative.
    pub fn data_dir(&self, base: &Path) -> PathBuf {
        if self.general.data_dir.is_absolute() {
            self.general.data_dir.clone()
        } else {
            base.join(&self.general.data_dir)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub data_dir: PathBuf,
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub name: String,
    pub icon: String,
}

impl UserConfig {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    if config.users.is_empty() {
        bail!("config file {} lists no users", path.display());
    }
    // user lookup ignores case, so names must differ by more than case
    let mut seen = HashSet::new();
    for user in &config.users {
        if !seen.insert(user.name.trim().to_lowercase()) {
            bail!(
                "config file {} lists user {:?} more than once",
                path.display(),
                user.name
            );
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let content = default_config_toml().unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.users, Config::default().users);
        assert_eq!(parsed.general.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[[users]]
name = "Ana"
"#,
        )
        .unwrap();
        assert_eq!(parsed.users, vec![UserConfig::new("Ana", "")]);
        assert!(!parsed.general.json);
        assert_eq!(parsed.general.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn finds_users_case_insensitively() {
        let cfg = Config::default();
        assert_eq!(cfg.user("rebecca").unwrap().icon, "🐿️");
        assert_eq!(cfg.user("RAREȘ").unwrap().name, "Rareș");
        assert!(matches!(cfg.user("Bob"), Err(InputError::UnknownUser(..))));
    }

    #[test]
    fn missing_cli_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("passed with --config"));
    }

    #[test]
    fn rejects_users_differing_only_in_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[[users]]
name = "Tim"
icon = "🦄"

[[users]]
name = "tim"
"#,
        )
        .unwrap();

        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn falls_back_to_defaults_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(None, dir.path()).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.users.len(), 3);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_default_config(&path).unwrap();
        assert!(write_default_config(&path).is_err());
        assert!(load_config(None, dir.path()).unwrap().source.is_some());
    }

    #[test]
    fn relative_data_dir_resolves_against_base() {
        let cfg = Config::default();
        assert_eq!(
            cfg.data_dir(Path::new("/srv/drinks")),
            PathBuf::from("/srv/drinks/data")
        );
    }
}
