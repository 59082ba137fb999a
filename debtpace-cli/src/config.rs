use anyhow::{Context, Result};
use debtpace_core::{today_in, EngineConfig};
use debtpace_habits::AnalyticsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_debtpace_home;

/// `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub analytics: AnalyticsConfig,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA zone used for "today" in payoff dates.
    pub timezone: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.engine.validate().context("[engine]")?;
        self.analytics.validate().context("[analytics]")?;
        today_in(&self.display.timezone).context("[display]")?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_debtpace_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `path`, or the default location. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("load {}", p.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse_config(
            r#"
[engine]
max_payoff_months = 600

[analytics]
low_consistency = 40
"#,
        )
        .unwrap();
        assert_eq!(cfg.engine.max_payoff_months, 600);
        assert_eq!(cfg.engine.weeks_per_month, 4.33);
        assert_eq!(cfg.analytics.low_consistency, 40);
        assert_eq!(cfg.analytics.high_consistency, 80);
        assert_eq!(cfg.display.timezone, "America/Chicago");
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(s.contains("[engine]"));
        assert!(s.contains("[display]"));
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse_config("[engine]\nmax_payoff_months = 0\n").is_err());
        assert!(parse_config("[display]\ntimezone = \"Mars/Olympus\"\n").is_err());
        assert!(parse_config("[analytics]\nlow_consistency = 90\nhigh_consistency = 10\n").is_err());
    }

    #[test]
    fn test_init_writes_once() {
        let dir = std::env::temp_dir().join(format!("debtpace-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        init_config(Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());

        fs::write(&path, "[display]\ntimezone = \"UTC\"\n").unwrap();
        init_config(Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().display.timezone, "UTC");
    }
}
