use std::{env, fs, path::Path};

use anyhow::anyhow;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Iso8601, OffsetDateTime, UtcOffset};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Settings {
    pub level: Option<String>,
    pub schedule_settings: ScheduleSettings,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Fixed UTC offset the storefront displays times in. Wall-clock values
    /// are never converted between zones; this only qualifies display and
    /// picks the current date for save validation.
    pub display_offset_hours: i8,
    pub display_offset_minutes: i8,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            display_offset_hours: -5,
            display_offset_minutes: 0,
        }
    }
}

impl ScheduleSettings {
    pub fn display_offset(&self) -> Result<UtcOffset, anyhow::Error> {
        UtcOffset::from_hms(self.display_offset_hours, self.display_offset_minutes, 0)
            .map_err(|e| anyhow!("invalid display offset in settings: {}", e))
    }
}

/// Load settings from a TOML file, falling back to defaults when no path is
/// given or the file does not exist.
pub fn get_settings(config_path: Option<String>) -> Result<Settings, anyhow::Error> {
    let Some(path) = config_path else {
        return Ok(Settings::default());
    };

    if !Path::new(&path).exists() {
        return Ok(Settings::default());
    }

    let content =
        fs::read_to_string(&path).map_err(|e| anyhow!("failed to read config {}: {}", path, e))?;
    toml::from_str(&content).map_err(|e| anyhow!("failed to parse config {}: {}", path, e))
}

pub fn setup_logger(
    level: Option<String>,
    filter_targets: Vec<String>,
) -> Result<(), fern::InitError> {
    let rust_log = get_log_level(level);
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc().format(&Iso8601::DEFAULT).unwrap(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .level(rust_log)
        .filter(move |metadata| {
            !filter_targets
                .iter()
                .any(|filter| metadata.target().starts_with(filter))
        })
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

pub fn get_log_level(level: Option<String>) -> LevelFilter {
    if let Some(level) = &level {
        match level.as_ref() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    } else {
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| String::from(""));
        match rust_log.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_config_path() {
        let settings = get_settings(None).unwrap();
        assert_eq!(settings.schedule_settings.display_offset_hours, -5);
        assert!(settings.schedule_settings.display_offset().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(get_log_level(Some("debug".into())), LevelFilter::Debug);
        assert_eq!(get_log_level(Some("nonsense".into())), LevelFilter::Info);
    }

    #[test]
    fn test_invalid_display_offset_is_an_error() {
        let settings = ScheduleSettings {
            display_offset_hours: 30,
            display_offset_minutes: 0,
        };
        assert!(settings.display_offset().is_err());
    }
}
