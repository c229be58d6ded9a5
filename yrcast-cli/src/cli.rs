use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use yrcast_core::{Config, Coordinate, Deliver, Dictionary, Mode, WeatherPipeline};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "yrcast", version, about = "met.no weather, flattened for a watch face")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the User-Agent and default location.
    Configure,

    /// Current temperature and condition.
    Current(Target),

    /// High, low and condition for the next 24 hours.
    Forecast(Target),
}

#[derive(Debug, Args)]
pub struct Target {
    /// Place name; falls back to the configured default location.
    #[arg(conflicts_with_all = ["lat", "lon"])]
    pub location: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// Plays the device: prints each delivered dictionary as JSON.
struct StdoutDelivery;

impl Deliver for StdoutDelivery {
    fn deliver(&self, dictionary: Dictionary) {
        match serde_json::to_string_pretty(&dictionary) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "Failed to encode dictionary"),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Current(target) => show(&config, target, Mode::Current).await,
            Command::Forecast(target) => show(&config, target, Mode::Forecast).await,
        }
    }
}

async fn show(config: &Config, target: Target, mode: Mode) -> anyhow::Result<()> {
    let pipeline = WeatherPipeline::from_config(config, Box::new(StdoutDelivery))
        .context("Invalid configuration")?;

    match (target.lat, target.lon) {
        (Some(lat), Some(lon)) => {
            pipeline.weather_for_coordinate(Coordinate::new(lat, lon), mode).await?;
        }
        _ => {
            let location = config.location_or_default(target.location)?;
            pipeline.weather_for_query(&location, mode).await?;
        }
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.user_agent = inquire::Text::new("User-Agent (met.no wants contact info):")
        .with_default(&config.user_agent)
        .prompt()?;

    let location = inquire::Text::new("Default location (empty for none):")
        .with_initial_value(config.default_location.as_deref().unwrap_or_default())
        .prompt()?;
    config.default_location = Some(location.trim().to_string()).filter(|l| !l.is_empty());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_negative_values() {
        let cli = Cli::parse_from(["yrcast", "forecast", "--lat", "-33.87", "--lon", "151.21"]);
        match cli.command {
            Command::Forecast(target) => {
                assert_eq!(target.lat, Some(-33.87));
                assert_eq!(target.lon, Some(151.21));
                assert!(target.location.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn latitude_requires_longitude() {
        assert!(Cli::try_parse_from(["yrcast", "current", "--lat", "63.4"]).is_err());
    }

    #[test]
    fn location_and_coordinates_conflict() {
        let res = Cli::try_parse_from(["yrcast", "current", "Oslo", "--lat", "1", "--lon", "2"]);
        assert!(res.is_err());
    }

    #[test]
    fn location_is_optional() {
        let cli = Cli::parse_from(["yrcast", "current"]);
        assert!(matches!(cli.command, Command::Current(Target { location: None, .. })));
    }
}
