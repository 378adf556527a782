use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 1234)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Seconds of stream inactivity after which a keep-alive comment is sent
    /// to each connected client
    #[arg(long, env, default_value_t = 15)]
    pub sse_keep_alive_interval_secs: u64,

    /// Location label reported to clients asking where this station is
    #[arg(long, env, default_value = "Santa+Cruz")]
    pub station_location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn sse_keep_alive_interval(&self) -> Duration {
        Duration::from_secs(self.sse_keep_alive_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_station_setup() {
        let config = Config::parse_from(["weather_station_rs"]);

        assert_eq!(config.interface, "127.0.0.1");
        assert_eq!(config.port, 1234);
        assert_eq!(config.log_level_filter, LevelFilter::Info);
        assert_eq!(config.sse_keep_alive_interval(), Duration::from_secs(15));
        assert_eq!(config.station_location, "Santa+Cruz");
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "weather_station_rs",
            "--port",
            "8080",
            "--log-level-filter",
            "DEBUG",
            "--station-location",
            "Monterey",
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
        assert_eq!(config.station_location, "Monterey");
    }
}
