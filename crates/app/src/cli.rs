//! Command-line flags mapped onto a [`CityConfig`].
//!
//! `--config <file>` loads a JSON config first; individual flags then
//! override its fields.

use std::fmt;
use std::path::PathBuf;

use generation::{CityConfig, ConfigError};

pub const USAGE: &str = "\
usage: cityforge [options]

  --config <file>    JSON CityConfig to start from
  --size <s>         small | medium | large | xlarge
  --pattern <p>      grid | organic | radial | spiral | fractal | mixed
  --style <s>        modern | classical | futuristic | gothic | asian | mixed
  --density <f>      building density, 0..1
  --parks <f>        park ratio, 0..1
  --water <n>        number of water bodies
  --seed <n>         fixed seed for a reproducible city
  --width <f>        canvas width
  --height <f>       canvas height
  --pretty           indent the JSON output
  -h, --help         print this message";

#[derive(Debug)]
pub enum CliError {
    Help,
    MissingValue(String),
    UnknownFlag(String),
    BadNumber { flag: String, value: String },
    Config(ConfigError),
    Io { path: PathBuf, error: std::io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Help => write!(f, "{USAGE}"),
            CliError::MissingValue(flag) => write!(f, "{flag} needs a value"),
            CliError::UnknownFlag(flag) => write!(f, "unknown flag '{flag}'"),
            CliError::BadNumber { flag, value } => {
                write!(f, "{flag}: '{value}' is not a valid number")
            }
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Io { path, error } => write!(f, "cannot read {}: {error}", path.display()),
            CliError::Json(e) => write!(f, "invalid config JSON: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

#[derive(Debug, Default)]
pub struct CliArgs {
    pub config: CityConfig,
    pub pretty: bool,
}

fn number<T: std::str::FromStr>(flag: &str, value: String) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::BadNumber {
        flag: flag.to_string(),
        value,
    })
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    // The config file is the base layer, wherever it appears on the line.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = PathBuf::from(
                args.get(i + 1)
                    .ok_or_else(|| CliError::MissingValue("--config".to_string()))?,
            );
            let text = std::fs::read_to_string(&path).map_err(|error| CliError::Io {
                path: path.clone(),
                error,
            })?;
            serde_json::from_str(&text).map_err(CliError::Json)?
        }
        None => CityConfig::default(),
    };
    let mut pretty = false;

    let mut iter = args.into_iter();
    while let Some(flag) = iter.next() {
        if flag == "--pretty" {
            pretty = true;
            continue;
        }
        if flag == "-h" || flag == "--help" {
            return Err(CliError::Help);
        }
        let value = iter
            .next()
            .ok_or_else(|| CliError::MissingValue(flag.clone()))?;
        match flag.as_str() {
            "--config" => {}
            "--size" => config.city_size = value.parse()?,
            "--pattern" => config.road_pattern = value.parse()?,
            "--style" => config.building_style = value.parse()?,
            "--density" => config.building_density = number(&flag, value)?,
            "--parks" => config.park_ratio = number(&flag, value)?,
            "--water" => config.water_body_count = number(&flag, value)?,
            "--seed" => config.rng_seed = Some(number(&flag, value)?),
            "--width" => config.width = number(&flag, value)?,
            "--height" => config.height = number(&flag, value)?,
            _ => return Err(CliError::UnknownFlag(flag.clone())),
        }
    }

    Ok(CliArgs { config, pretty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use generation::{CitySize, RoadPattern};

    fn parse(line: &str) -> Result<CliArgs, CliError> {
        parse_args(line.split_whitespace().map(String::from))
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = parse("").expect("empty args");
        assert_eq!(args.config, CityConfig::default());
        assert!(!args.pretty);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse("--size large --pattern Spiral --water 3 --seed 42 --pretty")
            .expect("valid args");
        assert_eq!(args.config.city_size, CitySize::Large);
        assert_eq!(args.config.road_pattern, RoadPattern::Spiral);
        assert_eq!(args.config.water_body_count, 3);
        assert_eq!(args.config.rng_seed, Some(42));
        assert!(args.pretty);
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let err = parse("--pattern hexagonal").expect_err("bad pattern");
        assert!(matches!(
            err,
            CliError::Config(ConfigError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_bad_number_and_missing_value() {
        assert!(matches!(
            parse("--density lots"),
            Err(CliError::BadNumber { .. })
        ));
        assert!(matches!(parse("--seed"), Err(CliError::MissingValue(_))));
        assert!(matches!(parse("--bogus 1"), Err(CliError::UnknownFlag(_))));
    }
}
