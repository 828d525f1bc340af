//! Saving and restoring profiles, shifts and whole ledgers.
//!
//! Values are encoded as JSON or YAML through their record forms, so
//! restoring revalidates every invariant: a profile with an out-of-range
//! month-end day, or a shift whose stored duration disagrees with its
//! timestamps, is rejected with [`EngineError::Serialization`].
//!
//! # Example
//!
//! ```
//! use shift_payroll::models::WageProfile;
//! use shift_payroll::persistence::{self, Format};
//! use rust_decimal::Decimal;
//!
//! let profile = WageProfile::with_wage(Decimal::from(40), 10).unwrap();
//! let text = persistence::to_string(&profile, Format::Yaml).unwrap();
//! let restored: WageProfile = persistence::from_str(&text, Format::Yaml).unwrap();
//!
//! assert_eq!(restored.hour_wage(), Decimal::from(40));
//! ```

mod record;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

pub use record::LedgerRecord;

/// Supported encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl Format {
    /// Picks a format from a file extension (`json`, `yaml` or `yml`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for Format {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(EngineError::Serialization {
                message: format!("unknown format '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}

/// Encodes `value` as text.
pub fn to_string<T: Serialize>(value: &T, format: Format) -> EngineResult<String> {
    let encoded = match format {
        Format::Json => serde_json::to_string_pretty(value).map_err(serialization)?,
        Format::Yaml => serde_yaml::to_string(value).map_err(serialization)?,
    };
    Ok(encoded)
}

/// Decodes a value from text, revalidating it.
pub fn from_str<T: DeserializeOwned>(text: &str, format: Format) -> EngineResult<T> {
    let value = match format {
        Format::Json => serde_json::from_str(text).map_err(serialization)?,
        Format::Yaml => serde_yaml::from_str(text).map_err(serialization)?,
    };
    Ok(value)
}

/// Writes `value` to `path`, replacing any existing file.
pub fn save<T: Serialize, P: AsRef<Path>>(path: P, value: &T, format: Format) -> EngineResult<()> {
    let path = path.as_ref();
    let encoded = to_string(value, format)?;
    fs::write(path, &encoded).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), %format, bytes = encoded.len(), "Saved record");
    Ok(())
}

/// Reads a value from `path`, revalidating it.
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P, format: Format) -> EngineResult<T> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    debug!(path = %path.display(), %format, bytes = text.len(), "Loading record");
    from_str(&text, format)
}

fn serialization<E: fmt::Display>(err: E) -> EngineError {
    EngineError::Serialization {
        message: err.to_string(),
    }
}

fn io_error(path: &Path, err: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
