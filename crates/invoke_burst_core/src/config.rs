use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Parameters of one invocation run.
///
/// Field names follow the `config.json` layout (`Region`, `Profile`,
/// `Function`, `ResultFile`, `CallCount`) and are matched regardless of
/// ASCII case. Missing or `null` fields keep their zero value, so an absent
/// `CallCount` is a valid run with no invocations. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub region: String,
    pub profile: String,
    pub function: String,
    pub result_file: PathBuf,
    pub call_count: usize,
}

impl RunConfig {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl<'de> Deserialize<'de> for RunConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;

        let mut config = RunConfig::default();
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            match key.to_ascii_lowercase().as_str() {
                "region" => config.region = field_value(value, "Region")?,
                "profile" => config.profile = field_value(value, "Profile")?,
                "function" => config.function = field_value(value, "Function")?,
                "resultfile" => config.result_file = field_value(value, "ResultFile")?,
                "callcount" => config.call_count = field_value(value, "CallCount")?,
                _ => {}
            }
        }
        Ok(config)
    }
}

fn field_value<T: DeserializeOwned, E: serde::de::Error>(value: Value, name: &str) -> Result<T, E> {
    serde_json::from_value(value).map_err(|error| E::custom(format!("invalid {name}: {error}")))
}

/// Read and parse the run configuration at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    RunConfig::from_json_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
