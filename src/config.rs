use std::env;

use crate::error::Error;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_DATABASE_PATH: &str = "database.db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    Memory,
    Sqlite { path: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub storage: Storage,
}

impl Config {
    /// Reads `ADCOPY_*` variables, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Config, Error> {
        dotenvy::dotenv().ok();

        Config::from_lookup(|variable| env::var(variable).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup("ADCOPY_BIND_ADDRESS")
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let path = lookup("ADCOPY_DATABASE_PATH")
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let storage = match lookup("ADCOPY_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("sqlite") => Storage::Sqlite { path },
            Some("memory") => Storage::Memory,
            Some(other) => {
                return Err(Error::InvalidConfiguration {
                    variable: "ADCOPY_STORAGE".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            bind_address,
            storage,
        })
    }
}
