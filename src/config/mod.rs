use anyhow::{anyhow, Result};
use splace_core::app::{FilterMode, Settings};
use splace_gateways::BackendConfig;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "splace.toml";

const ENV_NAME_BACKEND_URL: &str = "SPLACE_BACKEND_URL";
const ENV_NAME_BACKEND_API_KEY: &str = "SPLACE_BACKEND_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Config {
    pub backend: Backend,
    pub storage: Storage,
    pub session: Session,
    pub places: Places,
    pub comments: Comments,
}

pub struct Backend {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

pub struct Storage {
    pub avatar_bucket: String,
}

pub struct Session {
    /// File system directory of the stored session
    pub dir: PathBuf,
    pub refresh_margin: Duration,
}

pub struct Places {
    pub filter_mode: FilterMode,
}

pub struct Comments {
    pub title_max_len: usize,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::debug!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::debug!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let env_url = env::var(ENV_NAME_BACKEND_URL).ok();
        let env_api_key = env::var(ENV_NAME_BACKEND_API_KEY).ok();
        Self::try_from_raw(raw_config, env_url, env_api_key)
    }

    /// Values from the environment take precedence over the file.
    fn try_from_raw(
        from: raw::Config,
        env_url: Option<String>,
        env_api_key: Option<String>,
    ) -> Result<Self> {
        let raw::Config {
            backend,
            storage,
            session,
            places,
            comments,
        } = from;

        let raw::Backend {
            url,
            api_key,
            timeout,
        } = backend.unwrap_or_default();
        let url = non_empty(env_url)
            .or(non_empty(url))
            .ok_or_else(|| anyhow!("Missing backend URL (set {ENV_NAME_BACKEND_URL})"))?;
        let api_key = non_empty(env_api_key)
            .or(non_empty(api_key))
            .ok_or_else(|| anyhow!("Missing backend API key (set {ENV_NAME_BACKEND_API_KEY})"))?;
        let backend = Backend {
            url,
            api_key,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        };

        let raw::Storage { avatar_bucket } = storage.unwrap_or_default();
        let storage = Storage { avatar_bucket };

        let raw::Session {
            dir,
            refresh_margin,
        } = session.unwrap_or_default();
        let session = Session {
            dir,
            refresh_margin,
        };

        let raw::Places { filter_mode } = places.unwrap_or_default();
        let places = Places {
            filter_mode: filter_mode.parse()?,
        };

        let raw::Comments { title_max_len } = comments.unwrap_or_default();
        if title_max_len == 0 {
            return Err(anyhow!("The maximum length of comment titles must not be 0"));
        }
        let comments = Comments { title_max_len };

        Ok(Self {
            backend,
            storage,
            session,
            places,
            comments,
        })
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            url: self.backend.url.clone(),
            api_key: self.backend.api_key.clone(),
            timeout: self.backend.timeout,
            refresh_margin: self.session.refresh_margin,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            filter_mode: self.places.filter_mode,
            title_max_len: self.comments.title_max_len,
            avatar_bucket: self.storage.avatar_bucket.clone(),
            ..Default::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
