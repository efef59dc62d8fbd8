use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("splace.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub backend: Option<Backend>,
    pub storage: Option<Storage>,
    pub session: Option<Session>,
    pub places: Option<Places>,
    pub comments: Option<Comments>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Backend {
    pub url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default, deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl Default for Backend {
    fn default() -> Self {
        Config::default().backend.expect("Backend configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Storage {
    pub avatar_bucket: String,
}

impl Default for Storage {
    fn default() -> Self {
        Config::default().storage.expect("Storage configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Session {
    pub dir: PathBuf,
    #[serde(deserialize_with = "deserialize_duration")]
    pub refresh_margin: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Config::default().session.expect("Session configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Places {
    pub filter_mode: String,
}

impl Default for Places {
    fn default() -> Self {
        Config::default().places.expect("Places configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Comments {
    pub title_max_len: usize,
}

impl Default for Comments {
    fn default() -> Self {
        Config::default().comments.expect("Comments configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        let backend = cfg.backend.unwrap();
        assert!(backend.url.is_none());
        assert!(backend.api_key.is_none());
        assert_eq!(Some(Duration::from_secs(30)), backend.timeout);
        assert_eq!("user_avatars", cfg.storage.unwrap().avatar_bucket);
        let session = cfg.session.unwrap();
        assert_eq!(PathBuf::from(".splace"), session.dir);
        assert_eq!(Duration::from_secs(60), session.refresh_margin);
        assert_eq!("exclusive", cfg.places.unwrap().filter_mode);
        assert_eq!(50, cfg.comments.unwrap().title_max_len);
    }

    #[test]
    fn parse_partial_config() {
        let cfg: Config = toml::from_str(
            r#"
            [backend]
            url = "https://example.supabase.co"
            api-key = "anon"

            [places]
            filter-mode = "independent"
            "#,
        )
        .unwrap();
        let backend = cfg.backend.unwrap();
        assert_eq!(Some("anon"), backend.api_key.as_deref());
        assert!(backend.timeout.is_none());
        assert!(cfg.session.is_none());
        assert_eq!("independent", cfg.places.unwrap().filter_mode);
    }
}
