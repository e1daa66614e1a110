use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;

pub const DEFAULT_CONFIGURATION_FILE: &str = "./configuration/client.toml";
const DEFAULT_NAMESPACE: &str = "wp-json/bzalpha/v1";
const DEFAULT_COOKIE_FILE: &str = "./.bzalpha/cookies";
const DEFAULT_LOG_DIR: &str = "./logs";

/// Everything the panel needs to reach the backend. The TOML file holds the
/// deployment defaults and the environment (or `.env`) overrides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    /// Only the commands that talk to the backend need it.
    pub api_url: Option<String>,
    pub namespace: String,
    pub cookie_file: PathBuf,
    pub log_dir: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ClientConfigurationToml {
    api_url: Option<String>,
    namespace: Option<String>,
    cookie_file: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl ClientConfiguration {
    /// Reads `path`, or the default configuration file when it exists, and
    /// applies `API_URL`, `BZALPHA_COOKIE_FILE` and `BZALPHA_LOG_DIR`.
    pub fn read_config(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?,
            ),
            None => {
                let default_path = Path::new(DEFAULT_CONFIGURATION_FILE);
                if default_path.is_file() {
                    Some(std::fs::read_to_string(default_path).with_context(|| {
                        format!("Could not read {}", default_path.display())
                    })?)
                } else {
                    None
                }
            }
        };

        Self::from_sources(contents.as_deref(), |key| dotenvy::var(key).ok())
    }

    pub fn from_sources<F>(toml_contents: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ClientConfigurationToml = match toml_contents {
            Some(contents) => {
                toml::from_str(contents).context("The client configuration is not valid TOML")?
            }
            None => ClientConfigurationToml::default(),
        };

        let api_url = env("API_URL")
            .or(file.api_url)
            .map(|api_url| api_url.trim().trim_end_matches('/').to_string())
            .filter(|api_url| !api_url.is_empty());

        let namespace = file
            .namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
            .trim_matches('/')
            .to_string();

        let cookie_file = env("BZALPHA_COOKIE_FILE")
            .map(PathBuf::from)
            .or(file.cookie_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COOKIE_FILE));

        let log_dir = env("BZALPHA_LOG_DIR")
            .map(PathBuf::from)
            .or(file.log_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(ClientConfiguration {
            api_url,
            namespace,
            cookie_file,
            log_dir,
        })
    }

    /// `{api_url}/{namespace}/`, the base every route is joined onto.
    pub fn api_base(&self) -> Result<String> {
        let Some(api_url) = &self.api_url else {
            bail!("API_URL is neither set in the environment nor in the configuration file");
        };
        Ok(format!("{}/{}/", api_url, self.namespace))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_read_config_from_toml() {
        let contents = r#"
            api_url = "https://crew.example.com/"
            cookie_file = "/tmp/bzalpha-cookies"
        "#;

        let configuration = ClientConfiguration::from_sources(Some(contents), env_from(&[])).unwrap();

        assert_eq!(configuration.api_url.as_deref(), Some("https://crew.example.com"));
        assert_eq!(configuration.namespace, "wp-json/bzalpha/v1");
        assert_eq!(configuration.cookie_file, PathBuf::from("/tmp/bzalpha-cookies"));
        assert_eq!(configuration.log_dir, PathBuf::from("./logs"));
        assert_eq!(
            configuration.api_base().unwrap(),
            "https://crew.example.com/wp-json/bzalpha/v1/"
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let contents = r#"api_url = "https://staging.example.com""#;

        let configuration = ClientConfiguration::from_sources(
            Some(contents),
            env_from(&[("API_URL", "http://localhost:8080"), ("BZALPHA_LOG_DIR", "/var/log/bz")]),
        )
        .unwrap();

        assert_eq!(configuration.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(configuration.log_dir, PathBuf::from("/var/log/bz"));
    }

    #[test]
    fn test_missing_api_url_only_fails_the_backend() {
        let configuration = ClientConfiguration::from_sources(
            None,
            env_from(&[("API_URL", "  "), ("BZALPHA_COOKIE_FILE", "/tmp/jar")]),
        )
        .unwrap();

        assert_eq!(configuration.api_url, None);
        assert_eq!(configuration.cookie_file, PathBuf::from("/tmp/jar"));
        assert!(configuration.api_base().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(
            ClientConfiguration::from_sources(Some("apiurl = \"typo\""), env_from(&[])).is_err()
        );
    }
}
