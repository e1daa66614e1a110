use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::ClientError;
use crate::ClientResult;

const TOKEN_COOKIE: &str = "token";

/// Bearer credential issued by the WordPress JWT plugin.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

/// Splits a cookie string (`name=value; other=value`) into its pairs.
/// Newlines separate cookies as well, so a file with one cookie per line
/// reads the same as a single header line.
pub fn parse_cookies(contents: &str) -> BTreeMap<String, String> {
    contents
        .split([';', '\n'])
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Cookie storage persisted on disk. Nothing is cached: the token is read
/// again for every call so a `token set` from another shell is picked up.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_token(&self) -> ClientResult<AuthToken> {
        let cookies = self.read_cookies()?;
        match cookies.get(TOKEN_COOKIE) {
            Some(token) if !token.is_empty() => Ok(AuthToken::new(token.clone())),
            _ => Err(ClientError::MissingToken(self.path.clone())),
        }
    }

    /// Replaces the token cookie and keeps every other cookie in the jar.
    pub fn store_token(&self, token: &AuthToken) -> ClientResult<()> {
        let mut cookies = self.read_cookies()?;
        cookies.insert(TOKEN_COOKIE.to_string(), token.as_str().to_string());
        self.write_cookies(&cookies)
    }

    pub fn clear_token(&self) -> ClientResult<()> {
        let mut cookies = self.read_cookies()?;
        if cookies.remove(TOKEN_COOKIE).is_some() {
            self.write_cookies(&cookies)?;
        }
        Ok(())
    }

    fn read_cookies(&self) -> ClientResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(parse_cookies(&contents)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "cookie file does not exist yet");
                Ok(BTreeMap::new())
            }
            Err(source) => Err(ClientError::CookieFile {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_cookies(&self, cookies: &BTreeMap<String, String>) -> ClientResult<()> {
        let to_error = |source| ClientError::CookieFile {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(to_error)?;
        }
        let contents = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        std::fs::write(&self.path, contents + "\n").map_err(to_error)
    }
}
