use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One polled account: an opaque bearer token plus its optional proxy URI.
///
/// Identity is the position in the token list. Immutable once built.
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    pub index: usize,
    pub token: String,
    pub proxy: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("index", &self.index)
            .field("token", &"***REDACTED***")
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Account {
    /// Pairs tokens with proxies round-robin: account `i` gets
    /// `proxies[i % proxies.len()]`, or no proxy when the list is empty.
    pub fn pair(tokens: Vec<String>, proxies: &[String]) -> Vec<Account> {
        tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                let proxy = if proxies.is_empty() {
                    None
                } else {
                    Some(proxies[index % proxies.len()].clone())
                };
                Account {
                    index,
                    token,
                    proxy,
                }
            })
            .collect()
    }

    /// Display id, 1-based like the log output of the original CLI.
    pub fn id(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    pub base_url: String,
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.depined.org".to_string(),
            interval_secs: 30,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
