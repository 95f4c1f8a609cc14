use crate::utils::credentials::load_lines;
use std::path::Path;
use tracing::{info, warn};

pub struct ProxyManager;

impl ProxyManager {
    /// Loads proxy URIs from the given file.
    /// Format expected: one URI per line, schemes http://, socks4://, socks5://.
    ///
    /// A missing or unreadable file is a warning, not an error: every
    /// account then runs unproxied.
    pub fn load(path: &str) -> Vec<String> {
        match load_lines(Path::new(path)) {
            Ok(proxies) => {
                info!("Loaded {} proxies from {}", proxies.len(), path);
                proxies
            }
            Err(e) => {
                warn!("{}. Running without proxies.", e);
                Vec::new()
            }
        }
    }
}
