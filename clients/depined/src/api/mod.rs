use anyhow::Result;
use core_logic::error::NetworkError;
use core_logic::metrics::MetricsCollector;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{error, info, warn};

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0",
];

// Picked once per process so every account presents the same browser.
static PROCESS_USER_AGENT: Lazy<&'static str> = Lazy::new(|| {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
});

/// Builds the tunneling agent for one proxy URI.
///
/// An unsupported scheme is a warning, not an error: the account then
/// proceeds unproxied.
pub fn proxy_agent(proxy: Option<&str>) -> Option<Proxy> {
    let uri = proxy?;

    if !(uri.starts_with("http://")
        || uri.starts_with("socks4://")
        || uri.starts_with("socks5://"))
    {
        warn!("Unsupported proxy type: {}", uri);
        return None;
    }

    match Proxy::all(uri) {
        Ok(agent) => Some(agent),
        Err(e) => {
            warn!("Invalid proxy {}: {}", uri, e);
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDetails {
    pub email: String,
    pub verified: bool,
    pub current_tier: String,
    pub points_balance: f64,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
}

/// Stateless wrapper around the Depined HTTP API.
///
/// One client per account: the proxy and the common header set are baked in
/// at construction. Every public operation absorbs its own failures - it
/// logs the best available detail and yields `None` instead of raising.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, proxy: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static(*PROCESS_USER_AGENT));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(agent) = proxy_agent(proxy) {
            builder = builder.proxy(agent);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Value, NetworkError> {
        let started = Instant::now();

        let response = request.send().await.map_err(|e| NetworkError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        MetricsCollector::global().record_api_latency(started.elapsed());

        let status = response.status();
        let body = response.text().await.map_err(|e| NetworkError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            // Prefer the server's structured error body over the bare status
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| status.to_string());

            return Err(NetworkError::HttpError {
                status_code: status.as_u16(),
                endpoint: endpoint.to_string(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| NetworkError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<Value, NetworkError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.execute(request, path).await
    }

    async fn get(&self, path: &str, token: &str) -> Result<Value, NetworkError> {
        let url = format!("{}{}", self.base_url, path);
        self.execute(self.http.get(&url).bearer_auth(token), path).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Option<Value> {
        let payload = json!({ "email": email, "password": password });
        match self.post("/api/user/register", None, &payload).await {
            Ok(body) => {
                info!("User registered successfully: {}", message_of(&body));
                Some(body)
            }
            Err(e) => {
                error!("Error registering user: {}", e);
                None
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Option<Value> {
        let payload = json!({ "email": email, "password": password });
        match self.post("/api/user/login", None, &payload).await {
            Ok(body) => {
                info!("User login successful: {}", message_of(&body));
                Some(body)
            }
            Err(e) => {
                error!("Error logging in user: {}", e);
                None
            }
        }
    }

    pub async fn create_profile(&self, token: &str, payload: &Value) -> Option<Value> {
        match self
            .post("/api/user/profile-creation", Some(token), payload)
            .await
        {
            Ok(body) => {
                info!("Profile created successfully: {}", message_of(&body));
                Some(body)
            }
            Err(e) => {
                error!("Error creating profile: {}", e);
                None
            }
        }
    }

    pub async fn confirm_referral(&self, token: &str, referral_code: &str) -> Option<Value> {
        let payload = json!({ "referral_code": referral_code });
        match self
            .post("/api/access-code/referal", Some(token), &payload)
            .await
        {
            Ok(body) => {
                info!("Referral confirmed successfully: {}", message_of(&body));
                Some(body)
            }
            Err(e) => {
                error!("Error confirming referral: {}", e);
                None
            }
        }
    }

    pub async fn get_user_info(&self, token: &str) -> Option<UserDetails> {
        let body = match self.get("/api/user/details", token).await {
            Ok(body) => body,
            Err(e) => {
                error!("Error fetching user info: {}", e);
                return None;
            }
        };

        let envelope: Envelope = match serde_json::from_value(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Error decoding user info: {}", e);
                return None;
            }
        };

        match envelope.data.map(serde_json::from_value::<UserDetails>) {
            Some(Ok(details)) => Some(details),
            Some(Err(e)) => {
                error!("Error decoding user info: {}", e);
                None
            }
            None => {
                error!("User info response carried no data");
                None
            }
        }
    }

    /// Fetches the current epoch earnings; yields the `data` payload.
    pub async fn get_earnings(&self, token: &str) -> Option<Value> {
        match self.get("/api/stats/epoch-earnings", token).await {
            Ok(body) => match serde_json::from_value::<Envelope>(body) {
                Ok(envelope) => envelope.data,
                Err(e) => {
                    error!("Error decoding earnings: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("Error fetching earnings: {}", e);
                None
            }
        }
    }

    /// Reports the "connected" heartbeat; yields the full response body.
    pub async fn send_heartbeat(&self, token: &str) -> Option<Value> {
        let payload = json!({ "connected": true });
        match self
            .post("/api/user/widget-connect", Some(token), &payload)
            .await
        {
            Ok(body) => Some(body),
            Err(e) => {
                error!("Error when updating connection: {}", e);
                None
            }
        }
    }
}

fn message_of(body: &Value) -> &str {
    body.get("message").and_then(Value::as_str).unwrap_or("ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_proxy_yields_no_agent() {
        assert!(proxy_agent(None).is_none());
    }

    #[test]
    fn test_http_proxy_yields_agent() {
        assert!(proxy_agent(Some("http://127.0.0.1:8080")).is_some());
    }

    #[test]
    fn test_socks_proxies_yield_agents() {
        assert!(proxy_agent(Some("socks5://127.0.0.1:1080")).is_some());
        assert!(proxy_agent(Some("socks4://127.0.0.1:1080")).is_some());
    }

    #[test]
    fn test_unsupported_scheme_yields_no_agent() {
        assert!(proxy_agent(Some("ftp://127.0.0.1:21")).is_none());
    }
}
