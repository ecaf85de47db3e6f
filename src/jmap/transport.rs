//! Session handshake and HTTP exchange.
//!
//! `JmapTransport` is the seam between the client and the network; the
//! real implementation speaks HTTPS, tests substitute a scripted one.

use log::{debug, info};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::Credentials;
use crate::error::JmapError;
use crate::jmap::protocol::{ApiRequest, ApiResponse, Session};

#[cfg_attr(test, mockall::automock)]
pub trait JmapTransport {
    /// One request/response round trip to the API endpoint.
    fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, JmapError>;

    /// Primary account id for the mail capability.
    fn account_id(&self) -> String;
}

pub struct HttpTransport {
    http: HttpClient,
    api_url: String,
    account_id: String,
}

impl HttpTransport {
    /// Establishes a session: fetches the well-known session resource and
    /// resolves the API endpoint plus the primary mail account. Fails
    /// fatally on any handshake error; no partial state, no retry.
    pub fn connect(credentials: &Credentials) -> Result<Self, JmapError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", credentials.token);
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|_| JmapError::Config("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| JmapError::Connection(e.to_string()))?;

        let session_url = format!("https://{}/.well-known/jmap", credentials.host);
        debug!("fetching session from {session_url}");

        let response = http
            .get(&session_url)
            .send()
            .map_err(|e| JmapError::Connection(format!("session request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(JmapError::Connection(format!(
                "session request to {} returned {}",
                credentials.host,
                response.status()
            )));
        }

        let session: Session = response
            .json()
            .map_err(|e| JmapError::Connection(format!("invalid session object: {e}")))?;
        let account_id = session.mail_account_id()?.to_string();

        info!(
            "connected to {} (account {account_id})",
            credentials.host
        );

        Ok(HttpTransport {
            http,
            api_url: session.api_url,
            account_id,
        })
    }
}

impl JmapTransport for HttpTransport {
    fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, JmapError> {
        debug!(
            "POST {} ({} method call(s))",
            self.api_url,
            request.method_calls.len()
        );

        let response = self.http.post(&self.api_url).json(request).send()?;
        if !response.status().is_success() {
            return Err(JmapError::Api(format!(
                "API endpoint returned {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| JmapError::UnexpectedResponse(format!("invalid API response: {e}")))
    }

    fn account_id(&self) -> String {
        self.account_id.clone()
    }
}
