use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use crate::error::DoseError;

/// Default per-request timeout for outbound calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An HTTP client that only talks to approved hosts. Every outbound request
/// of the gather pass goes through here.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist and timeout.
    pub fn new() -> Result<Self, DoseError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DoseError> {
        let mut allowlist = HashSet::new();
        let domains = [
            "pubchem.ncbi.nlm.nih.gov", // PubChem PUG REST
            "www.ebi.ac.uk",            // ChEMBL
            "localhost",
            "127.0.0.1",
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("dosescope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DoseError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        debug!(domain = domain, "Allowlisting extra domain");
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Starts a GET request to an allowlisted URL.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, DoseError> {
        if !self.is_allowed(url) {
            warn!(url = url, "Blocked request to unlisted host");
            return Err(DoseError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
