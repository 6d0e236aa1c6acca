use crate::weather_data::error::WeatherDataError;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Performs a single GET and decodes the body as JSON.
///
/// Implementations must not retry: a failed request is reported to the caller
/// straight away.
pub trait JsonFetcher {
    fn fetch(&self, url: &str) -> Result<Value, WeatherDataError>;
}

/// [`JsonFetcher`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl JsonFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Value, WeatherDataError> {
        info!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(WeatherDataError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;
        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_str(&body).map_err(|source| WeatherDataError::JsonParse {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Clone)]
    pub(crate) enum Reply {
        Json(Value),
        Status(StatusCode),
    }

    /// Serves canned replies per URL and records every request made.
    pub(crate) struct StaticFetcher {
        replies: HashMap<String, Reply>,
        fallback: Reply,
        requests: RefCell<Vec<String>>,
    }

    impl StaticFetcher {
        pub(crate) fn new(fallback: Reply) -> Self {
            Self {
                replies: HashMap::new(),
                fallback,
                requests: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn with(mut self, url: &str, reply: Reply) -> Self {
            self.replies.insert(url.to_string(), reply);
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl JsonFetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> Result<Value, WeatherDataError> {
            self.requests.borrow_mut().push(url.to_string());
            match self.replies.get(url).unwrap_or(&self.fallback) {
                Reply::Json(value) => Ok(value.clone()),
                Reply::Status(status) => Err(WeatherDataError::HttpStatus {
                    url: url.to_string(),
                    status: *status,
                }),
            }
        }
    }

    /// Lets a test hand the fetcher to an owner and still read its requests.
    impl JsonFetcher for std::rc::Rc<StaticFetcher> {
        fn fetch(&self, url: &str) -> Result<Value, WeatherDataError> {
            self.as_ref().fetch(url)
        }
    }
}
