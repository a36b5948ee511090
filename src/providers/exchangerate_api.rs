use crate::core::config::ProviderConfig;
use crate::core::{FetchError, RateProvider};
use crate::providers::util::with_retry;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

const RETRY_DELAY_MS: u64 = 500;

/// Client for the `/v4/latest/{BASE}` endpoint of exchangerate-api.com and
/// compatible services.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
}

impl ExchangeRateApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(ExchangeRateApiProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retries: config.retries,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    rates: Option<BTreeMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "LatestRatesFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<BTreeMap<String, f64>, FetchError> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting rates from {}", url);

        // Only transport failures are retried; a bad status or body will not improve.
        let response = with_retry(
            || async { self.client.get(&url).send().await },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if let Some(actual) = data.base {
            if !actual.eq_ignore_ascii_case(base) {
                return Err(FetchError::BaseMismatch {
                    expected: base.to_string(),
                    actual,
                });
            }
        }

        let rates = data.rates.ok_or(FetchError::MissingRates)?;
        debug!(count = rates.len(), "Received rates");
        Ok(rates)
    }
}
