//! Yahoo Finance chain provider
//!
//! Fetches the spot price, the list of listed expirations and one chain per
//! expiration through Yahoo Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{ChainSnapshot, OptionContract, OptionType, PositioningError, PositioningResult};

use super::ChainProvider;

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> PositioningResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| {
                PositioningError::network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        })
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Current spot price for a symbol
    pub fn get_spot(&self, symbol: &str) -> PositioningResult<f64> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self.get_json(&url, "quote")?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| {
                PositioningError::data(format!("No quote data returned for {}", symbol))
            })?;

        Ok(result.regular_market_price)
    }

    /// Listed expiration dates, in the order Yahoo returns them
    pub fn get_expirations(&self, symbol: &str) -> PositioningResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);

        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| {
                PositioningError::data(format!("No options data returned for {}", symbol))
            })?;

        Ok(chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect())
    }

    /// Contracts for one expiration, calls then puts
    pub fn get_contracts(
        &self,
        symbol: &str,
        expiry: NaiveDate,
    ) -> PositioningResult<Vec<OptionContract>> {
        // Yahoo keys expirations by midnight UTC
        let expiry_ts = expiry.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();

        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);

        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| {
                PositioningError::data(format!("No options data returned for {}", symbol))
            })?;

        let mut contracts = Vec::new();
        if let Some(options) = chain_data.options.first() {
            contracts.extend(
                options
                    .calls
                    .iter()
                    .filter_map(|d| convert_contract(d, expiry, OptionType::Call)),
            );
            contracts.extend(
                options
                    .puts
                    .iter()
                    .filter_map(|d| convert_contract(d, expiry, OptionType::Put)),
            );
        }

        Ok(contracts)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> PositioningResult<T> {
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PositioningError::network(e.to_string()))?
            .json()
            .map_err(|e| PositioningError::data(format!("Failed to parse {}: {}", what, e)))
    }
}

impl ChainProvider for YahooClient {
    fn fetch_snapshot(&self, symbol: &str) -> PositioningResult<ChainSnapshot> {
        let as_of = Utc::now();
        let spot = self.get_spot(symbol)?;
        let expiries = self.get_expirations(symbol)?;

        tracing::info!(symbol, spot, expirations = expiries.len(), "Fetching option chains");

        let mut contracts = Vec::new();
        for expiry in expiries {
            match self.get_contracts(symbol, expiry) {
                Ok(chain) => contracts.extend(chain),
                Err(e) => {
                    tracing::warn!("Failed to get chain for {}: {}", expiry, e);
                }
            }
        }

        ChainSnapshot::new(symbol, spot, as_of, contracts)
    }
}

/// Map one Yahoo row to a contract. Rows without a strike are dropped;
/// missing IV, volume and open interest count as zero.
fn convert_contract(
    data: &YahooOptionData,
    expiry: NaiveDate,
    option_type: OptionType,
) -> Option<OptionContract> {
    let strike = data.strike.filter(|s| *s > 0.0)?;

    Some(OptionContract {
        strike,
        option_type,
        expiry,
        implied_volatility: data
            .implied_volatility
            .filter(|iv| iv.is_finite() && *iv >= 0.0)
            .unwrap_or(0.0),
        volume: data.volume.map(|v| v.max(0) as u64).unwrap_or(0),
        open_interest: data.open_interest.map(|oi| oi.max(0) as u64).unwrap_or(0),
        symbol: data.contract_symbol.clone(),
    })
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_payload() {
        let json = r#"{
            "optionChain": {
                "result": [{
                    "expirationDates": [1750377600, 1758240000],
                    "options": [{
                        "calls": [
                            {"contractSymbol": "RKLB250620C00020000", "strike": 20.0,
                             "volume": 120, "openInterest": 900, "impliedVolatility": 0.91},
                            {"strike": 25.0}
                        ],
                        "puts": [
                            {"strike": 18.0, "volume": 40, "impliedVolatility": 1.02},
                            {"contractSymbol": "no-strike"}
                        ]
                    }]
                }]
            }
        }"#;

        let response: YahooOptionsResponse = serde_json::from_str(json).unwrap();
        let chain = response.option_chain.result.into_iter().next().unwrap();
        assert_eq!(chain.expiration_dates.len(), 2);

        let expiry = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let options = &chain.options[0];
        let calls: Vec<_> = options
            .calls
            .iter()
            .filter_map(|d| convert_contract(d, expiry, OptionType::Call))
            .collect();
        let puts: Vec<_> = options
            .puts
            .iter()
            .filter_map(|d| convert_contract(d, expiry, OptionType::Put))
            .collect();

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].open_interest, 900);
        assert_eq!(calls[0].symbol.as_deref(), Some("RKLB250620C00020000"));
        assert_eq!(calls[1].implied_volatility, 0.0);
        assert_eq!(calls[1].volume, 0);

        // Row without a strike is dropped
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].open_interest, 0);
        assert!(puts[0].is_put());
    }

    #[test]
    fn test_expiration_timestamps() {
        let date = DateTime::from_timestamp(1750377600, 0).unwrap().date_naive();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
    }

    #[test]
    fn test_unreachable_base_url_is_network_error() {
        // Nothing listens on the discard port
        let client = YahooClient::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9/v7/finance");
        assert_eq!(client.base_url, "http://127.0.0.1:9/v7/finance");

        let err = client.get_spot("RKLB").unwrap_err();
        assert!(matches!(err, PositioningError::Network(_)), "{:?}", err);
    }

    #[test]
    #[ignore] // Requires network
    fn test_fetch_snapshot() {
        let client = YahooClient::new().unwrap();
        let snapshot = client.fetch_snapshot("SPY").unwrap();

        assert!(snapshot.spot() > 0.0);
        assert!(!snapshot.expirations().is_empty());
    }
}
