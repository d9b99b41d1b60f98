// src/client/alpha_vantage.rs

use super::error::FetchError;
use super::provider::QuoteProvider;
use super::rate_limit::RateLimiter;
use crate::config::{
    ALPHA_VANTAGE_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_REQUESTS_PER_MINUTE, USER_AGENT,
};
use crate::series::{Candle, PriceSeries};
use crate::stocks::Quote;
use crate::stocks::definitions::round2;
use chrono::NaiveDate;
use parking_lot::Mutex;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_requests_per_minute: u32,
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            max_requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_limit(mut self, max_requests_per_minute: u32) -> Self {
        self.max_requests_per_minute = max_requests_per_minute.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    endpoint: Url,
    http: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl AlphaVantageClient {
    pub fn new(config: AlphaVantageConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        let mut endpoint = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        endpoint.set_path("query");
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            api_key: config.api_key,
            endpoint,
            http,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.max_requests_per_minute))),
        })
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let wait = self.rate_limiter.lock().reserve();
        if !wait.is_zero() {
            log::debug!("rate limit reached, waiting {:.1}s", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }

        let resp = self
            .http
            .get(self.endpoint.clone())
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        let json: Value = resp.error_for_status()?.json().await?;
        check_api_message(&json)?;
        Ok(json)
    }
}

impl QuoteProvider for AlphaVantageClient {
    async fn quote(&self, ticker: &str) -> Result<Quote, FetchError> {
        let quote_json = self
            .fetch(&[("function", "GLOBAL_QUOTE"), ("symbol", ticker)])
            .await?;
        let mut quote = parse_global_quote(ticker, &quote_json)?;

        // The overview only decorates the row; ETFs and indices have none.
        match self.fetch(&[("function", "OVERVIEW"), ("symbol", ticker)]).await {
            Ok(overview) => apply_overview(&mut quote, &overview),
            Err(e @ FetchError::Http(_)) => return Err(e),
            Err(e) => log::warn!("no overview for {ticker}: {e}"),
        }
        Ok(quote)
    }

    async fn monthly_series(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        let json = self
            .fetch(&[("function", "TIME_SERIES_MONTHLY"), ("symbol", ticker)])
            .await?;
        parse_monthly_series(ticker, &json)
    }
}

fn check_api_message(json: &Value) -> Result<(), FetchError> {
    for key in ["Note", "Information", "Error Message"] {
        if let Some(msg) = json.get(key).and_then(Value::as_str) {
            return Err(FetchError::Api(msg.to_string()));
        }
    }
    Ok(())
}

/// Reads a `GLOBAL_QUOTE` response. Unknown symbols come back as an empty
/// `"Global Quote": {}` object.
pub fn parse_global_quote(ticker: &str, json: &Value) -> Result<Quote, FetchError> {
    let obj = match json.get("Global Quote").and_then(Value::as_object) {
        Some(obj) if !obj.is_empty() => obj,
        _ => return Err(FetchError::UnknownSymbol(ticker.to_string())),
    };
    let change_percent = obj
        .get("10. change percent")
        .and_then(Value::as_str)
        .and_then(|s| s.trim().trim_end_matches('%').parse::<f64>().ok())
        .ok_or_else(|| FetchError::Parse("missing field 10. change percent".to_string()))?;
    Ok(Quote {
        ticker: ticker.to_string(),
        price: round2(parse_number(obj, "05. price")?),
        change: round2(parse_number(obj, "09. change")?),
        change_percent,
        previous_close: round2(parse_number(obj, "08. previous close")?),
        week52_high: None,
        market_cap: None,
    })
}

/// The two `OVERVIEW` fields the table shows. Every value arrives as a string.
#[derive(Debug, Default, Deserialize)]
struct Overview {
    #[serde(rename = "52WeekHigh")]
    week52_high: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    market_cap: Option<String>,
}

/// Copies the 52-week high and market cap from an `OVERVIEW` response.
/// The API reports absent values as `"None"` or `"-"`; those stay empty.
pub fn apply_overview(quote: &mut Quote, json: &Value) {
    let overview = serde_json::from_value::<Overview>(json.clone()).unwrap_or_default();
    quote.week52_high = overview
        .week52_high
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(round2);
    quote.market_cap = overview
        .market_cap
        .and_then(|s| s.trim().parse::<u64>().ok());
}

/// Reads a `TIME_SERIES_MONTHLY` response into a series, oldest bar first.
pub fn parse_monthly_series(ticker: &str, json: &Value) -> Result<PriceSeries, FetchError> {
    let series_key = find_series_key(json, "Monthly")
        .ok_or_else(|| FetchError::Parse("missing monthly time series in response".to_string()))?;
    let bars = json
        .get(&series_key)
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::Parse("time series missing or invalid".to_string()))?;

    let mut candles = Vec::with_capacity(bars.len());
    for (date_str, bar) in bars {
        candles.push(parse_bar(date_str, bar)?);
    }
    let symbol = json
        .get("Meta Data")
        .and_then(|meta| meta.get("2. Symbol"))
        .and_then(Value::as_str)
        .unwrap_or(ticker);
    Ok(PriceSeries::new(symbol.to_ascii_uppercase(), candles))
}

fn find_series_key(json: &Value, starts_with: &str) -> Option<String> {
    json.as_object()
        .and_then(|obj| obj.keys().find(|k| k.starts_with(starts_with)).cloned())
}

fn parse_bar(date_str: &str, value: &Value) -> Result<Candle, FetchError> {
    let obj = value
        .as_object()
        .ok_or_else(|| FetchError::Parse(format!("bar value not object for {date_str}")))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| FetchError::Parse(format!("invalid date {date_str}")))?;
    Ok(Candle {
        date,
        open: parse_number(obj, "1. open")?,
        high: parse_number(obj, "2. high")?,
        low: parse_number(obj, "3. low")?,
        close: parse_number(obj, "4. close")?,
        volume: parse_number(obj, "5. volume")?,
    })
}

fn parse_number(obj: &Map<String, Value>, key: &str) -> Result<f64, FetchError> {
    let val = obj
        .get(key)
        .ok_or_else(|| FetchError::Parse(format!("missing field {key}")))?;
    if let Some(n) = val.as_str().and_then(|s| s.trim().parse::<f64>().ok()) {
        return Ok(n);
    }
    val.as_f64()
        .ok_or_else(|| FetchError::Parse(format!("field {key} is not numeric")))
}

// ──────────────────────────────────────────────────────────────────────────────
//  Unit tests for the Alpha Vantage client
// ──────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::stocks::Trend;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn global_quote_json() -> Value {
        serde_json::from_str(
            r#"{
                "Global Quote": {
                    "01. symbol": "IBM",
                    "02. open": "185.1000",
                    "03. high": "187.5000",
                    "04. low": "184.2000",
                    "05. price": "186.8750",
                    "06. volume": "3468421",
                    "07. latest trading day": "2024-05-03",
                    "08. previous close": "185.0100",
                    "09. change": "1.8700",
                    "10. change percent": "1.0081%"
                }
            }"#,
        )
        .unwrap()
    }

    fn overview_json() -> Value {
        serde_json::from_str(
            r#"{
                "Symbol": "IBM",
                "Name": "International Business Machines",
                "MarketCapitalization": "171298816000",
                "52WeekHigh": "199.18",
                "52WeekLow": "128.34"
            }"#,
        )
        .unwrap()
    }

    fn monthly_json() -> Value {
        serde_json::from_str(
            r#"{
                "Meta Data": {
                    "1. Information": "Monthly Prices (open, high, low, close) and Volumes",
                    "2. Symbol": "IBM",
                    "3. Last Refreshed": "2024-05-03"
                },
                "Monthly Time Series": {
                    "2024-05-03": {
                        "1. open": "165.6900",
                        "2. high": "168.3800",
                        "3. low": "162.6200",
                        "4. close": "165.7100",
                        "5. volume": "12961880"
                    },
                    "2024-04-30": {
                        "1. open": "190.0000",
                        "2. high": "193.2800",
                        "3. low": "165.2605",
                        "4. close": "166.2000",
                        "5. volume": "98297181"
                    },
                    "2024-03-28": {
                        "1. open": "185.4900",
                        "2. high": "199.1800",
                        "3. low": "185.1800",
                        "4. close": "190.9600",
                        "5. volume": "99921776"
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parse_quote_and_overview() {
        // Act
        let mut quote = parse_global_quote("IBM", &global_quote_json()).unwrap();
        apply_overview(&mut quote, &overview_json());

        // Assert
        assert_eq!(quote.ticker, "IBM");
        assert_eq!(quote.price, 186.88, "Price is rounded to cents.");
        assert_eq!(quote.change, 1.87);
        assert_eq!(quote.change_percent, 1.0081);
        assert_eq!(quote.previous_close, 185.01);
        assert_eq!(quote.week52_high, Some(199.18));
        assert_eq!(quote.market_cap, Some(171_298_816_000));
        assert_eq!(quote.cell(crate::stocks::Column::MarketCap), "171.30B");
        assert_eq!(quote.trend(), Trend::Up);
    }

    #[test]
    fn empty_global_quote_is_unknown_symbol() {
        let json: Value = serde_json::from_str(r#"{"Global Quote": {}}"#).unwrap();
        let err = parse_global_quote("ZZZZ", &json).unwrap_err();
        assert!(matches!(err, FetchError::UnknownSymbol(ref t) if t == "ZZZZ"));

        let err = parse_global_quote("ZZZZ", &Value::Null).unwrap_err();
        assert!(matches!(err, FetchError::UnknownSymbol(_)));
    }

    #[test]
    fn missing_quote_field_is_a_parse_error() {
        let mut json = global_quote_json();
        json["Global Quote"].as_object_mut().unwrap().remove("05. price");
        let err = parse_global_quote("IBM", &json).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn overview_placeholders_stay_empty() {
        let mut quote = parse_global_quote("SPY", &global_quote_json()).unwrap();
        let json: Value =
            serde_json::from_str(r#"{"MarketCapitalization": "None", "52WeekHigh": "-"}"#).unwrap();
        apply_overview(&mut quote, &json);
        assert_eq!(quote.week52_high, None);
        assert_eq!(quote.market_cap, None);

        apply_overview(&mut quote, &Value::Null);
        assert_eq!(quote.week52_high, None, "A non-object overview leaves the row undecorated.");
    }

    #[test]
    fn week52_high_is_shown_with_two_decimals() {
        // Arrange
        let mut quote = parse_global_quote("IBM", &global_quote_json()).unwrap();
        let json: Value = serde_json::from_str(r#"{"52WeekHigh": "199.1"}"#).unwrap();

        // Act
        apply_overview(&mut quote, &json);

        // Assert
        assert_eq!(quote.week52_high, Some(199.1));
        assert_eq!(quote.cell(crate::stocks::Column::Week52High), "199.10");
        assert_eq!(quote.cell(crate::stocks::Column::MarketCap), "-", "No market cap in this overview.");
    }

    #[test]
    fn monthly_series_is_oldest_first_and_keeps_every_bar() {
        let series = parse_monthly_series("ibm", &monthly_json()).unwrap();
        assert_eq!(series.ticker, "IBM");
        assert_eq!(series.len(), 3, "The most recent month must not be dropped.");
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 3, 28));
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(series.candles[0].high, 199.18);
        assert_eq!(series.candles[2].volume, 12_961_880.0);
    }

    #[test]
    fn monthly_series_without_bars_is_a_parse_error() {
        let json: Value = serde_json::from_str(r#"{"Meta Data": {}}"#).unwrap();
        assert!(matches!(
            parse_monthly_series("IBM", &json),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn api_notes_become_errors() {
        let json: Value = serde_json::from_str(
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute"}"#,
        )
        .unwrap();
        assert!(matches!(check_api_message(&json), Err(FetchError::Api(_))));

        let json: Value = serde_json::from_str(r#"{"Error Message": "Invalid API call."}"#).unwrap();
        assert!(matches!(check_api_message(&json), Err(FetchError::Api(msg)) if msg == "Invalid API call."));

        assert!(check_api_message(&global_quote_json()).is_ok());
    }

    #[test]
    fn client_requires_key_and_valid_url() {
        assert!(matches!(
            AlphaVantageClient::new(AlphaVantageConfig::new("  ")),
            Err(FetchError::MissingApiKey)
        ));
        assert!(matches!(
            AlphaVantageClient::new(AlphaVantageConfig::new("demo").with_base_url("not a url")),
            Err(FetchError::InvalidBaseUrl(_))
        ));
    }

    /// Serves canned Alpha Vantage answers, picked by the `function=` query
    /// parameter, on a local port.
    async fn spawn_fake_api(responses: Vec<(&'static str, Value)>) -> String {
        spawn_fake_api_with_status(
            responses
                .into_iter()
                .map(|(function, json)| (function, 200, json))
                .collect(),
        )
        .await
    }

    /// Like [`spawn_fake_api`], with an HTTP status code per function.
    async fn spawn_fake_api_with_status(responses: Vec<(&'static str, u16, Value)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let (status, body) = responses
                    .iter()
                    .find(|(function, _, _)| request.contains(&format!("function={function}")))
                    .map(|(_, status, json)| (*status, json.to_string()))
                    .unwrap_or_else(|| (200, "{}".to_string()));
                let reason = match status {
                    200 => "OK",
                    429 => "Too Many Requests",
                    _ => "Internal Server Error",
                };
                let reply = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn quote_merges_both_endpoints() {
        // Arrange
        let base_url = spawn_fake_api(vec![
            ("GLOBAL_QUOTE", global_quote_json()),
            ("OVERVIEW", overview_json()),
        ])
        .await;
        let client =
            AlphaVantageClient::new(AlphaVantageConfig::new("test").with_base_url(base_url).with_limit(100))
                .unwrap();

        // Act
        let quote = client.quote("IBM").await.unwrap();

        // Assert
        assert_eq!(quote.price, 186.88);
        assert_eq!(quote.week52_high, Some(199.18), "Overview metrics should be merged in.");
    }

    #[tokio::test]
    async fn quote_survives_an_overview_error() {
        let base_url = spawn_fake_api(vec![
            ("GLOBAL_QUOTE", global_quote_json()),
            ("OVERVIEW", serde_json::json!({"Information": "premium endpoint"})),
        ])
        .await;
        let client =
            AlphaVantageClient::new(AlphaVantageConfig::new("test").with_base_url(base_url).with_limit(100))
                .unwrap();

        let quote = client.quote("SPY").await.unwrap();
        assert_eq!(quote.market_cap, None);
    }

    #[tokio::test]
    async fn http_429_is_rate_limited() {
        // Arrange
        let base_url = spawn_fake_api_with_status(vec![(
            "GLOBAL_QUOTE",
            429,
            serde_json::json!({"message": "slow down"}),
        )])
        .await;
        let client =
            AlphaVantageClient::new(AlphaVantageConfig::new("test").with_base_url(base_url).with_limit(100))
                .unwrap();

        // Act
        let result = client.quote("IBM").await;

        // Assert
        assert!(
            matches!(result, Err(FetchError::RateLimited)),
            "A 429 must surface as RateLimited, got {result:?}"
        );
    }

    #[tokio::test]
    async fn overview_server_error_fails_the_quote() {
        // Arrange
        let base_url = spawn_fake_api_with_status(vec![
            ("GLOBAL_QUOTE", 200, global_quote_json()),
            ("OVERVIEW", 500, serde_json::json!({})),
        ])
        .await;
        let client =
            AlphaVantageClient::new(AlphaVantageConfig::new("test").with_base_url(base_url).with_limit(100))
                .unwrap();

        // Act
        let result = client.quote("IBM").await;

        // Assert
        assert!(
            matches!(result, Err(FetchError::Http(_))),
            "An HTTP failure on the overview is not silently dropped, got {result:?}"
        );
    }

    #[tokio::test]
    async fn monthly_series_over_http() {
        let base_url = spawn_fake_api(vec![("TIME_SERIES_MONTHLY", monthly_json())]).await;
        let client =
            AlphaVantageClient::new(AlphaVantageConfig::new("test").with_base_url(base_url).with_limit(100))
                .unwrap();

        let series = client.monthly_series("IBM").await.unwrap();
        assert_eq!(series.len(), 3);
    }

    #[tokio::test]
    async fn integration_fetch_quote_if_key_present() -> Result<(), Box<dyn std::error::Error>> {
        let Ok(key) = std::env::var("ALPHAVANTAGE_API_KEY") else {
            return Ok(()); // skip when no key configured
        };
        let client = AlphaVantageClient::new(AlphaVantageConfig::new(key))?;
        let quote = client.quote("IBM").await?;
        assert_eq!(quote.ticker, "IBM");
        assert!(quote.price > 0.0);
        Ok(())
    }
}
