//! HTTP price sources.
//!
//! Each source fills a [`QuoteSheet`] with the schema assets it covers.
//! Requests retry under an exponential backoff policy; a source that stays
//! down past the policy's elapsed-time cap surfaces its last error.

use std::collections::BTreeMap;
use std::time::Duration;

use backoff::ExponentialBackoff;
use serde::Deserialize;

use prism_types::assets;

use crate::quotes::{round_to_8, Quote, QuoteSheet};
use crate::{PollError, Result};

/// Name of the default digital-asset source.
pub const DEFAULT_SOURCE: &str = "CoinCap";

/// Retry policy for source requests: 800 ms initial interval, 1.5x growth,
/// 3 s interval cap, give up after 10 s.
pub fn polling_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        initial_interval: Duration::from_millis(800),
        randomization_factor: 0.5,
        multiplier: 1.5,
        max_interval: Duration::from_secs(3),
        max_elapsed_time: Some(Duration::from_secs(10)),
        ..ExponentialBackoff::default()
    }
}

/// Pick a source name by configured weight.
///
/// Every name enters the draw once per weight point, so a weight-3 source
/// is drawn three times as often as a weight-1 one. A draw with no weight
/// anywhere falls back to `default_name`.
pub fn pick_weighted(weights: &BTreeMap<String, u32>, default_name: &str) -> String {
    let mut lottery = Vec::new();
    for (name, weight) in weights {
        for _ in 0..*weight {
            lottery.push(name.as_str());
        }
    }
    if lottery.is_empty() {
        return default_name.to_string();
    }
    let idx = rand::Rng::gen_range(&mut rand::thread_rng(), 0..lottery.len());
    lottery[idx].to_string()
}

/// Fetch quotes from the source named in configuration.
///
/// # Errors
///
/// [`PollError::UnknownSource`] for a name this build does not know;
/// otherwise whatever the source itself reports.
pub async fn fetch_named(
    name: &str,
    client: &reqwest::Client,
    sheet: &mut QuoteSheet,
) -> Result<()> {
    match name {
        "CoinCap" => fetch_coincap(client, sheet).await,
        other => Err(PollError::UnknownSource(other.to_string())),
    }
}

const COINCAP_URL: &str = "https://api.coincap.io/v2/assets?limit=500";

#[derive(Debug, Deserialize)]
struct CoinCapResponse {
    data: Vec<CoinCapRecord>,
    timestamp: i64,
}

/// One asset row from CoinCap. The API encodes numbers as decimal strings;
/// only the fields this crate reads are declared.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinCapRecord {
    symbol: String,
    price_usd: String,
}

/// Pull the CoinCap asset list and record every schema crypto asset it
/// carries.
pub async fn fetch_coincap(client: &reqwest::Client, sheet: &mut QuoteSheet) -> Result<()> {
    tracing::debug!("pulling asset data from CoinCap");

    let response: CoinCapResponse = backoff::future::retry(polling_backoff(), || async {
        let resp = client
            .get(COINCAP_URL)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                tracing::warn!(error = %e, "CoinCap request failed, backing off");
                backoff::Error::transient(e)
            })?;
        resp.json::<CoinCapResponse>()
            .await
            .map_err(backoff::Error::transient)
    })
    .await?;

    apply_coincap(&response, sheet);
    tracing::debug!(quotes = sheet.len(), "CoinCap pull complete");
    Ok(())
}

/// Project a CoinCap response onto the schema's crypto codes.
///
/// CoinCap lists Bitcoin and Bitcoin Cash under their exchange symbols;
/// the schema knows them as XBT and XBC. Rows whose price fails to parse
/// are skipped.
fn apply_coincap(response: &CoinCapResponse, sheet: &mut QuoteSheet) {
    for row in &response.data {
        let code = match row.symbol.as_str() {
            "BTC" => "XBT",
            "BCH" => "XBC",
            symbol if assets::is_v1_crypto_asset(symbol) => symbol,
            _ => continue,
        };
        let value = match row.price_usd.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(symbol = %row.symbol, "unparseable CoinCap price, skipping");
                continue;
            }
        };
        sheet.insert(
            code,
            Quote {
                value: round_to_8(value),
                when: response.timestamp,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(rows: &[(&str, &str)]) -> CoinCapResponse {
        CoinCapResponse {
            data: rows
                .iter()
                .map(|(symbol, price)| CoinCapRecord {
                    symbol: symbol.to_string(),
                    price_usd: price.to_string(),
                })
                .collect(),
            timestamp: 1_565_000_000,
        }
    }

    #[test]
    fn test_apply_maps_exchange_symbols() {
        let mut sheet = QuoteSheet::new();
        apply_coincap(&response(&[("BTC", "9100.5"), ("BCH", "330.25")]), &mut sheet);
        assert_eq!(sheet.get("XBT").map(|q| q.value), Some(9100.5));
        assert_eq!(sheet.get("XBC").map(|q| q.value), Some(330.25));
        assert!(sheet.get("BTC").is_none());
    }

    #[test]
    fn test_apply_keeps_schema_crypto_only() {
        let mut sheet = QuoteSheet::new();
        apply_coincap(
            &response(&[("ETH", "210.7"), ("DOGE", "0.003"), ("ZEC", "52.1")]),
            &mut sheet,
        );
        assert_eq!(sheet.len(), 2);
        assert!(sheet.get("ETH").is_some());
        assert!(sheet.get("ZEC").is_some());
        assert!(sheet.get("DOGE").is_none());
    }

    #[test]
    fn test_apply_skips_unparseable_prices() {
        let mut sheet = QuoteSheet::new();
        apply_coincap(&response(&[("ETH", "not a number"), ("LTC", "88.8")]), &mut sheet);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get("LTC").map(|q| q.value), Some(88.8));
    }

    #[test]
    fn test_apply_stamps_response_timestamp() {
        let mut sheet = QuoteSheet::new();
        apply_coincap(&response(&[("ETH", "210.7")]), &mut sheet);
        assert_eq!(sheet.get("ETH").map(|q| q.when), Some(1_565_000_000));
    }

    #[test]
    fn test_pick_weighted_empty_falls_back() {
        let weights = BTreeMap::new();
        assert_eq!(pick_weighted(&weights, DEFAULT_SOURCE), DEFAULT_SOURCE);
    }

    #[test]
    fn test_pick_weighted_zero_weights_fall_back() {
        let weights = BTreeMap::from([("CoinCap".to_string(), 0u32)]);
        assert_eq!(pick_weighted(&weights, DEFAULT_SOURCE), DEFAULT_SOURCE);
    }

    #[test]
    fn test_pick_weighted_single_entry() {
        let weights = BTreeMap::from([("CoinCap".to_string(), 3u32)]);
        assert_eq!(pick_weighted(&weights, "Other"), "CoinCap");
    }

    #[test]
    fn test_pick_weighted_draws_only_configured_names() {
        let weights = BTreeMap::from([
            ("CoinCap".to_string(), 2u32),
            ("Backup".to_string(), 1u32),
        ]);
        for _ in 0..50 {
            let picked = pick_weighted(&weights, "Other");
            assert!(picked == "CoinCap" || picked == "Backup");
        }
    }

    #[test]
    fn test_backoff_policy_constants() {
        let policy = polling_backoff();
        assert_eq!(policy.initial_interval, Duration::from_millis(800));
        assert_eq!(policy.multiplier, 1.5);
        assert_eq!(policy.max_interval, Duration::from_secs(3));
        assert_eq!(policy.max_elapsed_time, Some(Duration::from_secs(10)));
    }
}
