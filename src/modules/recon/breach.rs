//! Breach-database probe with a single fallback source.
//!
//! An empty list means "nothing found" and "no source answered" alike.

use chrono::NaiveDate;
use reqwest::{header::ACCEPT, Client};
use serde_json::Value;

use crate::{
    config::{render_url, BreachEndpoints},
    core::{
        email::EmailAddress,
        error::LookupError,
        time::{parse_loose_date, sentinel_date},
        types::BreachRecord,
    },
};

pub const UNKNOWN_BREACH: &str = "Unknown Breach";
pub const UNKNOWN_DOMAIN: &str = "unknown.com";
pub const DEFAULT_DESCRIPTION: &str = "Data breach detected";
const FALLBACK_NAME: &str = "Data Breach";

pub async fn check_breaches(
    client: &Client,
    endpoints: &BreachEndpoints,
    email: &EmailAddress,
) -> Vec<BreachRecord> {
    let primary = render_url(&endpoints.primary_url, email.local_part(), email.as_str());
    match fetch_json(client, &primary).await {
        Ok(Some(body)) => {
            if let Some(records) = normalize_primary(&body) {
                return records;
            }
            tracing::debug!("primary breach source returned no breach list");
        }
        Ok(None) => tracing::debug!("primary breach source returned non-success"),
        Err(err) => tracing::warn!("primary breach source error: {}", err),
    }

    let fallback = render_url(&endpoints.fallback_url, email.local_part(), email.as_str());
    match fetch_json(client, &fallback).await {
        Ok(Some(body)) => normalize_fallback(&body).unwrap_or_default(),
        Ok(None) => Vec::new(),
        Err(err) => {
            tracing::warn!("fallback breach source error: {}", err);
            Vec::new()
        }
    }
}

async fn fetch_json(client: &Client, url: &str) -> Result<Option<Value>, LookupError> {
    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await?;
    if !resp.status().is_success() {
        return Ok(None);
    }
    Ok(Some(resp.json().await?))
}

/// Normalize a primary-source body. `None` when it carries no `breaches` list.
///
/// Entries may be full objects, bare names, or nested lists of names.
pub fn normalize_primary(body: &Value) -> Option<Vec<BreachRecord>> {
    let entries = body.get("breaches")?.as_array()?;
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Object(_) => records.push(primary_record(entry)),
            Value::String(name) => records.push(named_record(name)),
            Value::Array(names) => {
                records.extend(names.iter().filter_map(Value::as_str).map(named_record))
            }
            _ => {}
        }
    }
    Some(records)
}

fn primary_record(entry: &Value) -> BreachRecord {
    BreachRecord {
        name: text(entry, &["name"]).unwrap_or_else(|| UNKNOWN_BREACH.to_string()),
        domain: text(entry, &["domain"]).unwrap_or_else(|| UNKNOWN_DOMAIN.to_string()),
        breach_date: date(entry, &["breach_date", "date"]),
        discovered_date: date(entry, &["added_date", "date"]),
        affected_count: count(entry, &["pwn_count", "exposed_records"]),
        description: text(entry, &["description"])
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        data_classes: entry
            .get("data_classes")
            .and_then(string_list)
            .or_else(|| entry.get("exposed_data").and_then(string_list))
            .unwrap_or_else(|| vec!["Email addresses".to_string()]),
        verified: entry.get("verified").and_then(Value::as_bool) != Some(false),
    }
}

fn named_record(name: &str) -> BreachRecord {
    primary_record(&serde_json::json!({ "name": name }))
}

/// Normalize a fallback-source body. `None` unless `found` is truthy and
/// `sources` is a list.
pub fn normalize_fallback(body: &Value) -> Option<Vec<BreachRecord>> {
    if !body.get("found").map(truthy).unwrap_or(false) {
        return None;
    }
    let sources = body.get("sources")?.as_array()?;
    let data_classes = body
        .get("fields")
        .and_then(string_list)
        .unwrap_or_else(|| vec!["Email addresses".to_string(), "Passwords".to_string()]);

    Some(
        sources
            .iter()
            .filter(|s| s.is_object())
            .map(|source| {
                let name = text(source, &["name"]);
                BreachRecord {
                    description: format!(
                        "Data breach from {}",
                        name.as_deref().unwrap_or("unknown source")
                    ),
                    name: name.unwrap_or_else(|| FALLBACK_NAME.to_string()),
                    domain: text(source, &["domain"])
                        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string()),
                    breach_date: date(source, &["date"]),
                    discovered_date: date(source, &["date"]),
                    affected_count: count(source, &["entries"]),
                    data_classes: data_classes.clone(),
                    verified: true,
                }
            })
            .collect(),
    )
}

fn text(entry: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| entry.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn date(entry: &Value, keys: &[&str]) -> NaiveDate {
    keys.iter()
        .filter_map(|k| entry.get(*k).and_then(Value::as_str))
        .find_map(parse_loose_date)
        .unwrap_or_else(sentinel_date)
}

fn count(entry: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .filter_map(|k| entry.get(*k))
        .filter_map(|v| match v {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        })
        .find(|n| *n > 0)
        .unwrap_or(0)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let list: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(joined) => joined
            .split([';', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    (!list.is_empty()).then_some(list)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
