// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-line spending insight from a generative model.
//!
//! The model is an unreliable collaborator: every failure collapses into a
//! fixed message and is only logged, never returned.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::{Category, Transaction, TransactionType};

pub const MAX_INSIGHT_TRANSACTIONS: usize = 50;

pub const NO_DATA_MESSAGE: &str =
    "Start adding transactions to unlock AI-powered insights about your money.";
pub const EMPTY_REPLY_MESSAGE: &str = "Keep tracking to see more insights!";
pub const FAILURE_MESSAGE: &str = "Couldn't generate an insight right now. Check back later! 🌟";

/// Compact form of a transaction sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightRecord {
    #[serde(rename = "a")]
    pub amount: Decimal,
    #[serde(rename = "c")]
    pub category: Category,
    #[serde(rename = "t")]
    pub kind: TransactionType,
    #[serde(rename = "d")]
    pub description: String,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The first [`MAX_INSIGHT_TRANSACTIONS`] in stored (newest-first) order.
pub fn insight_payload(transactions: &[Transaction]) -> Vec<InsightRecord> {
    transactions
        .iter()
        .take(MAX_INSIGHT_TRANSACTIONS)
        .map(|t| InsightRecord {
            amount: t.amount,
            category: t.category,
            kind: t.kind,
            description: t.description.clone(),
            source: t.source.clone(),
        })
        .collect()
}

pub fn build_prompt(records: &[InsightRecord]) -> Result<String> {
    let data = serde_json::to_string(records)?;
    Ok(format!(
        "Analyze these financial transactions for a college student.\n\
         Data: {data}.\n\n\
         Provide a single, short, witty, and friendly 1-sentence insight or nudge.\n\
         Focus on patterns (e.g., too much coffee, good saving, subscription overload).\n\
         Use emojis. Be encouraging but honest.\n\
         Do not use markdown. Just plain text."
    ))
}

pub trait InsightProvider {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Always returns displayable text.
pub fn financial_insight(provider: Option<&dyn InsightProvider>, transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }
    let Some(provider) = provider else {
        tracing::warn!("no insight provider configured");
        return FAILURE_MESSAGE.to_string();
    };
    let reply = build_prompt(&insight_payload(transactions)).and_then(|p| provider.generate(&p));
    match reply {
        Ok(text) if text.trim().is_empty() => EMPTY_REPLY_MESSAGE.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "insight generation failed");
            FAILURE_MESSAGE.to_string()
        }
    }
}

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: &str) -> Result<Self> {
        Ok(Self {
            client: crate::utils::http_client()?,
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

impl InsightProvider for GeminiProvider {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_BASE, self.model);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let resp: GenerateResponse = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()
            .context("Decoding insight response")?;
        let text = resp
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        Ok(text)
    }
}
