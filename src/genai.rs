// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Generative text for cover letters and item descriptions.
//!
//! Both requests are best effort. Callers always get a string back: a
//! fallback message for the cover letter, an empty string for descriptions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::document::format_money;
use crate::models::Quotation;
use crate::utils::http_client;

pub const COVER_LETTER_EMPTY: &str = "Could not generate cover letter.";
pub const COVER_LETTER_FAILED: &str = "Error generating content. Please check your API key.";

const COVER_LETTER_ITEMS: usize = 5;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("API key not found (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
}

/// Anything that turns a prompt into text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}

pub struct GeminiClient {
    config: AiConfig,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: http_client()?,
        })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenAiError::MissingApiKey)?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending generateContent");
        let resp = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", key)
            .json(&request)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateContentResponse = resp.json()?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        Ok(text.trim().to_string())
    }
}

pub fn cover_letter_prompt(quote: &Quotation, currency_symbol: &str) -> String {
    let items: Vec<String> = quote
        .items()
        .iter()
        .take(COVER_LETTER_ITEMS)
        .map(|i| format!("- {} ({})", i.name, i.category))
        .collect();
    format!(
        "Act as a professional interior design sales consultant in India.\n\
         Write a polite, minimalist and persuasive cover letter email for a quotation.\n\n\
         Client Name: {}\n\
         Project Total: {}\n\n\
         Key Items Included:\n{}\n\n\
         Tone: professional, warm and design-focused. Keep it under 150 words.",
        quote.customer.name,
        format_money(quote.total(), currency_symbol),
        items.join("\n")
    )
}

pub fn description_prompt(name: &str, category: &str) -> String {
    format!(
        "Write a short, technical but attractive specification for a modular furniture item.\n\
         Item: {}\n\
         Category: {}\n\n\
         Keep it under 30 words. Focus on durability and finish (e.g. BWR ply, laminate finish, soft close hinges).",
        name, category
    )
}

pub fn generate_cover_letter(
    generator: &dyn TextGenerator,
    quote: &Quotation,
    currency_symbol: &str,
) -> String {
    match generator.generate(&cover_letter_prompt(quote, currency_symbol)) {
        Ok(text) if text.trim().is_empty() => COVER_LETTER_EMPTY.to_string(),
        Ok(text) => text,
        Err(err) => {
            warn!(quote = %quote.number, error = %err, "cover letter generation failed");
            COVER_LETTER_FAILED.to_string()
        }
    }
}

/// A short specification for an item, or `""` when none could be produced.
pub fn enhance_item_description(generator: &dyn TextGenerator, name: &str, category: &str) -> String {
    if name.trim().is_empty() {
        return String::new();
    }
    match generator.generate(&description_prompt(name, category)) {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            warn!(item = %name, error = %err, "description generation failed");
            String::new()
        }
    }
}
