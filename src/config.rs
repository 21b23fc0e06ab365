// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::store::QuoteStore;
use crate::utils::parse_decimal;

pub const DEFAULT_NOTES: &str = "1. 50% Advance payment required.\n2. Delivery within 4-6 weeks.\n3. Goods once sold cannot be returned.";

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    DefaultTaxRate,
    ValidityDays,
    CurrencySymbol,
    TaxLabel,
    NumberPrefix,
    BusinessName,
    BusinessTagline,
    BusinessAddress,
    BusinessEmail,
    BusinessGstin,
}

impl SettingKey {
    pub const ALL: [SettingKey; 10] = [
        SettingKey::DefaultTaxRate,
        SettingKey::ValidityDays,
        SettingKey::CurrencySymbol,
        SettingKey::TaxLabel,
        SettingKey::NumberPrefix,
        SettingKey::BusinessName,
        SettingKey::BusinessTagline,
        SettingKey::BusinessAddress,
        SettingKey::BusinessEmail,
        SettingKey::BusinessGstin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DefaultTaxRate => "default_tax_rate",
            SettingKey::ValidityDays => "validity_days",
            SettingKey::CurrencySymbol => "currency_symbol",
            SettingKey::TaxLabel => "tax_label",
            SettingKey::NumberPrefix => "number_prefix",
            SettingKey::BusinessName => "business_name",
            SettingKey::BusinessTagline => "business_tagline",
            SettingKey::BusinessAddress => "business_address",
            SettingKey::BusinessEmail => "business_email",
            SettingKey::BusinessGstin => "business_gstin",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            SettingKey::DefaultTaxRate => "10",
            SettingKey::ValidityDays => "30",
            SettingKey::CurrencySymbol => "₹",
            SettingKey::TaxLabel => "GST",
            SettingKey::NumberPrefix => "MQ",
            SettingKey::BusinessName => "ModuQuote",
            SettingKey::BusinessTagline => "Premium Modular Interiors",
            SettingKey::BusinessAddress => "123 Design Avenue, Creative City",
            SettingKey::BusinessEmail => "contact@moduquote.com",
            SettingKey::BusinessGstin => "29ABCDE1234F1Z5",
        }
    }

    /// Normalise a user-supplied value, rejecting ones the key cannot hold.
    pub fn validate(&self, raw: &str) -> Result<String> {
        let v = raw.trim();
        match self {
            SettingKey::DefaultTaxRate => {
                let d = parse_decimal(v)?;
                if d.is_sign_negative() {
                    return Err(anyhow!("Tax rate must not be negative"));
                }
                Ok(d.normalize().to_string())
            }
            SettingKey::ValidityDays => {
                let days: u32 = v
                    .parse()
                    .map_err(|_| anyhow!("Invalid validity days '{}'", v))?;
                Ok(days.to_string())
            }
            SettingKey::NumberPrefix => {
                if v.is_empty() || !v.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(anyhow!(
                        "Number prefix must be non-empty and alphanumeric, got '{}'",
                        v
                    ));
                }
                Ok(v.to_uppercase())
            }
            _ => Ok(v.to_string()),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let k = s.trim().to_lowercase().replace('-', "_");
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == k)
            .ok_or_else(|| anyhow!("Unknown setting '{}'", s.trim()))
    }
}

/// Effective settings: stored values over built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_tax_rate: Decimal,
    pub validity_days: i64,
    pub currency_symbol: String,
    pub tax_label: String,
    pub number_prefix: String,
    pub business_name: String,
    pub business_tagline: String,
    pub business_address: String,
    pub business_email: String,
    pub business_gstin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tax_rate: Decimal::TEN,
            validity_days: 30,
            currency_symbol: SettingKey::CurrencySymbol.default_value().to_string(),
            tax_label: SettingKey::TaxLabel.default_value().to_string(),
            number_prefix: SettingKey::NumberPrefix.default_value().to_string(),
            business_name: SettingKey::BusinessName.default_value().to_string(),
            business_tagline: SettingKey::BusinessTagline.default_value().to_string(),
            business_address: SettingKey::BusinessAddress.default_value().to_string(),
            business_email: SettingKey::BusinessEmail.default_value().to_string(),
            business_gstin: SettingKey::BusinessGstin.default_value().to_string(),
        }
    }
}

impl Settings {
    pub fn load(store: &dyn QuoteStore) -> Result<Self> {
        let mut s = Settings::default();
        for key in SettingKey::ALL {
            let Some(raw) = store.setting(key.as_str())? else {
                continue;
            };
            if let Err(err) = s.assign(key, &raw) {
                warn!(setting = %key, value = %raw, error = %err, "ignoring stored setting");
            }
        }
        Ok(s)
    }

    fn assign(&mut self, key: SettingKey, raw: &str) -> Result<()> {
        let v = key.validate(raw)?;
        match key {
            SettingKey::DefaultTaxRate => self.default_tax_rate = parse_decimal(&v)?,
            SettingKey::ValidityDays => self.validity_days = v.parse()?,
            SettingKey::CurrencySymbol => self.currency_symbol = v,
            SettingKey::TaxLabel => self.tax_label = v,
            SettingKey::NumberPrefix => self.number_prefix = v,
            SettingKey::BusinessName => self.business_name = v,
            SettingKey::BusinessTagline => self.business_tagline = v,
            SettingKey::BusinessAddress => self.business_address = v,
            SettingKey::BusinessEmail => self.business_email = v,
            SettingKey::BusinessGstin => self.business_gstin = v,
        }
        Ok(())
    }

    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::DefaultTaxRate => self.default_tax_rate.normalize().to_string(),
            SettingKey::ValidityDays => self.validity_days.to_string(),
            SettingKey::CurrencySymbol => self.currency_symbol.clone(),
            SettingKey::TaxLabel => self.tax_label.clone(),
            SettingKey::NumberPrefix => self.number_prefix.clone(),
            SettingKey::BusinessName => self.business_name.clone(),
            SettingKey::BusinessTagline => self.business_tagline.clone(),
            SettingKey::BusinessAddress => self.business_address.clone(),
            SettingKey::BusinessEmail => self.business_email.clone(),
            SettingKey::BusinessGstin => self.business_gstin.clone(),
        }
    }
}

/// Validate and persist one setting; returns the stored form.
pub fn set_setting(store: &dyn QuoteStore, key: SettingKey, raw: &str) -> Result<String> {
    let v = key.validate(raw)?;
    store.set_setting(key.as_str(), &v)?;
    Ok(v)
}

/// Generative-AI provider settings, read from the environment.
#[derive(Clone, PartialEq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("MODUQUOTE_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            endpoint: get("MODUQUOTE_AI_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
        }
    }
}
