//! Checkout settings.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CHECKOUT__*`, e.g. `CHECKOUT__TAX_RATE_BPS=1900`)
//! 2. Config file (`--config <path>`, else `checkout.toml` if present)
//! 3. Defaults (USD, 21% tax, standard coupons)
//!
//! Settings are read once at startup and are read-only afterwards.
//!
//! ## File Format
//! ```toml
//! default_currency = "EUR"
//! tax_rate_bps = 2100
//!
//! [[coupons]]
//! code = "SAVE10"
//! type = "percentage"
//! rate_bps = 1000
//!
//! [[coupons]]
//! code = "VIP"
//! type = "fixed_conditional"
//! value = 50
//! fallback = 10
//! min_for_value = 100
//! ```
//!
//! A `coupons` list replaces the standard table entirely.

use std::collections::BTreeSet;
use std::path::Path;

use checkout_core::{
    Checkout, CheckoutConfig, CouponRule, CouponTable, Money, Rate, DEFAULT_CURRENCY,
    TAX_RATE_BPS,
};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat, Map};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "checkout";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHECKOUT";

const MAX_BPS: u32 = 10_000;

/// Checkout settings as loaded from file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Currency code used when a request carries none.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Tax rate in basis points (2100 = 21%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Floor for the discounted total, in minor units.
    #[serde(default)]
    pub min_total_after_discount: i64,

    /// Coupon rules. `None` means the standard table.
    #[serde(default)]
    pub coupons: Option<Vec<CouponSetting>>,
}

/// One `[[coupons]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CouponSetting {
    pub code: String,
    #[serde(flatten)]
    pub kind: CouponKind,
}

/// Coupon rule as written in the config file. Rates in basis points,
/// amounts in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponKind {
    Percentage {
        rate_bps: u32,
    },
    Tiered {
        high_bps: u32,
        low_bps: u32,
        threshold: i64,
    },
    FixedConditional {
        value: i64,
        fallback: i64,
        min_for_value: i64,
    },
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_tax_rate_bps() -> u32 {
    TAX_RATE_BPS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_currency: default_currency(),
            tax_rate_bps: default_tax_rate_bps(),
            min_total_after_discount: 0,
            coupons: None,
        }
    }
}

impl Settings {
    /// Loads settings from an optional file plus the environment.
    ///
    /// An explicit `path` must exist; the default `checkout.toml` may not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::build(config::Config::builder().add_source(file), environment(None))
    }

    /// Loads settings from TOML text plus `CHECKOUT__*` variables.
    ///
    /// `vars` stands in for the process environment when given; `None` reads
    /// the real one.
    pub fn from_toml_with_env(
        toml: &str,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Self::build(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
            environment(vars),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>, env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue("default_currency".to_string()));
        }
        check_bps(self.tax_rate_bps, "tax_rate_bps")?;
        check_amount(self.min_total_after_discount, "min_total_after_discount")?;

        let Some(coupons) = &self.coupons else {
            return Ok(());
        };

        let mut seen = BTreeSet::new();
        for coupon in coupons {
            if coupon.code.is_empty() {
                return Err(ConfigError::InvalidValue("coupons.code".to_string()));
            }
            if !seen.insert(coupon.code.as_str()) {
                return Err(ConfigError::DuplicateCoupon(coupon.code.clone()));
            }

            match coupon.kind {
                CouponKind::Percentage { rate_bps } => check_bps(rate_bps, "coupons.rate_bps")?,
                CouponKind::Tiered {
                    high_bps,
                    low_bps,
                    threshold,
                } => {
                    check_bps(high_bps, "coupons.high_bps")?;
                    check_bps(low_bps, "coupons.low_bps")?;
                    check_amount(threshold, "coupons.threshold")?;
                }
                CouponKind::FixedConditional {
                    value,
                    fallback,
                    min_for_value,
                } => {
                    check_amount(value, "coupons.value")?;
                    check_amount(fallback, "coupons.fallback")?;
                    check_amount(min_for_value, "coupons.min_for_value")?;
                }
            }
        }

        Ok(())
    }

    /// Calculator settings for the core.
    pub fn checkout_config(&self) -> CheckoutConfig {
        CheckoutConfig {
            default_currency: self.default_currency.clone(),
            tax_rate: Rate::from_bps(self.tax_rate_bps),
            min_total_after_discount: money(self.min_total_after_discount),
        }
    }

    /// The configured coupon table, or the standard one.
    pub fn coupon_table(&self) -> CouponTable {
        match &self.coupons {
            Some(coupons) => CouponTable::from_rules(
                coupons
                    .iter()
                    .map(|coupon| (coupon.code.clone(), coupon.kind.to_rule())),
            ),
            None => CouponTable::standard(),
        }
    }

    /// Builds the calculator these settings describe.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.checkout_config(), self.coupon_table())
    }
}

impl CouponKind {
    fn to_rule(&self) -> CouponRule {
        match *self {
            CouponKind::Percentage { rate_bps } => CouponRule::Percentage {
                rate: Rate::from_bps(rate_bps),
            },
            CouponKind::Tiered {
                high_bps,
                low_bps,
                threshold,
            } => CouponRule::Tiered {
                high: Rate::from_bps(high_bps),
                low: Rate::from_bps(low_bps),
                threshold: money(threshold),
            },
            CouponKind::FixedConditional {
                value,
                fallback,
                min_for_value,
            } => CouponRule::FixedConditional {
                value: money(value),
                fallback: money(fallback),
                min_for_value: money(min_for_value),
            },
        }
    }
}

fn environment(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

fn money(cents: i64) -> Money {
    Money::from_cents(i128::from(cents))
}

fn check_bps(bps: u32, field: &str) -> Result<(), ConfigError> {
    if bps > MAX_BPS {
        return Err(ConfigError::InvalidValue(field.to_string()));
    }
    Ok(())
}

fn check_amount(cents: i64, field: &str) -> Result<(), ConfigError> {
    if cents < 0 {
        return Err(ConfigError::InvalidValue(field.to_string()));
    }
    Ok(())
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Coupon {0} is defined more than once")]
    DuplicateCoupon(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
