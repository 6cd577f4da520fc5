//! Issuer detection and the per-issuer override bundles.
//!
//! Issuers only override how the card variant and the billing cycle are read.
//! Balance, due date, card digits and transactions always go through the
//! generic matchers.

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;

use crate::matchers::{compile_patterns, first_match};

pub const UNKNOWN_ISSUER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issuer {
    Chase,
    Citi,
    AmericanExpress,
    BankOfAmerica,
    CapitalOne,
}

/// Lowercase aliases in lookup order. The first alias contained in the text
/// wins, regardless of where it occurs or how often.
pub const ISSUER_ALIASES: &[(&str, Issuer)] = &[
    ("chase", Issuer::Chase),
    ("jpmorgan chase", Issuer::Chase),
    ("citi", Issuer::Citi),
    ("citibank", Issuer::Citi),
    ("american express", Issuer::AmericanExpress),
    ("amex", Issuer::AmericanExpress),
    ("bank of america", Issuer::BankOfAmerica),
    ("bofa", Issuer::BankOfAmerica),
    ("capital one", Issuer::CapitalOne),
    ("capitalone", Issuer::CapitalOne),
];

const DATE_RANGE: &str = r"\w+ \d{1,2},? \d{4}\s*-\s*\w+ \d{1,2},? \d{4}";

/// Pattern lists and labels that make up an issuer's overrides.
#[derive(Debug)]
pub struct IssuerProfile {
    pub label: &'static str,
    pub default_variant: &'static str,
    variant_patterns: Vec<Regex>,
    billing_cycle_patterns: Vec<Regex>,
}

impl IssuerProfile {
    fn new(
        label: &'static str,
        default_variant: &'static str,
        variant_sources: &[&str],
        billing_cycle_sources: &[String],
    ) -> Self {
        let billing_cycle_sources = billing_cycle_sources
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        Self {
            label,
            default_variant,
            variant_patterns: compile_patterns(variant_sources, true),
            billing_cycle_patterns: compile_patterns(&billing_cycle_sources, true),
        }
    }

    /// The named card product, or the issuer's default label.
    #[must_use]
    pub fn card_variant(&self, text: &str) -> String {
        first_match(&self.variant_patterns, text)
            .unwrap_or_else(|| self.default_variant.to_string())
    }

    #[must_use]
    pub fn billing_cycle(&self, text: &str) -> Option<String> {
        first_match(&self.billing_cycle_patterns, text)
    }
}

static CHASE: LazyLock<IssuerProfile> = LazyLock::new(|| {
    IssuerProfile::new(
        "Chase",
        "Chase Card",
        &[
            r"Card\s+Member\s+Since[:\s]*(\w+)",
            r"Chase\s+([A-Za-z &]+)\s+Card",
        ],
        &[
            format!(r"Statement\s+period[:\s]*({DATE_RANGE})"),
            r"Statement Date[:\s]*(\w+ \d{1,2},? \d{4})".to_string(),
        ],
    )
});

static CITI: LazyLock<IssuerProfile> = LazyLock::new(|| {
    IssuerProfile::new(
        "Citi",
        "Citi Card",
        &[r"Citi\s+([A-Za-z &]+)\s+Card", r"Account Type[:\s]*(\w+)"],
        &[format!(r"Statement\s+period[:\s]*({DATE_RANGE})")],
    )
});

static AMERICAN_EXPRESS: LazyLock<IssuerProfile> = LazyLock::new(|| {
    IssuerProfile::new(
        "American Express",
        "Amex",
        &[r"American Express\s+([A-Za-z &]+)", r"Member Since[:\s]*(\d{4})"],
        &[format!(r"Period\s+Covered[:\s]*({DATE_RANGE})")],
    )
});

static BANK_OF_AMERICA: LazyLock<IssuerProfile> = LazyLock::new(|| {
    IssuerProfile::new(
        "Bank of America",
        "BofA Card",
        &[r"Bank of America\s+([A-Za-z &]+)\s+Card"],
        &[format!(r"Statement\s+Period[:\s]*({DATE_RANGE})")],
    )
});

static CAPITAL_ONE: LazyLock<IssuerProfile> = LazyLock::new(|| {
    IssuerProfile::new(
        "Capital One",
        "Capital One Card",
        &[r"Capital One\s+([A-Za-z &]+)\s+Card"],
        &[format!(r"Statement\s+period[:\s]*({DATE_RANGE})")],
    )
});

impl Issuer {
    #[must_use]
    pub fn profile(self) -> &'static IssuerProfile {
        match self {
            Self::Chase => &CHASE,
            Self::Citi => &CITI,
            Self::AmericanExpress => &AMERICAN_EXPRESS,
            Self::BankOfAmerica => &BANK_OF_AMERICA,
            Self::CapitalOne => &CAPITAL_ONE,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.profile().label
    }
}

impl Display for Issuer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Finds the issuer whose alias first appears (by table order) in `text`.
#[must_use]
pub fn resolve_issuer(text: &str) -> Option<Issuer> {
    let lowered = text.to_lowercase();
    ISSUER_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(*alias))
        .map(|(_, issuer)| *issuer)
}
