//! Holdings and their categories.

use super::currency::normalize_currency_code;
use super::error::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetCategory {
    /// Any market-priced instrument: stock, ETF, fund, index, option.
    Equity,
    Crypto,
    Bank,
    Savings,
    /// A user-entered category outside the canonical four. Valued at face value.
    Custom(String),
}

impl AssetCategory {
    /// Market-priced holdings count units; everything else is a currency balance.
    pub fn is_market_priced(&self) -> bool {
        matches!(self, AssetCategory::Equity | AssetCategory::Crypto)
    }

    pub fn name(&self) -> &str {
        match self {
            AssetCategory::Equity => "Equity",
            AssetCategory::Crypto => "Crypto",
            AssetCategory::Bank => "Bank",
            AssetCategory::Savings => "Savings",
            AssetCategory::Custom(name) => name,
        }
    }
}

impl Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AssetCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err(ValidationError::InvalidCategory(s.to_string())),
            "equity" | "equity-like" | "stock" | "stocks" | "etf" | "fund" | "mutual fund"
            | "index" | "option" => Ok(AssetCategory::Equity),
            "crypto" | "cryptocurrency" => Ok(AssetCategory::Crypto),
            "bank" | "cash" => Ok(AssetCategory::Bank),
            "savings" | "deposit" | "fixed deposit" => Ok(AssetCategory::Savings),
            _ => Ok(AssetCategory::Custom(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for AssetCategory {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetCategory> for String {
    fn from(category: AssetCategory) -> Self {
        category.name().to_string()
    }
}

/// A single position as supplied by the persistence/UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: AssetCategory,
    /// Units for market-priced holdings, a currency balance otherwise.
    pub amount: f64,
    /// Settlement currency, only used by face-value holdings.
    #[serde(default)]
    pub currency: String,
    pub acquisition_date: NaiveDate,
}

impl Holding {
    pub fn new(
        id: impl Into<String>,
        category: AssetCategory,
        amount: f64,
        currency: &str,
        acquisition_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            category,
            amount,
            currency: normalize_currency_code(currency),
            acquisition_date,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Epoch seconds of midnight UTC on the acquisition date.
    pub fn acquired_at(&self) -> i64 {
        self.acquisition_date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp()
    }
}

/// Rejects holdings that would silently corrupt the sums.
pub fn validate_holdings(holdings: &[Holding]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for holding in holdings {
        if holding.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if !seen.insert(holding.id.as_str()) {
            return Err(ValidationError::DuplicateId(holding.id.clone()));
        }
        if !holding.amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount {
                id: holding.id.clone(),
            });
        }
        if holding.amount < 0.0 {
            return Err(ValidationError::NegativeAmount {
                id: holding.id.clone(),
                amount: holding.amount,
            });
        }
        if let AssetCategory::Custom(name) = &holding.category {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidCategory(name.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!("ETF".parse::<AssetCategory>(), Ok(AssetCategory::Equity));
        assert_eq!("option".parse::<AssetCategory>(), Ok(AssetCategory::Equity));
        assert_eq!("Crypto".parse::<AssetCategory>(), Ok(AssetCategory::Crypto));
        assert_eq!("bank".parse::<AssetCategory>(), Ok(AssetCategory::Bank));
        assert_eq!(
            "Fixed Deposit".parse::<AssetCategory>(),
            Ok(AssetCategory::Savings)
        );
        assert_eq!(
            " Real Estate ".parse::<AssetCategory>(),
            Ok(AssetCategory::Custom("Real Estate".to_string()))
        );
        assert!("  ".parse::<AssetCategory>().is_err());
    }

    #[test]
    fn test_market_priced_categories() {
        assert!(AssetCategory::Equity.is_market_priced());
        assert!(AssetCategory::Crypto.is_market_priced());
        assert!(!AssetCategory::Bank.is_market_priced());
        assert!(!AssetCategory::Savings.is_market_priced());
        assert!(!AssetCategory::Custom("Gold".to_string()).is_market_priced());
    }

    #[test]
    fn test_holding_deserialization() {
        let yaml = r#"
- id: "a"
  category: "Stock"
  amount: 10
  acquisition_date: "2024-01-01"
- id: "b"
  name: "Checking"
  category: "bank"
  amount: 2500.5
  currency: "eur"
  acquisition_date: "2023-05-10"
"#;
        let holdings: Vec<Holding> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].category, AssetCategory::Equity);
        assert_eq!(holdings[0].currency, "");
        assert_eq!(holdings[1].display_name(), "Checking");
        assert_eq!(holdings[1].acquisition_date, date(2023, 5, 10));
    }

    #[test]
    fn test_empty_category_fails_deserialization() {
        let yaml = r#"
id: "a"
category: ""
amount: 1
acquisition_date: "2024-01-01"
"#;
        assert!(serde_yaml::from_str::<Holding>(yaml).is_err());
    }

    #[test]
    fn test_acquired_at_is_midnight_utc() {
        let holding = Holding::new("a", AssetCategory::Equity, 1.0, "USD", date(2024, 1, 1));
        assert_eq!(holding.acquired_at(), 1_704_067_200);
    }

    #[test]
    fn test_validate_rejects_malformed_holdings() {
        let ok = Holding::new("a", AssetCategory::Equity, 0.0, "USD", date(2024, 1, 1));
        assert!(validate_holdings(std::slice::from_ref(&ok)).is_ok());

        let negative = Holding::new("n", AssetCategory::Bank, -5.0, "USD", date(2024, 1, 1));
        assert_eq!(
            validate_holdings(&[negative]),
            Err(ValidationError::NegativeAmount {
                id: "n".to_string(),
                amount: -5.0
            })
        );

        let nan = Holding::new("x", AssetCategory::Crypto, f64::NAN, "USD", date(2024, 1, 1));
        assert!(matches!(
            validate_holdings(&[nan]),
            Err(ValidationError::NonFiniteAmount { .. })
        ));

        let blank = Holding::new(" ", AssetCategory::Bank, 1.0, "USD", date(2024, 1, 1));
        assert_eq!(validate_holdings(&[blank]), Err(ValidationError::EmptyId));

        assert_eq!(
            validate_holdings(&[ok.clone(), ok]),
            Err(ValidationError::DuplicateId("a".to_string()))
        );

        let custom = Holding::new(
            "c",
            AssetCategory::Custom(String::new()),
            1.0,
            "USD",
            date(2024, 1, 1),
        );
        assert!(matches!(
            validate_holdings(&[custom]),
            Err(ValidationError::InvalidCategory(_))
        ));
    }
}
