use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single matching directive. `keep = false` drops matching rows outright;
/// a `category` adds a label to matching rows. A rule may carry both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub string_to_match: String,
    #[serde(default = "default_keep")]
    pub keep: bool,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_keep() -> bool {
    true
}

impl Rule {
    pub fn labeler(string_to_match: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            string_to_match: string_to_match.into(),
            keep: true,
            category: Some(category.into()),
        }
    }

    pub fn remover(string_to_match: impl Into<String>) -> Self {
        Self {
            string_to_match: string_to_match.into(),
            keep: false,
            category: None,
        }
    }
}

/// Ordered rule list, persisted as `{ rules: [...] }`. Order is preserved
/// across save/load; append order is what a resumed session sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Debit,
    Credit,
    Savings,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
            Self::Savings => write!(f, "savings"),
        }
    }
}

/// One bank transaction. `category` starts empty and is written only by the
/// matcher. Exactly one of `out`/`in` is expected from a well-formed export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "out")]
    pub amount_out: Option<f64>,
    #[serde(rename = "in")]
    pub amount_in: Option<f64>,
    #[serde(rename = "type")]
    pub account: AccountType,
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    /// Display amount: expenses positive, income negative.
    pub fn signed_amount(&self) -> f64 {
        match (self.amount_out, self.amount_in) {
            (Some(out), _) => out,
            (None, Some(inn)) => -inn,
            (None, None) => 0.0,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(out: Option<f64>, inn: Option<f64>) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: "TEST".to_string(),
            amount_out: out,
            amount_in: inn,
            account: AccountType::Debit,
            category: String::new(),
        }
    }

    #[test]
    fn test_signed_amount_expense_positive() {
        assert_eq!(txn(Some(4.5), None).signed_amount(), 4.5);
    }

    #[test]
    fn test_signed_amount_income_negative() {
        assert_eq!(txn(None, Some(1200.0)).signed_amount(), -1200.0);
    }

    #[test]
    fn test_signed_amount_prefers_out() {
        assert_eq!(txn(Some(3.0), Some(9.0)).signed_amount(), 3.0);
    }

    #[test]
    fn test_rule_defaults_on_deserialize() {
        let rule: Rule = serde_yaml::from_str("string_to_match: UBER").unwrap();
        assert!(rule.keep);
        assert!(rule.category.is_none());
    }

    #[test]
    fn test_ruleset_yaml_roundtrip_preserves_order() {
        let ruleset = Ruleset {
            rules: vec![
                Rule::remover("ATM"),
                Rule::labeler("UBER", "Transport"),
                Rule::labeler("EATS", "Food"),
            ],
        };
        let yaml = serde_yaml::to_string(&ruleset).unwrap();
        let back: Ruleset = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, ruleset);
    }
}
