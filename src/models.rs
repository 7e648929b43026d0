// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Rent,
    Utilities,
    Subscriptions,
    Entertainment,
    Academics,
    Shopping,
    Groceries,
    Transportation,
    #[serde(rename = "Personal Care", alias = "PersonalCare")]
    PersonalCare,
    Other,
    Income,
    #[serde(rename = "Income Source", alias = "IncomeSource")]
    IncomeSource,
    Scholarship,
    Gift,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Food,
        Category::Travel,
        Category::Rent,
        Category::Utilities,
        Category::Subscriptions,
        Category::Entertainment,
        Category::Academics,
        Category::Shopping,
        Category::Groceries,
        Category::Transportation,
        Category::PersonalCare,
        Category::Other,
        Category::Income,
        Category::IncomeSource,
        Category::Scholarship,
        Category::Gift,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Subscriptions => "Subscriptions",
            Category::Entertainment => "Entertainment",
            Category::Academics => "Academics",
            Category::Shopping => "Shopping",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::PersonalCare => "Personal Care",
            Category::Other => "Other",
            Category::Income => "Income",
            Category::IncomeSource => "Income Source",
            Category::Scholarship => "Scholarship",
            Category::Gift => "Gift",
        }
    }

    /// Income-bearing categories never carry a budget.
    pub fn is_income(self) -> bool {
        matches!(
            self,
            Category::Income | Category::IncomeSource | Category::Scholarship | Category::Gift
        )
    }

    pub fn budget_eligible() -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(|c| !c.is_income())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| format!("{:?}", c).to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown category '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.write_str("income"),
            TransactionType::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type '{}', expected income|expense", other)),
        }
    }
}

/// Where the money moved. Card, UPI and transfers all count as `Bank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wallet {
    Cash,
    #[default]
    Bank,
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wallet::Cash => f.write_str("cash"),
            Wallet::Bank => f.write_str("bank"),
        }
    }
}

impl FromStr for Wallet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Wallet::Cash),
            "bank" | "card" | "upi" => Ok(Wallet::Bank),
            other => Err(format!("Unknown wallet '{}', expected cash|bank", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalIcon {
    #[default]
    Target,
    Tech,
    Phone,
    Camera,
    Game,
    Watch,
    Travel,
    Vacation,
    Camping,
    Car,
    Bike,
    Home,
    Education,
    Music,
    Fashion,
    Food,
    Pet,
    Gift,
    Savings,
    Work,
    Art,
}

impl GoalIcon {
    pub const ALL: [GoalIcon; 21] = [
        GoalIcon::Target,
        GoalIcon::Tech,
        GoalIcon::Phone,
        GoalIcon::Camera,
        GoalIcon::Game,
        GoalIcon::Watch,
        GoalIcon::Travel,
        GoalIcon::Vacation,
        GoalIcon::Camping,
        GoalIcon::Car,
        GoalIcon::Bike,
        GoalIcon::Home,
        GoalIcon::Education,
        GoalIcon::Music,
        GoalIcon::Fashion,
        GoalIcon::Food,
        GoalIcon::Pet,
        GoalIcon::Gift,
        GoalIcon::Savings,
        GoalIcon::Work,
        GoalIcon::Art,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GoalIcon::Target => "target",
            GoalIcon::Tech => "tech",
            GoalIcon::Phone => "phone",
            GoalIcon::Camera => "camera",
            GoalIcon::Game => "game",
            GoalIcon::Watch => "watch",
            GoalIcon::Travel => "travel",
            GoalIcon::Vacation => "vacation",
            GoalIcon::Camping => "camping",
            GoalIcon::Car => "car",
            GoalIcon::Bike => "bike",
            GoalIcon::Home => "home",
            GoalIcon::Education => "education",
            GoalIcon::Music => "music",
            GoalIcon::Fashion => "fashion",
            GoalIcon::Food => "food",
            GoalIcon::Pet => "pet",
            GoalIcon::Gift => "gift",
            GoalIcon::Savings => "savings",
            GoalIcon::Work => "work",
            GoalIcon::Art => "art",
        }
    }
}

impl fmt::Display for GoalIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GoalIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        GoalIcon::ALL
            .into_iter()
            .find(|i| i.key() == wanted)
            .ok_or_else(|| format!("Unknown goal icon '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

/// A transaction before the ledger has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub category: Category,
    pub date: DateTime<Utc>,
    pub source: Option<String>,
    pub wallet: Wallet,
    pub tags: BTreeSet<String>,
}

impl NewTransaction {
    pub(crate) fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            source: self.source,
            wallet: self.wallet,
            tags: self.tags,
        }
    }
}

/// Raw entry form input: a calendar day rather than an instant, and an amount
/// that may not have been filled in yet.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Option<Decimal>,
    pub kind: TransactionType,
    pub category: Category,
    pub day: NaiveDate,
    pub source: Option<String>,
    pub wallet: Wallet,
    pub tags: Vec<String>,
}

impl TransactionDraft {
    /// Resolve the draft against the current clock.
    ///
    /// Today's entries are stamped with `now`; any other day is pinned to noon
    /// local time so the calendar day survives time zone shifts.
    pub fn finalize<Tz: TimeZone>(
        self,
        now: &DateTime<Tz>,
    ) -> Result<NewTransaction, ValidationError> {
        let amount = self.amount.ok_or(ValidationError::MissingAmount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        let date = if self.day == now.date_naive() {
            now.with_timezone(&Utc)
        } else {
            let noon = self
                .day
                .and_hms_opt(12, 0, 0)
                .ok_or(ValidationError::InvalidDate(self.day))?;
            now.timezone()
                .from_local_datetime(&noon)
                .earliest()
                .ok_or(ValidationError::InvalidDate(self.day))?
                .with_timezone(&Utc)
        };

        let description = match self.description.trim() {
            "" => self.category.label().to_string(),
            d => d.to_string(),
        };
        let source = match self.kind {
            TransactionType::Income => self
                .source
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            TransactionType::Expense => None,
        };

        Ok(NewTransaction {
            description,
            amount,
            kind: self.kind,
            category: self.category,
            date,
            source,
            wallet: self.wallet,
            tags: normalize_tags(self.tags),
        })
    }
}

pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub limit: Decimal, // monthly cap
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(default)]
    pub icon: GoalIcon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub icon: GoalIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub school: String,
    pub year: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            school: String::new(),
            year: "Freshman".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub currency: String,
    pub theme: String,
    pub is_dark_mode: bool,
    #[serde(default)]
    pub profile: Profile,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            theme: "vibrant".into(),
            is_dark_mode: false,
            profile: Profile::default(),
        }
    }
}

/// Everything the application persists. `Default` is the post-reset state:
/// empty collections, default settings, signed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
    pub settings: UserSettings,
    pub authenticated: bool,
}
