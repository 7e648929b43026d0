// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only summaries derived from the transaction list.
//!
//! Every function here is pure: the same inputs (including the `now` or time
//! zone passed in) always give the same output, and nothing is mutated.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{Budget, Category, SavingsGoal, Transaction, TransactionType};

const NEAR_LIMIT_PCT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Sums pin at the representable bounds instead of overflowing.
fn add_capped(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `part` as a share of `whole` in [0, 100]; a ratio too large to represent
/// counts as full.
fn capped_percentage(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

fn sum_of(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .fold(Decimal::ZERO, |acc, t| add_capped(acc, t.amount))
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    sum_of(transactions, TransactionType::Income)
}

pub fn total_expense(transactions: &[Transaction]) -> Decimal {
    sum_of(transactions, TransactionType::Expense)
}

pub fn balance(transactions: &[Transaction]) -> Decimal {
    let (income, expense) = (total_income(transactions), total_expense(transactions));
    income.checked_sub(expense).unwrap_or(if income >= expense {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    pub total: Decimal,
}

/// Expense totals for the last `days` calendar days ending today, oldest first.
/// Always exactly `days` entries; empty days report zero.
pub fn daily_expense_series<Tz: TimeZone>(
    transactions: &[Transaction],
    days: usize,
    now: &DateTime<Tz>,
) -> Vec<DailyTotal> {
    let tz = now.timezone();
    let today = now.date_naive();
    let window: Vec<NaiveDate> = (0..days)
        .rev()
        .map(|back| today - Duration::days(back as i64))
        .collect();

    let mut totals: HashMap<NaiveDate, Decimal> = HashMap::new();
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        for t in transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense)
        {
            let day = t.date.with_timezone(&tz).date_naive();
            if day >= *first && day <= *last {
                let slot = totals.entry(day).or_insert(Decimal::ZERO);
                *slot = add_capped(*slot, t.amount);
            }
        }
    }

    window
        .into_iter()
        .map(|day| DailyTotal {
            day,
            label: day.format("%a").to_string(),
            total: totals.get(&day).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Expense totals per category for one calendar month. Categories without
/// spend are absent; read them as zero.
pub fn monthly_spend_by_category<Tz: TimeZone>(
    transactions: &[Transaction],
    month: u32,
    year: i32,
    tz: &Tz,
) -> BTreeMap<Category, Decimal> {
    let mut out = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
    {
        let local = t.date.with_timezone(tz);
        if local.month() == month && local.year() == year {
            let slot = out.entry(t.category).or_insert(Decimal::ZERO);
            *slot = add_capped(*slot, t.amount);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    Exceeded,
}

impl BudgetStatus {
    pub fn for_percentage(pct: Decimal) -> Self {
        if pct >= Decimal::ONE_HUNDRED {
            BudgetStatus::Exceeded
        } else if pct >= NEAR_LIMIT_PCT {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub spent: Decimal,
    /// Negative once the budget is overspent.
    pub remaining: Decimal,
    /// Saturates at 100.
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// A budget without a positive limit has no defined progress and is rejected.
pub fn budget_progress(
    budget: &Budget,
    spend: &BTreeMap<Category, Decimal>,
) -> Result<BudgetProgress, ValidationError> {
    if budget.limit <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveLimit(budget.limit));
    }
    let spent = spend.get(&budget.category).copied().unwrap_or(Decimal::ZERO);
    let percentage = capped_percentage(spent, budget.limit);
    Ok(BudgetProgress {
        spent,
        remaining: budget.limit.checked_sub(spent).unwrap_or(Decimal::MIN),
        percentage,
        status: BudgetStatus::for_percentage(percentage),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub limit: Decimal,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

/// Progress of every budget against the calendar month containing `now`.
/// Stored budgets that could never have been saved (income categories,
/// non-positive limits, repeated categories) are skipped with a warning.
pub fn budget_overview<Tz: TimeZone>(
    budgets: &[Budget],
    transactions: &[Transaction],
    now: &DateTime<Tz>,
) -> Vec<BudgetLine> {
    let spend = monthly_spend_by_category(transactions, now.month(), now.year(), &now.timezone());
    let mut seen = BTreeSet::new();
    budgets
        .iter()
        .filter_map(|b| {
            if b.category.is_income() || !seen.insert(b.category) {
                tracing::warn!(category = %b.category, "skipping invalid stored budget");
                return None;
            }
            match budget_progress(b, &spend) {
                Ok(progress) => Some(BudgetLine {
                    category: b.category,
                    limit: b.limit,
                    progress,
                }),
                Err(err) => {
                    tracing::warn!(category = %b.category, error = %err, "skipping invalid stored budget");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    /// Saturates at 100 even when more than the target has been saved.
    pub percentage: Decimal,
    pub remaining: Decimal,
    pub is_completed: bool,
}

pub fn goal_progress(goal: &SavingsGoal) -> Result<GoalProgress, ValidationError> {
    if goal.target_amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveTarget(goal.target_amount));
    }
    let percentage = capped_percentage(goal.current_amount, goal.target_amount);
    Ok(GoalProgress {
        percentage,
        remaining: goal
            .target_amount
            .checked_sub(goal.current_amount)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO),
        is_completed: goal.current_amount >= goal.target_amount,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLine<'a> {
    #[serde(flatten)]
    pub goal: &'a SavingsGoal,
    #[serde(flatten)]
    pub progress: GoalProgress,
}

/// Progress of every goal. Stored goals without a positive target or with a
/// negative saved amount are skipped with a warning.
pub fn goal_overview(goals: &[SavingsGoal]) -> Vec<GoalLine<'_>> {
    goals
        .iter()
        .filter_map(|g| {
            if g.current_amount < Decimal::ZERO {
                tracing::warn!(id = %g.id, "skipping stored goal with negative savings");
                return None;
            }
            match goal_progress(g) {
                Ok(progress) => Some(GoalLine { goal: g, progress }),
                Err(err) => {
                    tracing::warn!(id = %g.id, error = %err, "skipping invalid stored goal");
                    None
                }
            }
        })
        .collect()
}

/// Most recent first; equal timestamps keep their stored order.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Case-insensitive substring of the description or category name.
    pub search: String,
    pub kind: Option<TransactionType>,
    pub order: SortOrder,
}

pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    query: &TransactionQuery,
) -> Vec<&'a Transaction> {
    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| query.kind.is_none_or(|k| t.kind == k))
        .filter(|t| {
            needle.is_empty()
                || t.description.to_lowercase().contains(&needle)
                || t.category.label().to_lowercase().contains(&needle)
        })
        .collect();
    match query.order {
        SortOrder::Descending => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Ascending => out.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    out
}

/// Every tag in use, sorted.
pub fn all_tags(transactions: &[Transaction]) -> BTreeSet<String> {
    transactions
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect()
}
