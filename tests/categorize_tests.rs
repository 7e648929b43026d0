// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use montra::categorize::*;
use montra::models::{Category, GoalIcon};
use regex::Regex;

#[test]
fn goal_names_pick_the_first_matching_icon() {
    assert_eq!(suggest_goal_icon("New MacBook Pro"), GoalIcon::Tech);
    assert_eq!(suggest_goal_icon("Spring Break Trip"), GoalIcon::Travel);
    // travel is checked before car
    assert_eq!(suggest_goal_icon("Car trip"), GoalIcon::Travel);
    assert_eq!(suggest_goal_icon("Summer at the beach"), GoalIcon::Vacation);
    assert_eq!(suggest_goal_icon("Dog vet fund"), GoalIcon::Pet);
    assert_eq!(suggest_goal_icon("Emergency Fund"), GoalIcon::Savings);
    assert_eq!(suggest_goal_icon("something else"), GoalIcon::Target);
    assert_eq!(suggest_goal_icon(""), GoalIcon::Target);
}

#[test]
fn matching_ignores_case() {
    assert_eq!(suggest_goal_icon("NEW IPHONE"), GoalIcon::Phone);
    assert_eq!(suggest_goal_icon("Nike Sneakers"), GoalIcon::Fashion);
}

#[test]
fn rule_order_decides_overlaps() {
    let rules = vec![
        IconRule {
            pattern: Regex::new("car|drive").unwrap(),
            icon: GoalIcon::Car,
        },
        IconRule {
            pattern: Regex::new("trip|travel").unwrap(),
            icon: GoalIcon::Travel,
        },
    ];
    assert_eq!(suggest_goal_icon_with(&rules, "Car trip"), GoalIcon::Car);

    let reversed: Vec<IconRule> = rules.into_iter().rev().collect();
    assert_eq!(suggest_goal_icon_with(&reversed, "Car trip"), GoalIcon::Travel);
    assert_eq!(suggest_goal_icon_with(&[], "Car trip"), GoalIcon::Target);
}

#[test]
fn every_category_has_a_presentation() {
    for category in Category::ALL {
        let p = category_presentation(category);
        assert!(!p.icon.is_empty(), "{category} has no icon");
        assert!(p.color.starts_with("bg-"), "{category} has no color");
    }
    assert_eq!(category_presentation(Category::Food).icon, "coffee");
}

#[test]
fn budget_eligible_categories_exclude_income() {
    let eligible: Vec<Category> = Category::budget_eligible().collect();
    assert_eq!(eligible.len(), 12);
    assert!(eligible.contains(&Category::PersonalCare));
    assert!(!eligible.contains(&Category::Scholarship));
    assert!(!eligible.contains(&Category::IncomeSource));
}
