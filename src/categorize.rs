// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{Category, GoalIcon};

pub struct IconRule {
    pub pattern: Regex,
    pub icon: GoalIcon,
}

const RULE_SOURCES: &[(&str, GoalIcon)] = &[
    // tech
    ("laptop|mac|pc|computer|tech|ipad|electronics", GoalIcon::Tech),
    ("phone|iphone|mobile", GoalIcon::Phone),
    ("camera|lens|photo|video", GoalIcon::Camera),
    ("game|console|ps5|xbox|switch|playstation", GoalIcon::Game),
    ("watch|apple watch|fitbit", GoalIcon::Watch),
    // travel
    ("trip|travel|fly|plane|flight|vacation|break|holiday", GoalIcon::Travel),
    ("beach|sea|ocean|summer|resort", GoalIcon::Vacation),
    ("camp|hike|tent|outdoor|nature", GoalIcon::Camping),
    // transport
    ("car|tesla|bmw|toyota|jeep|drive", GoalIcon::Car),
    ("bike|cycle|bicycle", GoalIcon::Bike),
    // lifestyle
    ("house|rent|dorm|apartment|home|furniture|bed|sofa", GoalIcon::Home),
    ("tuition|school|college|debt|loan|book|class", GoalIcon::Education),
    ("concert|music|ticket|festival|guitar|piano", GoalIcon::Music),
    ("shoe|sneaker|jordan|nike|adidas|boot|clothes|dress|fashion", GoalIcon::Fashion),
    ("food|dinner|date|restaurant|pizza|burger", GoalIcon::Food),
    ("dog|cat|pet|vet", GoalIcon::Pet),
    ("gift|present|christmas|birthday", GoalIcon::Gift),
    ("emergency|safe|fund", GoalIcon::Savings),
    ("job|work|internship", GoalIcon::Work),
    ("art|paint|draw", GoalIcon::Art),
];

/// Evaluated top to bottom, first match wins. Reordering changes results.
pub static GOAL_ICON_RULES: Lazy<Vec<IconRule>> = Lazy::new(|| {
    RULE_SOURCES
        .iter()
        .map(|(pat, icon)| IconRule {
            pattern: Regex::new(pat).expect("goal icon patterns are valid regexes"),
            icon: *icon,
        })
        .collect()
});

pub fn suggest_goal_icon(name: &str) -> GoalIcon {
    suggest_goal_icon_with(&GOAL_ICON_RULES, name)
}

pub fn suggest_goal_icon_with(rules: &[IconRule], name: &str) -> GoalIcon {
    let hay = name.to_lowercase();
    rules
        .iter()
        .find(|r| r.pattern.is_match(&hay))
        .map(|r| r.icon)
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub icon: &'static str,
    pub color: &'static str,
}

/// Display icon and color class for a category. The match is exhaustive, so
/// a new category does not compile until it has an entry here.
pub fn category_presentation(category: Category) -> Presentation {
    let (icon, color) = match category {
        Category::Food => ("coffee", "bg-orange-100 text-orange-600"),
        Category::Travel => ("bus", "bg-blue-100 text-blue-600"),
        Category::Rent => ("home", "bg-red-100 text-red-600"),
        Category::Utilities => ("zap", "bg-yellow-100 text-yellow-600"),
        Category::Subscriptions => ("tv", "bg-purple-100 text-purple-600"),
        Category::Entertainment => ("gamepad-2", "bg-pink-100 text-pink-600"),
        Category::Academics => ("graduation-cap", "bg-emerald-100 text-emerald-600"),
        Category::Shopping => ("shopping-bag", "bg-indigo-100 text-indigo-600"),
        Category::Groceries => ("apple", "bg-lime-100 text-lime-600"),
        Category::Transportation => ("car", "bg-sky-100 text-sky-600"),
        Category::PersonalCare => ("sparkles", "bg-rose-100 text-rose-600"),
        Category::Other => ("more-horizontal", "bg-slate-100 text-slate-600"),
        Category::Income => ("dollar-sign", "bg-green-100 text-green-600"),
        Category::IncomeSource => ("wallet", "bg-teal-100 text-teal-600"),
        Category::Scholarship => ("award", "bg-cyan-100 text-cyan-600"),
        Category::Gift => ("gift", "bg-rose-100 text-rose-600"),
    };
    Presentation { icon, color }
}
