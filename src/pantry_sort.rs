//! Pantry Ordering & Highlights
//!
//! Sorting and "soon" badges for the read-only pantry tables.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::config::EXPIRING_SOON_DAYS;
use crate::dates::{days_between, parse_display_date};
use crate::edit_session::PantryRow;
use crate::tags::ALLOWED_TAGS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngredientSort {
    #[default]
    Name,
    Expiration,
    /// Allow-list order, triggered by its own button
    TagOrder,
}

impl IngredientSort {
    pub fn from_value(value: &str) -> Self {
        match value {
            "expiration" => IngredientSort::Expiration,
            "tag-order" => IngredientSort::TagOrder,
            _ => IngredientSort::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CookedSort {
    #[default]
    Name,
    Servings,
    Date,
}

impl CookedSort {
    pub fn from_value(value: &str) -> Self {
        match value {
            "servings" => CookedSort::Servings,
            "date" => CookedSort::Date,
            _ => CookedSort::Name,
        }
    }
}

fn by_name(a: &PantryRow, b: &PantryRow) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

fn tag_rank(tag: &str) -> Option<usize> {
    ALLOWED_TAGS.iter().position(|t| *t == tag)
}

pub fn sort_ingredients(rows: &mut [PantryRow], sort: IngredientSort) {
    match sort {
        IngredientSort::Name => rows.sort_by(by_name),
        IngredientSort::Expiration => rows.sort_by(|a, b| {
            match (parse_display_date(&a.date), parse_display_date(&b.date)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| by_name(a, b))
        }),
        IngredientSort::TagOrder => rows.sort_by(|a, b| {
            let ta = a.tag.trim().to_lowercase();
            let tb = b.tag.trim().to_lowercase();
            match (tag_rank(&ta), tag_rank(&tb)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (None, None) => ta.cmp(&tb),
            }
            .then_with(|| by_name(a, b))
        }),
    }
}

pub fn sort_cooked(rows: &mut [PantryRow], sort: CookedSort) {
    match sort {
        CookedSort::Name => rows.sort_by(by_name),
        CookedSort::Servings => rows.sort_by(|a, b| {
            let sa = a.amount.unwrap_or(0.0);
            let sb = b.amount.unwrap_or(0.0);
            sa.partial_cmp(&sb).unwrap_or(Ordering::Equal).then_with(|| by_name(a, b))
        }),
        // Unparseable dates sort as the oldest
        CookedSort::Date => rows.sort_by(|a, b| {
            parse_display_date(&a.date)
                .cmp(&parse_display_date(&b.date))
                .then_with(|| by_name(a, b))
        }),
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// `Expiring in N day(s)` for expirations within the next ten days.
pub fn expiring_badge(date: &str, today: NaiveDate) -> Option<String> {
    let exp = parse_display_date(date)?;
    let diff = days_between(today, exp);
    (0..=EXPIRING_SOON_DAYS)
        .contains(&diff)
        .then(|| format!("Expiring in {diff} day{}", plural(diff)))
}

/// `Cooked N day(s) ago` for dishes cooked within the last ten days.
pub fn cooked_badge(date: &str, today: NaiveDate) -> Option<String> {
    let cooked = parse_display_date(date)?;
    let diff = days_between(cooked, today);
    (0..=EXPIRING_SOON_DAYS)
        .contains(&diff)
        .then(|| format!("Cooked {diff} day{} ago", plural(diff)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_session::RowKind;

    fn row(name: &str, tag: &str, date: &str, amount: f64) -> PantryRow {
        PantryRow {
            key: 0,
            kind: RowKind::Ingredient,
            name: name.into(),
            amount: Some(amount),
            unit: "g".into(),
            tag: tag.into(),
            date: date.into(),
            persisted: true,
        }
    }

    fn names(rows: &[PantryRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn expiration_sort_puts_bad_dates_last() {
        let mut rows = vec![
            row("Zucchini", "vegetables", "??", 1.0),
            row("Milk", "dairy", "05-03-2025", 1.0),
            row("Apple", "fruits", "01-03-2025", 1.0),
            row("Beef", "meat-beef", "05-03-2025", 1.0),
            row("Anchovy", "fish", "", 1.0),
        ];
        sort_ingredients(&mut rows, IngredientSort::Expiration);
        assert_eq!(names(&rows), vec!["Apple", "Beef", "Milk", "Anchovy", "Zucchini"]);
    }

    #[test]
    fn tag_order_ranks_known_before_unknown() {
        let mut rows = vec![
            row("Chips", "snacks", "", 1.0),
            row("Salt", "spice", "", 1.0),
            row("Pear", "fruits", "", 1.0),
            row("Apple", "fruits", "", 1.0),
            row("Candy", "candy", "", 1.0),
        ];
        sort_ingredients(&mut rows, IngredientSort::TagOrder);
        assert_eq!(names(&rows), vec!["Apple", "Pear", "Salt", "Candy", "Chips"]);
    }

    #[test]
    fn cooked_sorts() {
        let mut rows = vec![
            row("Stew", "", "10-10-2026", 4.0),
            row("Soup", "", "bad", 2.0),
            row("Pie", "", "01-10-2026", 2.0),
        ];
        sort_cooked(&mut rows, CookedSort::Servings);
        assert_eq!(names(&rows), vec!["Pie", "Soup", "Stew"]);
        sort_cooked(&mut rows, CookedSort::Date);
        assert_eq!(names(&rows), vec!["Soup", "Pie", "Stew"]);
        sort_cooked(&mut rows, CookedSort::Name);
        assert_eq!(names(&rows), vec!["Pie", "Soup", "Stew"]);
    }

    #[test]
    fn badges_cover_ten_day_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(expiring_badge("16-10-2026", today).as_deref(), Some("Expiring in 0 days"));
        assert_eq!(expiring_badge("17-10-2026", today).as_deref(), Some("Expiring in 1 day"));
        assert_eq!(expiring_badge("26-10-2026", today).as_deref(), Some("Expiring in 10 days"));
        assert_eq!(expiring_badge("27-10-2026", today), None);
        assert_eq!(expiring_badge("15-10-2026", today), None);
        assert_eq!(cooked_badge("13-10-2026", today).as_deref(), Some("Cooked 3 days ago"));
        assert_eq!(cooked_badge("17-10-2026", today), None);
    }
}
