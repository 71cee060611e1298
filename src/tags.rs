//! Ingredient Tags
//!
//! Fixed tag allow-list plus the option lists derived from it.

use std::collections::BTreeSet;

use crate::edit_session::PantryRow;

/// Allowed ingredient tags, in display order. `other` is the catch-all.
pub const ALLOWED_TAGS: &[&str] = &[
    "fruits",
    "vegetables",
    "meat-chicken",
    "meat-beef",
    "meat-pork",
    "pasta",
    "frozen",
    "fish",
    "seafood",
    "dairy",
    "cheese",
    "condiment",
    "baking",
    "canned",
    "grains",
    "oil",
    "sauce",
    "spice",
    "other",
];

pub const FALLBACK_TAG: &str = "other";

pub fn is_allowed(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

/// Trim + lowercase; anything outside the allow-list becomes `other`.
pub fn normalize_tag(input: &str) -> String {
    let tag = input.trim().to_lowercase();
    if is_allowed(&tag) {
        tag
    } else {
        FALLBACK_TAG.to_string()
    }
}

/// Suggestions for the tag input: allow-list, with an unknown current tag
/// slotted in just before `other`.
pub fn datalist_options(current: &str) -> Vec<String> {
    let mut list: Vec<String> = ALLOWED_TAGS.iter().map(|t| t.to_string()).collect();
    if !current.is_empty() && !is_allowed(current) {
        list.insert(list.len() - 1, current.to_string());
    }
    list
}

/// Tag filter options: allow-list order (minus `other`), then unknown tags
/// present in the table sorted, then `other`. No duplicates.
pub fn filter_options<'a>(present: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let extra: BTreeSet<&str> = present
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !is_allowed(t))
        .collect();

    let mut options: Vec<String> = ALLOWED_TAGS
        .iter()
        .filter(|t| **t != FALLBACK_TAG)
        .map(|t| t.to_string())
        .collect();
    options.extend(extra.into_iter().map(str::to_string));
    options.push(FALLBACK_TAG.to_string());
    options
}

/// Selected value of a tag filter select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub const ALL_VALUE: &'static str = "__all__";

    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE || value.is_empty() {
            TagFilter::All
        } else {
            TagFilter::Tag(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TagFilter::All => Self::ALL_VALUE,
            TagFilter::Tag(t) => t,
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(t) => t == tag.trim(),
        }
    }

    /// Keep the selection when it is still offered, otherwise fall back to all.
    pub fn retain_in(self, options: &[String]) -> Self {
        match &self {
            TagFilter::Tag(t) if !options.contains(t) => TagFilter::All,
            _ => self,
        }
    }
}

/// Rows passing `filter`. The row being edited stays listed either way.
pub fn visible_rows(rows: Vec<PantryRow>, filter: &TagFilter, editing: Option<u32>) -> Vec<PantryRow> {
    rows.into_iter()
        .filter(|r| filter.matches(&r.tag) || editing == Some(r.key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_coerces_unknown_to_other() {
        assert_eq!(normalize_tag("  Dairy "), "dairy");
        assert_eq!(normalize_tag("snacks"), "other");
        assert_eq!(normalize_tag(""), "other");
    }

    #[test]
    fn datalist_keeps_unknown_current_before_other() {
        let opts = datalist_options("snacks");
        assert_eq!(opts.len(), ALLOWED_TAGS.len() + 1);
        assert_eq!(opts[opts.len() - 2], "snacks");
        assert_eq!(opts.last().map(String::as_str), Some("other"));
        assert_eq!(datalist_options("fish").len(), ALLOWED_TAGS.len());
    }

    #[test]
    fn filter_options_put_other_last() {
        let opts = filter_options(["zest", "dairy", "apple-ish", "zest", ""]);
        assert_eq!(opts.first().map(String::as_str), Some("fruits"));
        assert_eq!(opts.last().map(String::as_str), Some("other"));
        let extra: Vec<&str> = opts[ALLOWED_TAGS.len() - 1..opts.len() - 1].iter().map(String::as_str).collect();
        assert_eq!(extra, vec!["apple-ish", "zest"]);
        assert_eq!(opts.iter().filter(|t| *t == "dairy").count(), 1);
    }

    #[test]
    fn filter_selection_survives_only_when_offered() {
        let opts = filter_options(["dairy"]);
        assert_eq!(TagFilter::Tag("dairy".into()).retain_in(&opts), TagFilter::Tag("dairy".into()));
        assert_eq!(TagFilter::Tag("gone".into()).retain_in(&opts), TagFilter::All);
        assert!(TagFilter::from_value("__all__").matches("anything"));
        assert!(!TagFilter::from_value("fish").matches("dairy"));
    }

    #[test]
    fn edited_row_survives_the_filter() {
        let row = |key: u32, tag: &str| {
            let mut r = PantryRow::placeholder(key, crate::edit_session::RowKind::Ingredient);
            r.tag = tag.to_string();
            r
        };
        let rows = vec![row(1, "dairy"), row(2, "fish"), row(3, "meat-beef")];
        let filter = TagFilter::Tag("dairy".into());

        let keys = |v: Vec<PantryRow>| v.into_iter().map(|r| r.key).collect::<Vec<_>>();
        assert_eq!(keys(visible_rows(rows.clone(), &filter, None)), vec![1]);
        assert_eq!(keys(visible_rows(rows.clone(), &filter, Some(3))), vec![1, 3]);
        assert_eq!(keys(visible_rows(rows, &TagFilter::All, Some(3))), vec![1, 2, 3]);
    }
}
