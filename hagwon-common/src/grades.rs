//! Grade-level tag catalog
//!
//! Twelve fixed grade tags (elementary 1-6, middle 1-3, high 1-3) with
//! Korean display labels. The catalog never changes at runtime; the subset
//! actually in use is derived from existing records by the repository's
//! `used_grades` queries.

use serde::Serialize;

/// A grade option as shown in dropdowns and filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// The full catalog, in display order
pub const GRADE_OPTIONS: [GradeOption; 12] = [
    GradeOption { value: "elem-1", label: "초1" },
    GradeOption { value: "elem-2", label: "초2" },
    GradeOption { value: "elem-3", label: "초3" },
    GradeOption { value: "elem-4", label: "초4" },
    GradeOption { value: "elem-5", label: "초5" },
    GradeOption { value: "elem-6", label: "초6" },
    GradeOption { value: "middle-1", label: "중1" },
    GradeOption { value: "middle-2", label: "중2" },
    GradeOption { value: "middle-3", label: "중3" },
    GradeOption { value: "high-1", label: "고1" },
    GradeOption { value: "high-2", label: "고2" },
    GradeOption { value: "high-3", label: "고3" },
];

/// Whether a tag value belongs to the catalog
pub fn is_known(value: &str) -> bool {
    GRADE_OPTIONS.iter().any(|opt| opt.value == value)
}

/// Display label for a grade value
///
/// Unknown values are echoed back unchanged so stale or hand-entered tags
/// still render instead of failing the whole page.
pub fn label_for(value: &str) -> &str {
    GRADE_OPTIONS
        .iter()
        .find(|opt| opt.value == value)
        .map(|opt| opt.label)
        .unwrap_or(value)
}

/// Catalog entries whose value appears in `used`, in catalog order
///
/// `used` is the flattened, deduplicated tag list from one collection's
/// records. Values absent from the catalog are dropped here; they are still
/// rendered on individual records via [`label_for`].
pub fn active_options(used: &[String]) -> Vec<GradeOption> {
    GRADE_OPTIONS
        .iter()
        .copied()
        .filter(|opt| used.iter().any(|value| value == opt.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_twelve_entries() {
        assert_eq!(GRADE_OPTIONS.len(), 12);
        assert_eq!(GRADE_OPTIONS[0].value, "elem-1");
        assert_eq!(GRADE_OPTIONS[11].value, "high-3");
    }

    #[test]
    fn test_label_for_known_value() {
        assert_eq!(label_for("high-1"), "고1");
        assert_eq!(label_for("elem-6"), "초6");
    }

    #[test]
    fn test_label_for_is_total() {
        // Unknown values are echoed back, never an error
        assert_eq!(label_for("kindergarten"), "kindergarten");
        assert_eq!(label_for(""), "");
    }

    #[test]
    fn test_active_options_preserves_catalog_order() {
        let used = vec![
            "high-3".to_string(),
            "elem-2".to_string(),
            "middle-1".to_string(),
        ];
        let active = active_options(&used);
        let values: Vec<&str> = active.iter().map(|opt| opt.value).collect();
        assert_eq!(values, vec!["elem-2", "middle-1", "high-3"]);
    }

    #[test]
    fn test_active_options_drops_unknown_values() {
        let used = vec!["high-1".to_string(), "adult".to_string()];
        let active = active_options(&used);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].value, "high-1");
    }

    #[test]
    fn test_active_options_empty() {
        assert!(active_options(&[]).is_empty());
    }
}
