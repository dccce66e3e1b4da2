//! Pure text functions behind sorting and section labels.

use super::options::SortOptions;

/// Label shared by every section whose key starts with a digit when
/// [`SortOptions::group_numbers`] is set.
pub const NUMBER_SECTION_LABEL: &str = "#";

/// Keep only ASCII letters and digits.
pub fn strip_symbols(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Comparison token for a sort-key value.
///
/// Lower-casing happens before stripping, and stripping applies to the whole
/// value so that `"(Arrays)"` and `"arrays"` compare equal.
pub fn sort_token(value: &str, options: &SortOptions) -> String {
    let token = if options.ignore_case {
        value.to_lowercase()
    } else {
        value.to_string()
    };

    if options.ignore_symbols {
        strip_symbols(&token)
    } else {
        token
    }
}

/// First letter or digit in `value`, scanning left to right.
pub fn first_alphanumeric(value: &str) -> Option<char> {
    value.chars().find(|c| c.is_alphanumeric())
}

/// Section label for a sort-key value, or `None` when the value holds no
/// letter or digit.
pub fn section_label(value: &str, options: &SortOptions) -> Option<String> {
    let first = first_alphanumeric(value)?;

    if options.group_numbers && first.is_numeric() {
        return Some(NUMBER_SECTION_LABEL.to_string());
    }

    if options.ignore_case {
        Some(first.to_uppercase().collect())
    } else {
        Some(first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_symbols() {
        assert_eq!(strip_symbols("apple pie"), "applepie");
        assert_eq!(strip_symbols("(C++) & Rust_2"), "CRust2");
        assert_eq!(strip_symbols("café"), "caf");
        assert_eq!(strip_symbols("--"), "");
    }

    #[test]
    fn test_sort_token_variants() {
        let raw = SortOptions::new();
        let case = SortOptions::new().with_ignore_case(true);
        let symbols = SortOptions::new().with_ignore_symbols(true);
        let both = case.with_ignore_symbols(true);

        assert_eq!(sort_token("Apple Pie!", &raw), "Apple Pie!");
        assert_eq!(sort_token("Apple Pie!", &case), "apple pie!");
        assert_eq!(sort_token("Apple Pie!", &symbols), "ApplePie");
        assert_eq!(sort_token("Apple Pie!", &both), "applepie");
    }

    #[test]
    fn test_first_alphanumeric() {
        assert_eq!(first_alphanumeric("  (banana)"), Some('b'));
        assert_eq!(first_alphanumeric("#42"), Some('4'));
        assert_eq!(first_alphanumeric("élan"), Some('é'));
        assert_eq!(first_alphanumeric("!?"), None);
        assert_eq!(first_alphanumeric(""), None);
    }

    #[test]
    fn test_section_label_case() {
        let raw = SortOptions::new();
        let case = SortOptions::new().with_ignore_case(true);

        assert_eq!(section_label("apple", &raw).as_deref(), Some("a"));
        assert_eq!(section_label("apple", &case).as_deref(), Some("A"));
        assert_eq!(section_label("...zebra", &case).as_deref(), Some("Z"));
    }

    #[test]
    fn test_section_label_numbers() {
        let grouped = SortOptions::new().with_group_numbers(true);

        assert_eq!(section_label("42 Questions", &SortOptions::new()).as_deref(), Some("4"));
        assert_eq!(section_label("42 Questions", &grouped).as_deref(), Some("#"));
        assert_eq!(section_label("7 Habits", &grouped).as_deref(), Some("#"));
        assert_eq!(section_label("Questions", &grouped).as_deref(), Some("Q"));
    }

    #[test]
    fn test_section_label_none() {
        assert_eq!(section_label("", &SortOptions::recommended()), None);
        assert_eq!(section_label("***", &SortOptions::recommended()), None);
    }
}
