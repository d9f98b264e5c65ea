//! Label formatting services for the dropdown selector.
//!
//! This module provides the pure text logic behind the dropdown button
//! label: Russian three-way pluralization and the selection summary
//! assembled from funnel and stage counts.

/// Label shown while nothing is selected.
pub const PLACEHOLDER_LABEL: &str = "Выбрать элементы";

/// Picks the Russian word form for a count.
///
/// Implements the three-way Slavic rule over the CLDR categories
/// one / few / many:
///
/// - last digit 1, except counts ending in 11 → `one`
/// - last digit 2..=4, except counts ending in 11..=19 → `few`
/// - everything else (including 0) → `many`
///
/// The mapping depends only on the integer count, so it can be tested
/// without any UI state.
///
/// # Arguments
///
/// * `count` - Number of items being described
/// * `one` - Form for counts like 1, 21, 101
/// * `few` - Form for counts like 2, 3, 24
/// * `many` - Form for counts like 0, 5, 11, 112
///
/// # Examples
///
/// ```
/// use funsel::domain::grammatical_form;
///
/// assert_eq!(grammatical_form(1, "этап", "этапа", "этапов"), "этап");
/// assert_eq!(grammatical_form(3, "этап", "этапа", "этапов"), "этапа");
/// assert_eq!(grammatical_form(11, "этап", "этапа", "этапов"), "этапов");
/// ```
pub fn grammatical_form<'a>(count: usize, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    if count % 10 == 1 && count % 100 != 11 {
        one
    } else if (2..=4).contains(&(count % 10)) && !(11..=19).contains(&(count % 100)) {
        few
    } else {
        many
    }
}

/// Formats the dropdown button label from selection counts.
///
/// With nothing selected the label is the fixed placeholder; otherwise it
/// reads `"<funnels> <funnel-word>, <stages> <stage-word>"` with both words
/// declined by [`grammatical_form`].
///
/// # Examples
///
/// ```
/// use funsel::domain::selection_label;
///
/// assert_eq!(selection_label(0, 0), "Выбрать элементы");
/// assert_eq!(selection_label(1, 1), "1 воронка, 1 этап");
/// assert_eq!(selection_label(1, 2), "1 воронка, 2 этапа");
/// ```
pub fn selection_label(funnel_count: usize, stage_count: usize) -> String {
    if funnel_count == 0 && stage_count == 0 {
        return PLACEHOLDER_LABEL.to_string();
    }

    let funnel_word = grammatical_form(funnel_count, "воронка", "воронки", "воронок");
    let stage_word = grammatical_form(stage_count, "этап", "этапа", "этапов");
    format!("{} {}, {} {}", funnel_count, funnel_word, stage_count, stage_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funnel_form(count: usize) -> &'static str {
        grammatical_form(count, "воронка", "воронки", "воронок")
    }

    #[test]
    fn test_one_form() {
        assert_eq!(funnel_form(1), "воронка");
        assert_eq!(funnel_form(21), "воронка");
        assert_eq!(funnel_form(101), "воронка");
        assert_eq!(funnel_form(121), "воронка");
    }

    #[test]
    fn test_few_form() {
        assert_eq!(funnel_form(2), "воронки");
        assert_eq!(funnel_form(3), "воронки");
        assert_eq!(funnel_form(4), "воронки");
        assert_eq!(funnel_form(22), "воронки");
        assert_eq!(funnel_form(104), "воронки");
    }

    #[test]
    fn test_many_form() {
        assert_eq!(funnel_form(0), "воронок");
        assert_eq!(funnel_form(5), "воронок");
        assert_eq!(funnel_form(10), "воронок");
        assert_eq!(funnel_form(26), "воронок");
        assert_eq!(funnel_form(100), "воронок");
    }

    #[test]
    fn test_teens_always_take_many() {
        // 11..=19 override the last-digit rules.
        for count in [11, 12, 13, 14, 15, 19, 111, 112, 114, 119] {
            assert_eq!(funnel_form(count), "воронок", "count {}", count);
        }
    }

    #[test]
    fn test_placeholder_when_empty() {
        assert_eq!(selection_label(0, 0), PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_label_declines_both_counts() {
        assert_eq!(selection_label(1, 1), "1 воронка, 1 этап");
        assert_eq!(selection_label(1, 2), "1 воронка, 2 этапа");
        assert_eq!(selection_label(2, 4), "2 воронки, 4 этапа");
        assert_eq!(selection_label(5, 20), "5 воронок, 20 этапов");
        assert_eq!(selection_label(21, 31), "21 воронка, 31 этап");
        assert_eq!(selection_label(11, 14), "11 воронок, 14 этапов");
    }
}
