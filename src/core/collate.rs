// Frame-number collation
//
// Sheet extractors name frames `<sheet>_<n>`. Lexical order puts `walk_10`
// before `walk_9`, so frames are ordered by the number after the last
// underscore instead.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

const FRAME_NUMBER_PATTERN: &str = r"_([0-9]+)";

static FRAME_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frame_number_regex() -> &'static Regex {
    FRAME_NUMBER_REGEX
        .get_or_init(|| Regex::new(FRAME_NUMBER_PATTERN).expect("invalid frame number pattern"))
}

/// Extract the number following the last `_<digits>` run in a name
///
/// Returns `None` when the name carries no such run. Numbers too large for a
/// `u64` saturate to `u64::MAX`.
pub fn extract_number(name: &str) -> Option<u64> {
    let captures = frame_number_regex().captures_iter(name).last()?;
    let digits = captures.get(1)?.as_str();
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Compare two frame names by their extracted number only
///
/// Names without a number compare equal to each other and sort before every
/// numbered name. Zero padding is ignored, so `a_05` equals `a_5`.
pub fn compare(a: &str, b: &str) -> Ordering {
    // Option orders None before Some, which is exactly the sentinel-first rule
    extract_number(a).cmp(&extract_number(b))
}

/// Total order used for sorting: numeric first, then ordinal string order
pub fn compare_with_tiebreak(a: &str, b: &str) -> Ordering {
    compare(a, b).then_with(|| a.cmp(b))
}

/// Sort items by the frame number embedded in their name
pub fn sort_by_frame_number<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_with_tiebreak(name(a), name(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("sheet_7"), Some(7));
        assert_eq!(extract_number("walk_down_12"), Some(12));
        assert_eq!(extract_number("a_1_2"), Some(2));
        assert_eq!(extract_number("a_05"), Some(5));
    }

    #[test]
    fn test_extract_number_missing() {
        assert_eq!(extract_number("idle"), None);
        assert_eq!(extract_number("sheet_"), None);
        assert_eq!(extract_number("sheet7"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn test_extract_number_uses_last_run() {
        // Trailing text after the last numbered run is ignored
        assert_eq!(extract_number("hero_3_left"), Some(3));
        assert_eq!(extract_number("hero_3_left_4"), Some(4));
    }

    #[test]
    fn test_extract_number_ascii_digits_only() {
        // Arabic-Indic and fullwidth digits are not frame numbers
        assert_eq!(extract_number("s_\u{0663}"), None);
        assert_eq!(extract_number("s_\u{FF17}"), None);
        assert_eq!(extract_number("s_2\u{0663}"), Some(2));
    }

    #[test]
    fn test_extract_number_overflow_saturates() {
        assert_eq!(extract_number("s_99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_compare_numeric_not_lexical() {
        assert_eq!(compare("a_2", "a_10"), Ordering::Less);
        assert_eq!(compare("frame_10", "frame_9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_ignores_padding() {
        assert_eq!(compare("a_05", "a_5"), Ordering::Equal);
    }

    #[test]
    fn test_compare_unnumbered_first() {
        assert_eq!(compare("idle", "other"), Ordering::Equal);
        assert_eq!(compare("idle", "a_0"), Ordering::Less);
        assert_eq!(compare("a_0", "idle"), Ordering::Greater);
    }

    #[test]
    fn test_tiebreak_is_total() {
        assert_eq!(compare_with_tiebreak("a_05", "a_5"), Ordering::Less);
        assert_eq!(compare_with_tiebreak("b", "a"), Ordering::Greater);
        assert_eq!(compare_with_tiebreak("a_5", "a_5"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_frame_number() {
        let mut names = vec!["s_10", "s_2", "cover", "s_1", "s_02", "banner"];
        sort_by_frame_number(&mut names, |n| n);

        assert_eq!(names, vec!["banner", "cover", "s_1", "s_02", "s_2", "s_10"]);
    }
}
