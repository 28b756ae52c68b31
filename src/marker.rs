//! DISABLED-prefix naming convention
//!
//! A mod folder is disabled by renaming it with a marker prefix. The pattern
//! below recognizes every spelling seen in the wild (`DISABLED Foo`,
//! `disabled_Foo`, `dis-Foo`, ...); newly disabled folders always get the
//! canonical `DISABLED ` spelling.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Canonical prefix written when disabling a folder name.
pub const DISABLED_PREFIX: &str = "DISABLED ";

/// Single anchored pattern for every marker spelling: one of the tokens
/// (longest listed first, so alternation prefers `disabled` over `dis`)
/// followed by any run of `_`, `-`, or whitespace separators.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:disabled|disable|dis)[-_\s]*").expect("marker pattern is valid")
});

/// Check whether a folder name carries a disabled marker.
///
/// Prefix-anchored and case-insensitive: `DISABLED Foo`, `disabled_Foo`,
/// `dis-Foo` and `DiSaBLe Foo` all match; a marker mid-name does not. Names
/// that merely start with the letters `dis` ("distance") also match; the
/// `dis` token keeps the pattern broad, and callers must not assume the
/// answer is free of such false positives.
pub fn is_disabled_name(name: &str) -> bool {
    MARKER_RE.is_match(name)
}

/// Strip a disabled marker and its trailing separators from a folder name.
///
/// Names without a marker come back unchanged. After a removal the result is
/// whitespace-trimmed, so `"DISABLED  My Mod "` yields `"My Mod"`. Stripping
/// twice gives the same answer as stripping once unless the remainder itself
/// happens to start with a marker token.
pub fn strip_disabled_prefix(name: &str) -> String {
    match MARKER_RE.find(name) {
        Some(m) => name[m.end()..].trim().to_string(),
        None => name.to_string(),
    }
}

/// Compute the path that puts a folder into the requested enabled state.
///
/// Only the final segment changes. Both `/` and `\` are accepted as input
/// separators (each separator character is a split point, so empty segments
/// survive the round trip) and the output is always `/`-joined. Disabling an
/// already-disabled basename keeps its existing marker spelling rather than
/// stacking or rewriting prefixes.
///
/// Total over all strings: single segments, empty input and trailing
/// separators all produce a best-effort result instead of an error.
pub fn toggle_disabled_in_path(path: &str, enable: bool) -> String {
    let mut segments: Vec<String> = path.split(['/', '\\']).map(str::to_string).collect();

    if let Some(basename) = segments.last_mut() {
        if enable {
            *basename = strip_disabled_prefix(basename);
        } else if !is_disabled_name(basename) {
            *basename = format!("{}{}", DISABLED_PREFIX, basename);
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_accepts_marker_variants() {
        assert!(is_disabled_name("DISABLED MyMod"));
        assert!(is_disabled_name("disabled MyMod"));
        assert!(is_disabled_name("DiSaBLeD_MyMod"));
        assert!(is_disabled_name("disable-MyMod"));
        assert!(is_disabled_name("dis MyMod"));
        assert!(is_disabled_name("dis"));
    }

    #[test]
    fn test_classifier_rejects_unmarked_names() {
        assert!(!is_disabled_name("MyMod"));
        assert!(!is_disabled_name(""));
        assert!(!is_disabled_name("d"));
        // A marker somewhere after the start does not count.
        assert!(!is_disabled_name("Some_disable_mod"));
        assert!(!is_disabled_name("My disabled backup"));
    }

    #[test]
    fn test_classifier_dis_overmatch_is_preserved() {
        // The bare `dis` token means ordinary words starting with those
        // letters classify as disabled. Long-standing behavior of the
        // convention; do not tighten the pattern.
        assert!(is_disabled_name("distance_mod"));
        assert!(is_disabled_name("Display Stand"));
    }

    #[test]
    fn test_strip_removes_marker_and_separators() {
        assert_eq!(strip_disabled_prefix("DISABLED MyMod"), "MyMod");
        assert_eq!(strip_disabled_prefix("disabled_MyMod"), "MyMod");
        assert_eq!(strip_disabled_prefix("dis-MyMod"), "MyMod");
        assert_eq!(strip_disabled_prefix("disable   MyMod"), "MyMod");
        assert_eq!(strip_disabled_prefix("DISABLED -_ MyMod"), "MyMod");
    }

    #[test]
    fn test_strip_leaves_unmarked_names_alone() {
        assert_eq!(strip_disabled_prefix("MyMod"), "MyMod");
        assert_eq!(strip_disabled_prefix("My Mod 2.0"), "My Mod 2.0");
        assert_eq!(strip_disabled_prefix(""), "");
    }

    #[test]
    fn test_strip_trims_after_removal() {
        assert_eq!(strip_disabled_prefix("DISABLED  My Mod "), "My Mod");
        assert_eq!(strip_disabled_prefix("DISABLED "), "");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for s in [
            "DISABLED MyMod",
            "disabled_MyMod",
            "dis MyMod",
            "MyMod",
            "",
            "   ",
            "DISABLED ",
            "distance_mod",
        ] {
            let once = strip_disabled_prefix(s);
            assert_eq!(strip_disabled_prefix(&once), once, "double strip of {s:?}");
        }
    }

    #[test]
    fn test_strip_when_remainder_starts_with_marker_token() {
        // A remainder that coincidentally starts with a marker token is
        // stripped again on a second pass. Known limit, not special-cased.
        assert_eq!(strip_disabled_prefix("DISABLED dis MyMod"), "dis MyMod");
        assert_eq!(strip_disabled_prefix("dis MyMod"), "MyMod");
    }

    #[test]
    fn test_toggle_disable_prepends_canonical_prefix() {
        assert_eq!(
            toggle_disabled_in_path("mods/Character/MyMod", false),
            "mods/Character/DISABLED MyMod"
        );
        assert_eq!(toggle_disabled_in_path("MyMod", false), "DISABLED MyMod");
    }

    #[test]
    fn test_toggle_enable_strips_any_marker_variant() {
        assert_eq!(
            toggle_disabled_in_path("mods/Character/DISABLED MyMod", true),
            "mods/Character/MyMod"
        );
        assert_eq!(
            toggle_disabled_in_path("mods/Character/disabled_MyMod", true),
            "mods/Character/MyMod"
        );
        assert_eq!(
            toggle_disabled_in_path("mods/Character/MyMod", true),
            "mods/Character/MyMod"
        );
    }

    #[test]
    fn test_toggle_never_stacks_prefixes() {
        // Disabling an already-disabled folder leaves the name untouched,
        // whatever the marker spelling.
        assert_eq!(
            toggle_disabled_in_path("mods/Character/DISABLED MyMod", false),
            "mods/Character/DISABLED MyMod"
        );
        assert_eq!(
            toggle_disabled_in_path("mods/Character/dis-MyMod", false),
            "mods/Character/dis-MyMod"
        );
    }

    #[test]
    fn test_toggle_normalizes_separators_to_forward_slash() {
        assert_eq!(
            toggle_disabled_in_path(r"mods\Character\MyMod", false),
            "mods/Character/DISABLED MyMod"
        );
        assert_eq!(
            toggle_disabled_in_path(r"mods\Character/MyMod", true),
            "mods/Character/MyMod"
        );
    }

    #[test]
    fn test_toggle_only_touches_last_segment() {
        // A marker on a parent directory is not the toggler's business.
        assert_eq!(
            toggle_disabled_in_path("mods/DISABLED Character/MyMod", false),
            "mods/DISABLED Character/DISABLED MyMod"
        );
        assert_eq!(
            toggle_disabled_in_path("mods/DISABLED Character/MyMod", true),
            "mods/DISABLED Character/MyMod"
        );
    }

    #[test]
    fn test_toggle_degenerate_inputs() {
        assert_eq!(toggle_disabled_in_path("", false), "DISABLED ");
        assert_eq!(toggle_disabled_in_path("", true), "");
        // A trailing separator means an empty basename; the transformation
        // is still applied best-effort and empty segments survive.
        assert_eq!(
            toggle_disabled_in_path("mods/MyMod/", false),
            "mods/MyMod/DISABLED "
        );
        assert_eq!(toggle_disabled_in_path("a//b", false), "a//DISABLED b");
    }

    #[test]
    fn test_toggle_round_trip_recovers_basename() {
        for base in ["MyMod", "My Mod 2.0", "ÜberSkin"] {
            let path = format!("mods/Character/{base}");
            let disabled = toggle_disabled_in_path(&path, false);
            assert!(disabled.ends_with(&format!("DISABLED {base}")));
            assert_eq!(toggle_disabled_in_path(&disabled, true), path);
        }
    }

    #[test]
    fn test_toggle_rewrites_variant_spelling_to_canonical() {
        // Enable-then-disable of a non-canonical variant lands on the
        // canonical spelling; the original spelling is not remembered.
        let enabled = toggle_disabled_in_path("mods/disabled_MyMod", true);
        assert_eq!(enabled, "mods/MyMod");
        assert_eq!(
            toggle_disabled_in_path(&enabled, false),
            "mods/DISABLED MyMod"
        );
    }
}
