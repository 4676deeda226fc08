//! Quoted-include extraction from raw source text.
//!
//! This is a pure text scan, not a parse: no macro expansion, no
//! conditional-compilation evaluation, no angle-bracket/system includes.
//! The extractor only reports the literal strings inside
//! `#include "..."` directives; whether they mean anything is the
//! resolver's concern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a line whose first token is `#include` followed by a
/// double-quoted literal. Angle-bracket includes do not match.
static QUOTED_INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*#\s*include\s+"([^"]*)""#).expect("static pattern compiles"));

/// Yield the raw include strings of `text`, one per matching line.
///
/// The returned iterator is lazy and restartable (call again on the same
/// text). Non-matching lines are skipped silently. Captured strings have
/// backslashes normalized to `/`; no further validation happens here, as a
/// capture may be empty or name a file that does not exist.
pub fn quoted_includes(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().filter_map(|line| {
        QUOTED_INCLUDE
            .captures(line)
            .map(|caps| caps[1].replace('\\', "/"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        quoted_includes(text).collect()
    }

    #[test]
    fn extracts_quoted_includes_only() {
        let text = r#"
#include "Camera.h"
#include <vector>
#include "Physics/Units.h"
int main() {}
"#;
        assert_eq!(extract(text), vec!["Camera.h", "Physics/Units.h"]);
    }

    #[test]
    fn tolerates_leading_whitespace_and_hash_spacing() {
        let text = "  #include \"A.h\"\n#  include \"B.h\"\n";
        assert_eq!(extract(text), vec!["A.h", "B.h"]);
    }

    #[test]
    fn normalizes_backslash_separators() {
        let text = "#include \"UI\\Panel.h\"\n";
        assert_eq!(extract(text), vec!["UI/Panel.h"]);
    }

    #[test]
    fn passes_through_empty_and_odd_captures() {
        // Validation is the resolver's job.
        let text = "#include \"\"\n#include \"   \"\n";
        assert_eq!(extract(text), vec!["", "   "]);
    }

    #[test]
    fn skips_directives_mentioned_mid_line() {
        // A comment marker before the hash means the line does not start
        // with the directive token, so nothing is extracted.
        let text = "// #include \"commented.h\"\n";
        assert!(extract(text).is_empty());
    }

    #[test]
    fn empty_text_yields_empty_sequence() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn iterator_is_restartable() {
        let text = "#include \"A.h\"\n";
        assert_eq!(quoted_includes(text).count(), 1);
        assert_eq!(quoted_includes(text).count(), 1);
    }
}
