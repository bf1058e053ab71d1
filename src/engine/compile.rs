//! Wildcard pattern compilation.
//!
//! Patterns use a small glob-like language:
//!
//! - `*` matches any run of characters, including path separators.
//! - `?` matches exactly one character.
//! - `{a,b,c}` matches any of the comma-separated options (no nesting;
//!   options are whitespace-trimmed and may themselves contain wildcards).
//! - `**/` matches zero or more complete path segments, so `src/**/*`
//!   accepts `src/app.ts` as well as `src/a/b/app.ts`. A leading `./` is
//!   the current-directory idiom and is stripped.
//!
//! Everything else is literal. The compiled matcher is anchored to the whole
//! candidate string and case-insensitive, so `README.md` matches `readme.MD`
//! and nothing longer.
//!
//! Compilation never fails: the translator escapes all regex metacharacters
//! it does not consume, and malformed alternation groups (a `{` with no
//! closing `}`) degrade to literal characters rather than erroring.

use regex::Regex;

/// A compiled wildcard pattern, ready to test candidates against.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `pattern` into a reusable matcher.
    pub fn compile(pattern: &str) -> Self {
        let body = translate(pattern.strip_prefix("./").unwrap_or(pattern));
        // The translator only emits valid regex syntax, so this cannot fail.
        let regex = Regex::new(&format!("(?i)^(?:{body})$")).unwrap();
        Matcher { regex }
    }

    /// Test `candidate` against the compiled pattern (full-string match).
    pub fn test(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// Translate a wildcard pattern into an (unanchored) regex body.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    if chars.get(i + 2) == Some(&'/') {
                        // Recursive glob before a separator: zero or more
                        // complete path segments.
                        out.push_str("(?:.*/)*");
                        i += 3;
                    } else {
                        out.push_str(".*");
                        i += 2;
                    }
                } else {
                    out.push_str(".*");
                    i += 1;
                }
            }
            '?' => {
                out.push('.');
                i += 1;
            }
            '{' => match group_end(&chars, i) {
                Some(end) => {
                    let group: String = chars[i + 1..end].iter().collect();
                    let options: Vec<String> =
                        group.split(',').map(|option| translate(option.trim())).collect();
                    out.push_str("(?:");
                    out.push_str(&options.join("|"));
                    out.push(')');
                    i = end + 1;
                }
                None => {
                    // Unbalanced group: the brace is a literal character.
                    out.push_str("\\{");
                    i += 1;
                }
            },
            c => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }

    out
}

/// Find the closing `}` for a group opened at `open`. Groups do not nest, so
/// the first `}` wins.
fn group_end(chars: &[char], open: usize) -> Option<usize> {
    chars[open + 1..].iter().position(|c| *c == '}').map(|pos| open + 1 + pos)
}

fn push_literal(out: &mut String, c: char) {
    if matches!(c, '.' | '+' | '^' | '$' | '(' | ')' | '|' | '[' | ']' | '\\' | '{' | '}') {
        out.push('\\');
    }
    out.push(c);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(pattern: &str, candidate: &str) -> bool {
        Matcher::compile(pattern).test(candidate)
    }

    #[test]
    fn literal_patterns_match_exactly() {
        // Array of (pattern, candidate, expected)
        let cases: Vec<(&str, &str, bool)> = vec![
            ("README.md", "README.md", true),
            ("README.md", "readme.MD", true),
            ("README.md", "README.mdx", false),
            ("README.md", "docs/README.md", false),
            ("", "", true),
            ("", "a", false),
        ];

        for (pattern, candidate, expected) in cases {
            assert_eq!(test(pattern, candidate), expected, "{pattern:?} vs {candidate:?}");
        }
    }

    #[test]
    fn regex_metacharacters_are_inert() {
        let cases: Vec<(&str, &str, bool)> = vec![
            ("a+b.ts", "a+b.ts", true),
            ("a+b.ts", "aab.ts", false),
            ("src/(new)/index.ts", "src/(new)/index.ts", true),
            ("v1.2|v1.3", "v1.2|v1.3", true),
            ("v1.2|v1.3", "v1.2", false),
            ("[id].tsx", "[id].tsx", true),
            ("[id].tsx", "i.tsx", false),
            ("a^b$c", "a^b$c", true),
            ("back\\slash", "back\\slash", true),
        ];

        for (pattern, candidate, expected) in cases {
            assert_eq!(test(pattern, candidate), expected, "{pattern:?} vs {candidate:?}");
        }
    }

    #[test]
    fn star_matches_any_run_including_separators() {
        assert!(test("src/*.ts", "src/index.ts"));
        assert!(test("src/*.ts", "src/deep/index.ts"));
        assert!(test("*.test.ts", "src/app.test.ts"));
        assert!(!test("src/*.ts", "lib/index.ts"));
        assert!(!test("src/*.ts", "src/index.tsx"));
        assert!(test("*", ""));
        assert!(test("*", "anything/at/all"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        assert!(test("file?.ts", "file1.ts"));
        assert!(test("file?.ts", "fileX.ts"));
        assert!(!test("file?.ts", "file.ts"));
        assert!(!test("file?.ts", "file12.ts"));
    }

    #[test]
    fn alternation_groups() {
        let cases: Vec<(&str, &str, bool)> = vec![
            ("*.{ts,tsx}", "component.tsx", true),
            ("*.{ts,tsx}", "component.ts", true),
            ("*.{ts,tsx}", "component.js", false),
            // Options are whitespace-trimmed.
            ("*.{ts, tsx}", "component.tsx", true),
            // Wildcards inside options still work.
            ("{src/*,test/*}.rs", "src/main.rs", true),
            ("{src/*,test/*}.rs", "bench/main.rs", false),
            ("{a}", "a", true),
            ("{a}", "b", false),
        ];

        for (pattern, candidate, expected) in cases {
            assert_eq!(test(pattern, candidate), expected, "{pattern:?} vs {candidate:?}");
        }
    }

    #[test]
    fn unbalanced_braces_are_literal() {
        assert!(test("fo{o", "fo{o"));
        assert!(!test("fo{o", "foo"));
        assert!(test("fo}o", "fo}o"));
        assert!(test("{a,b", "{a,b"));
        assert!(!test("{a,b", "a"));
    }

    #[test]
    fn recursive_glob_spans_directories() {
        let cases: Vec<(&str, &str, bool)> = vec![
            ("src/**/*", "src/app.test.ts", true),
            ("src/**/*", "src/a/b/app.ts", true),
            ("src/**/*", "lib/app.ts", false),
            ("**/*.csv", "data.csv", true),
            ("**/*.csv", "a/b/c/data.csv", true),
            ("**/*.csv", "data.json", false),
            // Bare ** (no trailing separator) is just "anything".
            ("src/**", "src/a/b/c.ts", true),
        ];

        for (pattern, candidate, expected) in cases {
            assert_eq!(test(pattern, candidate), expected, "{pattern:?} vs {candidate:?}");
        }
    }

    #[test]
    fn leading_dot_slash_is_current_directory() {
        assert!(test("./**/Makefile", "Makefile"));
        assert!(test("./**/Makefile", "a/b/Makefile"));
        assert!(test("./src/*.ts", "src/index.ts"));
        assert!(!test("./src/*.ts", "lib/index.ts"));
    }
}
