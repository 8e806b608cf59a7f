//! Series-name normalization and fuzzy matching.

use std::sync::OnceLock;

use regex::Regex;

static YEAR_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Common abbreviations mapped to their canonical series name
const ALIASES: &[(&str, &str)] = &[
    ("ff", "fantastic four"),
    ("asm", "amazing spider-man"),
    ("tasm", "amazing spider-man"),
    ("uxm", "uncanny x-men"),
    ("ssm", "spectacular spider-man"),
    ("mtio", "marvel two-in-one"),
    ("msm", "marvel super-man"),
    ("avx", "avengers vs. x-men"),
    ("avengers vs x-men", "avengers vs. x-men"),
];

fn year_suffix() -> &'static Regex {
    YEAR_SUFFIX.get_or_init(|| Regex::new(r"\s*\(\d{4}\)\s*").expect("year pattern compiles"))
}

/// Normalize a raw series name: lowercase, drop a parenthetical year,
/// resolve known abbreviations.
///
/// `"Uncanny X-Men (1963)"` becomes `"uncanny x-men"`, `"ASM"` becomes
/// `"amazing spider-man"`.
pub fn normalize_series(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = year_suffix().replace_all(&lowered, " ");
    let name = stripped.trim();

    ALIASES
        .iter()
        .find(|(abbr, _)| *abbr == name)
        .map(|(_, full)| (*full).to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Two normalized names match if equal or if either contains the other.
pub fn fuzzy_series_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(b) || b.contains(a)
}
