//! Canonical forms for free-text ingredient names.
//!
//! Two different normalizations live here. [`normalize`] produces the lookup
//! key used by the translation table, the matcher and the cache fingerprint.
//! [`display_name`] produces the human-facing name shown for recipe
//! ingredients and is also the first half of the merge key for missing
//! ingredients.

/// Known misspellings / irregular plurals and the display name they collapse to.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[("tomatoe", "Tomato"), ("tomatos", "Tomato")];

/// Lookup key for a term: surrounding whitespace trimmed, lowercased.
///
/// Internal whitespace is left alone, so `"red  onion"` stays two-spaced.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Display form of a recipe ingredient name.
pub fn display_name(name: &str) -> String {
    let lower = normalize(name);
    if let Some((_, canonical)) = IRREGULAR_PLURALS.iter().find(|(spelling, _)| *spelling == lower) {
        return (*canonical).to_string();
    }
    title_case(name)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() || ch == '-' {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
