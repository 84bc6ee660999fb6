//! Splits a recipe's ingredient list into what the pantry already covers and
//! what still has to be bought.
//!
//! Matching is done on `normalize(display_name(name))` against the owned
//! target terms: first exact membership, then substring containment in either
//! direction. Substring candidates are tried longest first, ties broken
//! lexicographically, so the reported match is the same on every run.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::api_connection::Ingredient;
use crate::missing_aggregator::MissingIngredientAggregator;
use crate::term_normalizer::{display_name, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    Exact,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedIngredient {
    /// The recipe ingredient with its display name.
    pub ingredient: Ingredient,
    /// The owned term that satisfied it.
    pub matched_term: String,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub owned: Vec<OwnedIngredient>,
    pub missing: Vec<Ingredient>,
}

pub fn classify(owned_target_terms: &BTreeSet<String>, recipe_ingredients: &[Ingredient]) -> ClassificationResult {
    let substring_order = substring_order(owned_target_terms);
    let mut owned = Vec::new();
    let mut missing = MissingIngredientAggregator::new();

    for ingredient in recipe_ingredients {
        let candidate = normalize(&display_name(&ingredient.name));
        match find_match(&candidate, owned_target_terms, &substring_order) {
            Some((matched_term, kind)) => owned.push(OwnedIngredient {
                ingredient: Ingredient {
                    name: display_name(&ingredient.name),
                    ..ingredient.clone()
                },
                matched_term: matched_term.to_string(),
                kind,
            }),
            None => missing.add_or_merge(ingredient.clone()),
        }
    }

    ClassificationResult {
        owned,
        missing: missing.into_vec(),
    }
}

fn substring_order(owned: &BTreeSet<String>) -> Vec<&str> {
    let mut terms: Vec<&str> = owned.iter().map(String::as_str).filter(|t| !t.is_empty()).collect();
    // BTreeSet iteration is already lexicographic; a stable sort keeps that as the tie-break.
    terms.sort_by(|a, b| b.len().cmp(&a.len()));
    terms
}

fn find_match<'a>(
    candidate: &str,
    owned: &'a BTreeSet<String>,
    substring_order: &[&'a str],
) -> Option<(&'a str, MatchKind)> {
    if let Some(exact) = owned.get(candidate) {
        return Some((exact.as_str(), MatchKind::Exact));
    }
    if candidate.is_empty() {
        return None;
    }
    substring_order
        .iter()
        .find(|term| candidate.contains(**term) || term.contains(candidate))
        .map(|term| (*term, MatchKind::Substring))
}
