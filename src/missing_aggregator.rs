use crate::api_connection::Ingredient;
use crate::term_normalizer::display_name;

/// Accumulates missing ingredients, merging entries that share a display
/// name and unit (both compared case-insensitively).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingIngredientAggregator {
    items: Vec<Ingredient>,
}

impl MissingIngredientAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_or_merge(&mut self, candidate: Ingredient) {
        let key = merge_key(&candidate.name, &candidate.unit);
        match self
            .items
            .iter_mut()
            .find(|existing| merge_key(&existing.name, &existing.unit) == key)
        {
            Some(existing) => existing.amount += candidate.amount,
            None => self.items.push(Ingredient {
                name: display_name(&candidate.name),
                ..candidate
            }),
        }
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Ingredient> {
        self.items
    }
}

/// Adds `candidate` to `existing`, summing into the first entry with the same
/// merge key or appending it (display-named) at the end.
pub fn add_or_merge(existing: Vec<Ingredient>, candidate: Ingredient) -> Vec<Ingredient> {
    let mut aggregator = MissingIngredientAggregator { items: existing };
    aggregator.add_or_merge(candidate);
    aggregator.into_vec()
}

fn merge_key(name: &str, unit: &str) -> (String, String) {
    (display_name(name).to_lowercase(), unit.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_spellings_merge_and_sum() {
        let mut aggregator = MissingIngredientAggregator::new();
        aggregator.add_or_merge(Ingredient::new(11529, "Tomato", 1.0, "pcs"));
        aggregator.add_or_merge(Ingredient::new(99999, "tomatoe", 1.0, "pcs"));

        assert_eq!(aggregator.items(), &[Ingredient::new(11529, "Tomato", 2.0, "pcs")]);
    }

    #[test]
    fn test_unit_is_part_of_the_key() {
        let merged = add_or_merge(vec![Ingredient::new(1, "Flour", 200.0, "g")], Ingredient::new(1, "flour", 1.0, "cup"));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].name, "Flour");
        assert_eq!(merged[1].unit, "cup");
    }

    #[test]
    fn test_unit_comparison_ignores_case_and_keeps_first_unit() {
        let merged = add_or_merge(vec![Ingredient::new(1, "Milk", 1.0, "Cup")], Ingredient::new(2, "milk", 0.5, "cup"));
        assert_eq!(merged, vec![Ingredient::new(1, "Milk", 1.5, "Cup")]);
    }

    #[test]
    fn test_appends_in_first_seen_order() {
        let mut aggregator = MissingIngredientAggregator::new();
        aggregator.add_or_merge(Ingredient::new(1, "garlic", 2.0, "cloves"));
        aggregator.add_or_merge(Ingredient::new(2, "basil", 1.0, "bunch"));
        aggregator.add_or_merge(Ingredient::new(3, "Garlic", 1.0, "cloves"));

        let names: Vec<_> = aggregator.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Garlic", "Basil"]);
        assert_eq!(aggregator.items()[0].amount, 3.0);
    }

    #[test]
    fn test_merges_into_first_match_when_keys_collide() {
        let existing = vec![
            Ingredient::new(1, "Salt", 1.0, "tsp"),
            Ingredient::new(2, "Salt", 1.0, "tsp"),
        ];
        let merged = add_or_merge(existing, Ingredient::new(3, "salt", 1.0, "tsp"));
        assert_eq!(merged[0].amount, 2.0);
        assert_eq!(merged[1].amount, 1.0);
    }
}
