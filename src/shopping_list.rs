use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api_connection::Ingredient;
use crate::pantry::Pantry;
use crate::store::{JsonFile, OverrideStore, StoreError};
use crate::term_normalizer::{display_name, normalize};
use crate::translation::TranslationTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub bought: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingAdd {
    Added(String),
    /// A bought entry with this name was put back on the list.
    Reactivated(String),
    AlreadyActive(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Name a missing recipe ingredient is listed under: its source-vocabulary
    /// term when one is known, the display name otherwise.
    pub fn shopping_name<S: OverrideStore>(ingredient: &Ingredient, table: &TranslationTable<S>) -> String {
        let english = display_name(&ingredient.name);
        table.reverse_lookup(&english).unwrap_or(english)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.find(name).is_some_and(|item| !item.bought)
    }

    pub fn add_missing<S: OverrideStore>(&mut self, ingredient: &Ingredient, table: &TranslationTable<S>) -> ShoppingAdd {
        let name = Self::shopping_name(ingredient, table);
        let key = normalize(&name);
        match self.items.iter_mut().find(|item| normalize(&item.name) == key) {
            Some(item) if item.bought => {
                item.bought = false;
                ShoppingAdd::Reactivated(item.name.clone())
            }
            Some(item) => ShoppingAdd::AlreadyActive(item.name.clone()),
            None => {
                self.items.push(ShoppingItem {
                    name: name.clone(),
                    bought: false,
                });
                ShoppingAdd::Added(name)
            }
        }
    }

    /// Flips the bought flag. An item that becomes bought is added to the
    /// pantry unless the pantry already has it. Returns the new flag.
    pub fn toggle<S: OverrideStore>(
        &mut self,
        name: &str,
        pantry: &mut Pantry,
        table: &TranslationTable<S>,
    ) -> Option<bool> {
        let key = normalize(name);
        let item = self.items.iter_mut().find(|item| normalize(&item.name) == key)?;
        item.bought = !item.bought;
        if item.bought && !pantry.contains(&item.name) {
            info!(item = %item.name, "bought item moved to pantry");
            pantry.add(&item.name, table);
        }
        Some(item.bought)
    }

    pub fn remove(&mut self, name: &str) -> Option<ShoppingItem> {
        let key = normalize(name);
        let position = self.items.iter().position(|item| normalize(&item.name) == key)?;
        Some(self.items.remove(position))
    }

    pub fn clear_bought(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.bought);
        before - self.items.len()
    }

    fn find(&self, name: &str) -> Option<&ShoppingItem> {
        let key = normalize(name);
        self.items.iter().find(|item| normalize(&item.name) == key)
    }
}

/// Writes both documents touched by [`ShoppingList::toggle`], list first.
///
/// If the pantry write fails the list already records the purchase, and
/// toggling the item twice adds it to the pantry again.
pub fn save_toggle(
    list_file: &JsonFile<ShoppingList>,
    list: &ShoppingList,
    pantry_file: &JsonFile<Pantry>,
    pantry: &Pantry,
) -> Result<(), StoreError> {
    list_file.save(list)?;
    pantry_file.save(pantry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOverrideStore;
    use tempfile::tempdir;

    fn table() -> TranslationTable<MemoryOverrideStore> {
        TranslationTable::new(MemoryOverrideStore::new())
    }

    #[test]
    fn test_missing_ingredient_listed_under_source_term() {
        let table = table();
        let mut list = ShoppingList::new();
        let outcome = list.add_missing(&Ingredient::new(1, "onion", 1.0, "pcs"), &table);
        assert_eq!(outcome, ShoppingAdd::Added("בצל".to_string()));

        let outcome = list.add_missing(&Ingredient::new(2, "saffron", 1.0, "pinch"), &table);
        assert_eq!(outcome, ShoppingAdd::Added("Saffron".to_string()));
        assert!(list.is_active("saffron"));
    }

    #[test]
    fn test_bought_item_is_reactivated_not_duplicated() {
        let table = table();
        let mut list = ShoppingList::new();
        let mut pantry = Pantry::new();
        let garlic = Ingredient::new(1, "garlic", 2.0, "cloves");

        list.add_missing(&garlic, &table);
        assert_eq!(list.add_missing(&garlic, &table), ShoppingAdd::AlreadyActive("שום".to_string()));

        list.toggle("שום", &mut pantry, &table);
        assert_eq!(list.add_missing(&garlic, &table), ShoppingAdd::Reactivated("שום".to_string()));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_toggle_bought_adds_to_pantry_once() {
        let table = table();
        let mut list = ShoppingList::new();
        let mut pantry = Pantry::new();
        list.add_missing(&Ingredient::new(1, "lemon", 1.0, ""), &table);

        assert_eq!(list.toggle("לימון", &mut pantry, &table), Some(true));
        assert_eq!(list.toggle("לימון", &mut pantry, &table), Some(false));
        assert_eq!(list.toggle("לימון", &mut pantry, &table), Some(true));
        assert_eq!(pantry.items().len(), 1);
        assert_eq!(pantry.items()[0].target_term, "lemon");
        assert_eq!(list.toggle("nothing", &mut pantry, &table), None);
    }

    #[test]
    fn test_remove_and_clear_bought() {
        let table = table();
        let mut list = ShoppingList::new();
        let mut pantry = Pantry::new();
        list.add_missing(&Ingredient::new(1, "milk", 1.0, "l"), &table);
        list.add_missing(&Ingredient::new(2, "honey", 1.0, "jar"), &table);
        list.add_missing(&Ingredient::new(3, "saffron", 1.0, "pinch"), &table);

        list.toggle("חלב", &mut pantry, &table);
        assert_eq!(list.clear_bought(), 1);
        assert!(list.remove("דבש").is_some());
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "Saffron");
    }

    #[test]
    fn test_save_toggle_keeps_list_when_pantry_write_fails() {
        let dir = tempdir().unwrap();
        let list_file = JsonFile::new(dir.path().join("shopping_list.json"));
        let pantry_file = JsonFile::new(dir.path().join("pantry.json"));
        std::fs::create_dir(dir.path().join("pantry.json.tmp")).unwrap();

        let table = table();
        let mut list = ShoppingList::new();
        let mut pantry = Pantry::new();
        list.add_missing(&Ingredient::new(1, "garlic", 1.0, ""), &table);
        list.toggle("שום", &mut pantry, &table);

        assert!(save_toggle(&list_file, &list, &pantry_file, &pantry).is_err());
        let saved: ShoppingList = list_file.load().unwrap();
        assert_eq!(saved, list);
        assert!(saved.items()[0].bought);
        let saved_pantry: Pantry = pantry_file.load().unwrap();
        assert!(saved_pantry.is_empty());
    }
}
