use anyhow::{anyhow, Context, Result};
use pantry_match::api_connection::{ApiConnectionError, Provider};
use pantry_match::cli::{parse_args, CacheAction, Command, OverridesAction, PantryAction, ShoppingAction};
use pantry_match::config::AppConfig;
use pantry_match::ingredient_matcher::MatchKind;
use pantry_match::pantry::{AddOutcome, OverrideOutcome, Pantry};
use pantry_match::recipe_service::{cache_key, RecipeService};
use pantry_match::shopping_list::{save_toggle, ShoppingAdd, ShoppingList};
use pantry_match::store::overrides::load_overrides_csv;
use pantry_match::store::{FileCacheStore, FileOverrideStore, JsonFile, RecipeCache};
use pantry_match::translation::TranslationTable;
use tracing_subscriber::EnvFilter;

type Table = TranslationTable<FileOverrideStore>;
type Service = RecipeService<Provider, FileCacheStore>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Turns a provider failure into a message the user can act on.
fn fetch_failure(err: ApiConnectionError) -> anyhow::Error {
    if err.is_configuration_missing() {
        anyhow!("{}. Set it in the environment or in a .env file.", err)
    } else {
        anyhow!("Recipe provider request failed: {}", err)
    }
}

fn recipe_service(config: &AppConfig) -> Result<Service> {
    let provider = Provider::spoonacular(&config.api_key_env_var).with_base_url(&config.base_url);
    let cache_store = FileCacheStore::open(config.recipe_cache_path())
        .with_context(|| format!("Failed to open recipe cache at {:?}", config.recipe_cache_path()))?;
    Ok(RecipeService::new(provider, RecipeCache::new(cache_store)).with_search_limit(config.search_limit))
}

fn load_pantry(config: &AppConfig) -> Result<(JsonFile<Pantry>, Pantry)> {
    let file = JsonFile::new(config.pantry_path());
    let pantry = file
        .load()
        .with_context(|| format!("Failed to read pantry from {:?}", file.path()))?;
    Ok((file, pantry))
}

fn load_shopping_list(config: &AppConfig) -> Result<(JsonFile<ShoppingList>, ShoppingList)> {
    let file = JsonFile::new(config.shopping_list_path());
    let list = file
        .load()
        .with_context(|| format!("Failed to read shopping list from {:?}", file.path()))?;
    Ok((file, list))
}

fn print_pantry(pantry: &Pantry) {
    if pantry.is_empty() {
        println!("The pantry is empty.");
        return;
    }
    for item in pantry.items() {
        let marker = if item.resolved { " " } else { "?" };
        println!("{} {} -> {}", marker, item.source_term, item.target_term);
    }
    let unresolved = pantry.unresolved().count();
    if unresolved > 0 {
        println!(
            "\n{} item(s) marked '?' have no translation. Use `pantry translate <term> <english>`.",
            unresolved
        );
    }
}

fn pantry_command(action: PantryAction, config: &AppConfig, table: &Table) -> Result<()> {
    let (file, mut pantry) = load_pantry(config)?;
    match action {
        PantryAction::Add { term } => match pantry.add(&term, table) {
            AddOutcome::Added(item) => {
                file.save(&pantry).context("Failed to save pantry")?;
                if item.resolved {
                    println!("Added {} ({})", item.source_term, item.target_term);
                } else {
                    println!(
                        "Added {} without a translation. Use `pantry translate` to set one.",
                        item.source_term
                    );
                }
            }
            AddOutcome::AlreadyPresent => println!("{} is already in the pantry.", term.trim()),
            AddOutcome::Empty => println!("Nothing to add."),
        },
        PantryAction::Remove { term } => match pantry.remove(&term) {
            Some(item) => {
                file.save(&pantry).context("Failed to save pantry")?;
                println!("Removed {}", item.source_term);
            }
            None => println!("{} is not in the pantry.", term.trim()),
        },
        PantryAction::List => print_pantry(&pantry),
        PantryAction::Translate { term, target } => {
            match pantry
                .apply_override(&term, &target, table)
                .context("Failed to store translation")?
            {
                OverrideOutcome::Applied(item) => {
                    file.save(&pantry).context("Failed to save pantry")?;
                    println!("{} now translates to {}", item.source_term, item.target_term);
                }
                OverrideOutcome::StoredOnly => println!("Translation stored for future pantry items."),
                OverrideOutcome::Rejected => println!("Nothing stored: both the term and its translation are required."),
            }
        }
    }
    Ok(())
}

fn overrides_command(action: OverridesAction, config: &AppConfig, table: &Table) -> Result<()> {
    match action {
        OverridesAction::List => {
            let overrides = table.overrides().context("Failed to read translation overrides")?;
            if overrides.is_empty() {
                println!("No manual translations.");
            }
            for (source, target) in overrides {
                println!("{} -> {}", source, target);
            }
        }
        OverridesAction::Import { csv_file } => {
            let pairs = load_overrides_csv(&csv_file)
                .with_context(|| format!("Failed to read overrides from {:?}", csv_file))?;
            let (file, mut pantry) = load_pantry(config)?;
            let (stored, changed) = pantry
                .import_overrides(&pairs, table)
                .context("Failed to store imported translations")?;
            if changed > 0 {
                file.save(&pantry).context("Failed to save pantry")?;
            }
            println!("Imported {} translation(s), {} pantry item(s) updated.", stored, changed);
        }
    }
    Ok(())
}

async fn search_command(config: &AppConfig, table: &Table) -> Result<()> {
    let (_, pantry) = load_pantry(config)?;
    let terms: Vec<String> = pantry.owned_target_terms(table).into_iter().collect();
    if terms.is_empty() {
        println!("The pantry is empty, add ingredients first.");
        return Ok(());
    }
    let service = recipe_service(config)?;
    let mut recipes = service.find_recipes(&terms).await.map_err(fetch_failure)?;
    recipes.sort_by(|a, b| a.title.cmp(&b.title));
    if recipes.is_empty() {
        println!("No recipes found for {}.", cache_key(&terms));
    }
    for recipe in recipes {
        println!("{:>8}  {}", recipe.id, recipe.title);
    }
    Ok(())
}

async fn recipe_command(id: i64, add_missing: bool, config: &AppConfig, table: &Table) -> Result<()> {
    let (_, pantry) = load_pantry(config)?;
    let owned = pantry.owned_target_terms(table);
    let service = recipe_service(config)?;
    let (info, classification) = service.check_recipe(id, &owned).await.map_err(fetch_failure)?;

    println!("{}", info.title);
    if let Some(minutes) = info.ready_in_minutes {
        println!("Ready in {} minutes", minutes);
    }
    if let Some(url) = &info.source_url {
        println!("Source: {}", url);
    }

    println!("\nYou have:");
    for owned in &classification.owned {
        let via = match owned.kind {
            MatchKind::Exact => String::new(),
            MatchKind::Substring => format!(" (via {})", owned.matched_term),
        };
        println!("  {}{}", owned.ingredient.description(), via);
    }

    let (list_file, mut list) = load_shopping_list(config)?;
    println!("\nMissing:");
    for missing in &classification.missing {
        let on_list = list.is_active(&ShoppingList::shopping_name(missing, table));
        println!("  {}{}", missing.description(), if on_list { " [on list]" } else { "" });
    }

    if let Some(instructions) = info.plain_instructions() {
        println!("\nInstructions:\n{}", instructions.trim());
    }

    if add_missing && !classification.missing.is_empty() {
        for missing in &classification.missing {
            match list.add_missing(missing, table) {
                ShoppingAdd::Added(name) => println!("Added {} to the shopping list", name),
                ShoppingAdd::Reactivated(name) => println!("{} is back on the shopping list", name),
                ShoppingAdd::AlreadyActive(_) => {}
            }
        }
        list_file.save(&list).context("Failed to save shopping list")?;
    }
    Ok(())
}

async fn random_command(number: Option<u32>, config: &AppConfig) -> Result<()> {
    let service = recipe_service(config)?;
    let recipes = service
        .random_recipes(number.unwrap_or(config.random_count))
        .await
        .map_err(fetch_failure)?;
    for recipe in recipes {
        let minutes = recipe
            .ready_in_minutes
            .map(|m| format!(" ({} min)", m))
            .unwrap_or_default();
        println!("{:>8}  {}{}", recipe.id, recipe.title, minutes);
    }
    Ok(())
}

fn shopping_command(action: ShoppingAction, config: &AppConfig, table: &Table) -> Result<()> {
    let (list_file, mut list) = load_shopping_list(config)?;
    match action {
        ShoppingAction::List => {
            if list.items().is_empty() {
                println!("The shopping list is empty.");
            }
            for item in list.items() {
                println!("[{}] {}", if item.bought { "x" } else { " " }, item.name);
            }
        }
        ShoppingAction::Toggle { name } => {
            let (pantry_file, mut pantry) = load_pantry(config)?;
            match list.toggle(&name, &mut pantry, table) {
                Some(bought) => {
                    save_toggle(&list_file, &list, &pantry_file, &pantry)
                        .context("Failed to save shopping list and pantry")?;
                    println!("{} marked as {}", name.trim(), if bought { "bought" } else { "not bought" });
                }
                None => println!("{} is not on the shopping list.", name.trim()),
            }
        }
        ShoppingAction::Remove { name } => match list.remove(&name) {
            Some(item) => {
                list_file.save(&list).context("Failed to save shopping list")?;
                println!("Removed {}", item.name);
            }
            None => println!("{} is not on the shopping list.", name.trim()),
        },
        ShoppingAction::ClearBought => {
            let removed = list.clear_bought();
            list_file.save(&list).context("Failed to save shopping list")?;
            println!("Removed {} bought item(s).", removed);
        }
    }
    Ok(())
}

fn cache_command(action: CacheAction, config: &AppConfig, table: &Table) -> Result<()> {
    let cache = RecipeCache::new(
        FileCacheStore::open(config.recipe_cache_path()).context("Failed to open recipe cache")?,
    );
    match action {
        CacheAction::Clear => {
            cache.clear().context("Failed to clear recipe cache")?;
            println!("Recipe cache cleared.");
        }
        CacheAction::Invalidate => {
            let (_, pantry) = load_pantry(config)?;
            let terms: Vec<String> = pantry.owned_target_terms(table).into_iter().collect();
            let key = cache_key(&terms);
            if cache.invalidate(&key).context("Failed to update recipe cache")? {
                println!("Forgot cached search for {}.", key);
            } else {
                println!("Nothing cached for {}.", key);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli_args = parse_args();
    let config = AppConfig::from_env()?;
    let overrides = FileOverrideStore::open(config.overrides_path())
        .with_context(|| format!("Failed to open translation overrides at {:?}", config.overrides_path()))?;
    let table = TranslationTable::new(overrides);

    match cli_args.command {
        Command::Pantry { action } => pantry_command(action, &config, &table),
        Command::Resolve { term } => {
            let resolution = table.resolve(&term);
            if resolution.succeeded {
                println!("{}", resolution.target_term);
            } else {
                println!("{} (no translation)", resolution.target_term);
            }
            Ok(())
        }
        Command::Overrides { action } => overrides_command(action, &config, &table),
        Command::Search => search_command(&config, &table).await,
        Command::Recipe { id, add_missing } => recipe_command(id, add_missing, &config, &table).await,
        Command::Random { number } => random_command(number, &config).await,
        Command::Shopping { action } => shopping_command(action, &config, &table),
        Command::Cache { action } => cache_command(action, &config, &table),
    }
}
