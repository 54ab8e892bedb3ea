/// Archetype Linter: validates an archetype tables file.
///
/// Usage: archetype_linter <tables.ron> [--standalone]
///
/// By default the file is checked as an override merged over the built-in
/// tables; `--standalone` checks it as a complete table set.

use chronicle_stats::core::archetype::ArchetypeTables;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: archetype_linter <tables.ron> [--standalone]");
        process::exit(0);
    }

    let path = Path::new(&args[1]);
    let standalone = args[2..].iter().any(|a| a == "--standalone");

    let file_tables = match ArchetypeTables::load_from_ron(path) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("ERROR: Failed to load tables file: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} ability clusters, {} virtue biases, {} bonus strategies",
        file_tables.ability_clusters.len(),
        file_tables.virtue_biases.len(),
        file_tables.bonus_strategies.len()
    );

    let effective = if standalone {
        file_tables.clone()
    } else {
        let mut base = ArchetypeTables::default();
        base.merge(file_tables.clone());
        base
    };

    let errors = effective.validate();
    let warnings = lint_tables(&effective);

    println!("\n=== Archetype Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_tables(tables: &ArchetypeTables) -> Vec<String> {
    let mut warnings = Vec::new();

    let clusters: Vec<(&str, &[String])> = tables
        .ability_clusters
        .iter()
        .map(|c| (c.name.as_str(), c.keywords.as_slice()))
        .collect();
    lint_section("ability cluster", &clusters, &mut warnings);

    let biases: Vec<(&str, &[String])> = tables
        .virtue_biases
        .iter()
        .map(|b| (b.name.as_str(), b.keywords.as_slice()))
        .collect();
    lint_section("virtue bias", &biases, &mut warnings);

    let strategies: Vec<(&str, &[String])> = tables
        .bonus_strategies
        .iter()
        .map(|s| (s.name.as_str(), s.keywords.as_slice()))
        .collect();
    lint_section("bonus strategy", &strategies, &mut warnings);

    warnings
}

/// Within one section entries are tried in order, so a keyword that
/// contains an earlier entry's keyword can never select its own entry.
fn lint_section(section: &str, entries: &[(&str, &[String])], warnings: &mut Vec<String>) {
    let mut owners: FxHashMap<&str, &str> = FxHashMap::default();

    for (index, (name, keywords)) in entries.iter().enumerate() {
        for keyword in keywords.iter() {
            if let Some(owner) = owners.get(keyword.as_str()) {
                if owner != name {
                    warnings.push(format!(
                        "{} '{}': keyword '{}' already belongs to '{}'",
                        section, name, keyword, owner
                    ));
                }
                continue;
            }
            owners.insert(keyword.as_str(), name);

            for (earlier_name, earlier_keywords) in &entries[..index] {
                if let Some(shadow) = earlier_keywords
                    .iter()
                    .find(|k| k.as_str() != keyword && keyword.contains(k.as_str()))
                {
                    warnings.push(format!(
                        "{} '{}': keyword '{}' is shadowed by '{}' in earlier entry '{}'",
                        section, name, keyword, shadow, earlier_name
                    ));
                }
            }
        }
    }
}
