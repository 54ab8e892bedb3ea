/// Sheet Preview: generate character sheets from the command line.
///
/// Usage: sheet_preview [--nature <text>] [--concept <text>] [--profile <a/b/c>]
///                      [--generation <text>] [--clan <text>] [--seed <n>]
///                      [--tables <path>] [--count <n>] [--json]
///
/// With `--count n` (n > 1) prints per-category averages over n sheets
/// instead of a single sheet. Set RUST_LOG=debug to see allocation fallbacks.

use chronicle_stats::core::engine::StatEngine;
use chronicle_stats::schema::concept::ConceptDescriptor;
use chronicle_stats::schema::creature::Creature;
use chronicle_stats::schema::sheet::CharacterSheet;
use chronicle_stats::schema::traits::{AbilityCategory, AttributeCategory};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut concept = ConceptDescriptor::default();
    let mut seed: Option<u64> = None;
    let mut tables_path = None;
    let mut count: usize = 1;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--nature" if i + 1 < args.len() => {
                i += 1;
                concept.nature = args[i].clone();
            }
            "--concept" if i + 1 < args.len() => {
                i += 1;
                concept.concept = args[i].clone();
            }
            "--profile" if i + 1 < args.len() => {
                i += 1;
                concept.attribute_profile = Some(args[i].clone());
            }
            "--generation" if i + 1 < args.len() => {
                i += 1;
                concept.generation = args[i].clone();
            }
            "--clan" if i + 1 < args.len() => {
                i += 1;
                concept.clan = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().ok();
            }
            "--tables" if i + 1 < args.len() => {
                i += 1;
                tables_path = Some(args[i].clone());
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse::<usize>().unwrap_or(1).max(1);
            }
            "--json" => json = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = StatEngine::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if let Some(ref path) = tables_path {
        builder = builder.tables_path(path);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let sheets = engine.generate_many(&concept, count);

    if json {
        let output = if count == 1 {
            serde_json::to_string_pretty(&sheets[0])
        } else {
            serde_json::to_string_pretty(&sheets)
        };
        match output {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if count == 1 {
        print_sheet(&concept, &sheets[0]);
    } else {
        print_averages(&sheets);
    }
}

fn print_sheet(concept: &ConceptDescriptor, sheet: &CharacterSheet) {
    let creature = Creature::detect(concept.clan.as_deref().unwrap_or(""));

    println!("Nature:     {}", or_dash(&concept.nature));
    println!("Concept:    {}", or_dash(&concept.concept));
    println!("Creature:   {}", creature.name());
    println!();
    println!("{}", sheet);
    match (
        creature.blood_capacity(sheet.bloodpool),
        creature.starting_blood(sheet.bloodpool),
    ) {
        (Some(capacity), Some(starting)) => {
            println!("Blood capacity  {} ({})", capacity, creature.name());
            println!("Starting blood  {}", starting);
        }
        _ => println!("(mortal: blood pool not tracked)"),
    }
}

fn print_averages(sheets: &[CharacterSheet]) {
    let mean = |f: fn(&CharacterSheet) -> u32| mean_of(sheets, f);

    println!("Averages over {} sheets\n", sheets.len());
    println!("Attribute dots per category");
    for category in AttributeCategory::ALL {
        println!(
            "  {:<12}{:>6.2}",
            category.name(),
            mean_of(sheets, |s| s.attribute_total(category))
        );
    }
    println!("Ability dots per category");
    for category in AbilityCategory::ALL {
        println!(
            "  {:<12}{:>6.2}",
            category.name(),
            mean_of(sheets, |s| s.ability_total(category))
        );
    }
    println!("Virtues");
    println!("  {:<12}{:>6.2}", "conscience", mean(|s| s.virtues.conscience as u32));
    println!("  {:<12}{:>6.2}", "selfcontrol", mean(|s| s.virtues.selfcontrol as u32));
    println!("  {:<12}{:>6.2}", "courage", mean(|s| s.virtues.courage as u32));
    println!("{:<14}{:>6.2}", "Humanity", mean(|s| s.humanity as u32));
    println!("{:<14}{:>6.2}", "Willpower", mean(|s| s.willpower as u32));
    println!(
        "{:<14}{:>6.2}",
        "Backgrounds",
        mean(|s| s.backgrounds.values().map(|v| *v as u32).sum())
    );
}

fn mean_of<F: Fn(&CharacterSheet) -> u32>(sheets: &[CharacterSheet], f: F) -> f64 {
    sheets.iter().map(|s| f(s) as f64).sum::<f64>() / sheets.len() as f64
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

fn print_usage() {
    println!("Sheet Preview: generate V20 character sheets.");
    println!();
    println!("Usage: sheet_preview [options]");
    println!();
    println!("  --nature <text>      Nature archetype (e.g. Monstro, Caregiver)");
    println!("  --concept <text>     Concept or profession (e.g. \"soldado brutal\")");
    println!("  --profile <a/b/c>    Attribute priorities (e.g. Social/Physical/Mental)");
    println!("  --generation <text>  Generation text (e.g. \"Generation 9\")");
    println!("  --clan <text>        Clan, used to tell vampires, ghouls and mortals apart");
    println!("  --seed <n>           RNG seed for reproducible output");
    println!("  --tables <path>      Archetype tables RON file merged over the built-ins");
    println!("  --count <n>          Generate n sheets and print averages");
    println!("  --json               Print JSON instead of the text sheet");
}
