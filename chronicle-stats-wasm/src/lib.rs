//! WASM bindings for chronicle-stats, called by the sheet editor front-end.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use chronicle_stats::core::archetype::ArchetypeTables;
use chronicle_stats::core::engine::StatEngine;
use chronicle_stats::schema::concept::ConceptDescriptor;
use chronicle_stats::schema::creature::Creature;
use chronicle_stats::schema::sheet::CharacterSheet;

// ---------------------------------------------------------------------------
// Embedded rules data, compiled into the WASM binary
// ---------------------------------------------------------------------------
const ARCHETYPES: &str = include_str!("../../rules_data/archetypes.ron");

// ---------------------------------------------------------------------------
// JSON shape returned across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct SheetOutput {
    creature: Creature,
    #[serde(rename = "bloodCapacity")]
    blood_capacity: Option<u8>,
    #[serde(rename = "startingBlood")]
    starting_blood: Option<u8>,
    #[serde(flatten)]
    sheet: CharacterSheet,
}

thread_local! {
    static ENGINE: Result<StatEngine, String> = build_engine();
}

fn build_engine() -> Result<StatEngine, String> {
    let tables = ArchetypeTables::parse_ron(ARCHETYPES)
        .map_err(|e| format!("Archetype tables error: {e}"))?;
    StatEngine::builder()
        .tables(tables)
        .build()
        .map_err(|e| format!("Engine build error: {e}"))
}

/// Run `f` against the engine built once from the embedded tables.
fn with_engine<T>(f: impl FnOnce(&StatEngine) -> T) -> Result<T, JsError> {
    ENGINE.with(|engine| match engine {
        Ok(engine) => Ok(f(engine)),
        Err(message) => Err(JsError::new(message)),
    })
}

fn parse_concept(input_json: &str) -> Result<ConceptDescriptor, JsError> {
    serde_json::from_str(input_json)
        .map_err(|e| JsError::new(&format!("Invalid concept JSON: {e}")))
}

fn sheet_output(concept: &ConceptDescriptor, sheet: CharacterSheet) -> SheetOutput {
    let creature = Creature::detect(concept.clan.as_deref().unwrap_or(""));
    SheetOutput {
        creature,
        blood_capacity: creature.blood_capacity(sheet.bloodpool),
        starting_blood: creature.starting_blood(sheet.bloodpool),
        sheet,
    }
}

fn render(concept: &ConceptDescriptor, sheet: CharacterSheet) -> Result<String, JsError> {
    serde_json::to_string(&sheet_output(concept, sheet))
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Generate a sheet for a concept described by a JSON string.
///
/// Expected JSON shape (every field optional):
/// ```json
/// {
///   "nature": "Monstro",
///   "concept": "soldado brutal",
///   "attributeProfile": "Physical/Social/Mental",
///   "generation": "Geração 9",
///   "clan": "Brujah"
/// }
/// ```
#[wasm_bindgen]
pub fn generate_stats(input_json: &str) -> Result<String, JsError> {
    let concept = parse_concept(input_json)?;
    let sheet = with_engine(|engine| engine.generate_stats(&concept))?;
    render(&concept, sheet)
}

/// Same as `generate_stats`, but reproducible for a given seed.
#[wasm_bindgen]
pub fn generate_stats_seeded(input_json: &str, seed: u64) -> Result<String, JsError> {
    let concept = parse_concept(input_json)?;
    let sheet = with_engine(|engine| engine.generate(&concept, &mut StdRng::seed_from_u64(seed)))?;
    render(&concept, sheet)
}

/// Classify a clan string: "vampire", "ghoul" or "mortal".
#[wasm_bindgen]
pub fn detect_creature(clan: &str) -> String {
    Creature::detect(clan).name().to_string()
}
