//! Catalog - the read-only table of spawnable templates.
//!
//! Every placed entity points back at one `CatalogEntry` by id. The catalog
//! is loaded once (from JSON or the generated codex) and never mutated;
//! systems only look entries up and filter them.
//!
//! The AI role of an entry is derived from its category tag once, when the
//! entry is built or deserialized, so the tick never does string matching.
//! Recipes and loot tables are derived from the entries when the catalog is
//! built.

mod codex;
mod interaction;
mod loot;
mod recipes;
mod visuals;

pub use codex::*;
pub use interaction::*;
pub use loot::*;
pub use recipes::*;
pub use visuals::*;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::components::EntityKind;

/// Category substrings that mark an entry as hostile
const HOSTILE_MARKERS: [&str; 3] = ["enemy", "hostile", "creature"];

/// Category that marks an entry as a survivor the player controls
pub const PLAYER_CATEGORY: &str = "player";

/// Behavior role of an actor, derived from its category tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiRole {
    /// Hunts player-aligned actors within detection range
    Hostile,
    /// Survivors; explore at random
    PlayerAligned,
    /// No targeting behavior
    #[default]
    Neutral,
}

impl AiRole {
    /// Hostile markers take precedence over the player tag.
    pub fn classify(category: &str) -> Self {
        if HOSTILE_MARKERS.iter().any(|marker| category.contains(marker)) {
            AiRole::Hostile
        } else if category == PLAYER_CATEGORY {
            AiRole::PlayerAligned
        } else {
            AiRole::Neutral
        }
    }
}

/// Gameplay numbers and tags of an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Attribute payload; its shape depends on the entry kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum EntryAttributes {
    /// Characters and NPCs: stats plus a sprite composition
    Actor { stats: StatBlock, visuals: Visuals },
    /// Everything else: stats only
    Object { stats: StatBlock },
}

impl EntryAttributes {
    pub fn stats(&self) -> &StatBlock {
        match self {
            EntryAttributes::Actor { stats, .. } => stats,
            EntryAttributes::Object { stats } => stats,
        }
    }

    pub fn visuals(&self) -> Option<&Visuals> {
        match self {
            EntryAttributes::Actor { visuals, .. } => Some(visuals),
            EntryAttributes::Object { .. } => None,
        }
    }

    /// Does this payload shape fit the given kind?
    pub fn fits(&self, kind: EntityKind) -> bool {
        matches!(self, EntryAttributes::Actor { .. }) == kind.is_actor()
    }
}

/// A spawnable template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCatalogEntry")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: EntityKind,
    pub category: String,
    pub attributes: EntryAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
    #[serde(skip)]
    role: AiRole,
}

/// Wire form of an entry; the role is classified on conversion
#[derive(Deserialize)]
struct RawCatalogEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    kind: EntityKind,
    category: String,
    attributes: EntryAttributes,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

impl From<RawCatalogEntry> for CatalogEntry {
    fn from(raw: RawCatalogEntry) -> Self {
        CatalogEntry::new(raw.id, raw.name, raw.kind, raw.category, raw.attributes)
            .with_description(raw.description)
            .with_interactions(raw.interactions)
    }
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: EntityKind,
        category: impl Into<String>,
        attributes: EntryAttributes,
    ) -> Self {
        let category = category.into();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            role: AiRole::classify(&category),
            category,
            attributes,
            interactions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_interactions(mut self, interactions: Vec<Interaction>) -> Self {
        self.interactions = interactions;
        self
    }

    /// The interaction named `action`, if this entry offers it
    pub fn interaction(&self, action: &str) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.action == action)
    }

    pub fn role(&self) -> AiRole {
        self.role
    }

    pub fn hp(&self) -> Option<u32> {
        self.attributes.stats().hp
    }

    /// The tag appears inside the category or the id
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.category.contains(tag) || self.id.contains(tag)
    }
}

/// Errors raised while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),
    #[error("catalog entry `{id}` of kind {kind:?} has the wrong attribute shape")]
    AttributeShape { id: String, kind: EntityKind },
}

/// Immutable, id-indexed collection of catalog entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    recipes: Vec<Recipe>,
    loot: LootTables,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and mismatched attribute shapes
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if !entry.attributes.fits(entry.kind) {
                return Err(CatalogError::AttributeShape {
                    id: entry.id.clone(),
                    kind: entry.kind,
                });
            }
            if index.insert(entry.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }

        let recipes = generate_recipes(&entries);
        let loot = generate_loot_tables(&entries);
        log::debug!(
            "Catalog loaded with {} entries, {} recipes, {} loot tables",
            entries.len(),
            recipes.len(),
            loot.len()
        );
        Ok(Self {
            entries,
            index,
            recipes,
            loot,
        })
    }

    /// Parse a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&idx| &self.entries[idx])
    }

    /// Role of the entry with this id, if it exists
    pub fn role_of(&self, id: &str) -> Option<AiRole> {
        self.get(id).map(CatalogEntry::role)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Entries whose category equals `category`
    pub fn in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Entries whose category or id contains `tag`
    pub fn matching(&self, tag: &str) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.matches_tag(tag)).collect()
    }

    /// One recipe per blueprint, in catalog order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// The recipe that produces `output_id`
    pub fn recipe_for(&self, output_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.output.id == output_id)
    }

    pub fn loot_tables(&self) -> &LootTables {
        &self.loot
    }

    pub fn loot_table(&self, source: &str) -> Option<&[LootEntry]> {
        self.loot.get(source).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(id: &str, kind: EntityKind, category: &str) -> CatalogEntry {
        let stats = StatBlock::new();
        CatalogEntry::new(id, id, kind, category, EntryAttributes::Object { stats })
    }

    #[test]
    fn test_role_classification() {
        assert_eq!(AiRole::classify("enemy_raider"), AiRole::Hostile);
        assert_eq!(AiRole::classify("creature"), AiRole::Hostile);
        assert_eq!(AiRole::classify("hostile_drone"), AiRole::Hostile);
        assert_eq!(AiRole::classify("player"), AiRole::PlayerAligned);
        // Only an exact match is player-aligned
        assert_eq!(AiRole::classify("player_ghost"), AiRole::Neutral);
        assert_eq!(AiRole::classify("npc_vendor"), AiRole::Neutral);
        assert_eq!(AiRole::classify("resource_tree"), AiRole::Neutral);
    }

    #[test]
    fn test_role_derived_on_construction() {
        let entry = object("tree_001", EntityKind::Environment, "resource_tree");
        assert_eq!(entry.role(), AiRole::Neutral);

        let catalog = Catalog::new(vec![CatalogEntry::new(
            "raider_001",
            "Raider 1",
            EntityKind::Character,
            "enemy_raider",
            EntryAttributes::Actor {
                stats: StatBlock::new().with_hp(70),
                visuals: Visuals::default(),
            },
        )])
        .unwrap();
        assert_eq!(catalog.role_of("raider_001"), Some(AiRole::Hostile));
        assert_eq!(catalog.role_of("missing"), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![
            object("rock_001", EntityKind::Environment, "resource_rock"),
            object("rock_001", EntityKind::Environment, "resource_rock"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "rock_001"));
    }

    #[test]
    fn test_attribute_shape_checked() {
        let result = Catalog::new(vec![object("char_001", EntityKind::Character, "player")]);
        assert!(matches!(result, Err(CatalogError::AttributeShape { .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "id": "char_survivor_001",
                "name": "Survivor 1",
                "kind": "character",
                "category": "player",
                "attributes": {
                    "shape": "actor",
                    "stats": { "hp": 80, "values": { "speed": 1.6 } },
                    "visuals": {
                        "base": "female",
                        "hair": "hair2",
                        "outfit": "hoodie",
                        "weapon": "bat"
                    }
                },
                "interactions": [{ "action": "talk" }, { "action": "trade" }]
            },
            {
                "id": "env_rock_002",
                "name": "Stone 2",
                "kind": "environment",
                "category": "resource_rock",
                "attributes": {
                    "shape": "object",
                    "stats": { "hp": 60, "tags": { "resource": "stone" } }
                }
            }
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let survivor = catalog.get("char_survivor_001").unwrap();
        assert_eq!(survivor.role(), AiRole::PlayerAligned);
        assert_eq!(survivor.hp(), Some(80));
        assert_eq!(survivor.attributes.stats().value("speed"), Some(1.6));
        assert_eq!(survivor.attributes.visuals().unwrap().weapon, Some(Weapon::Bat));
        assert!(survivor.interaction("trade").is_some());
        assert!(survivor.interaction("chop").is_none());

        let rock = catalog.get("env_rock_002").unwrap();
        assert_eq!(rock.attributes.stats().tag("resource"), Some("stone"));
        assert!(rock.attributes.visuals().is_none());
        assert!(rock.interactions.is_empty());
    }

    #[test]
    fn test_standalone_entry_deserializes_with_role() {
        let raider = Catalog::codex().get("char_raider_041").cloned().unwrap();
        let json = serde_json::to_string(&raider).unwrap();
        assert!(!json.contains("role"));

        let reloaded: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.role(), AiRole::Hostile);
        assert_eq!(reloaded.id, raider.id);
        assert_eq!(reloaded.interactions, raider.interactions);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(Catalog::from_json("{ not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_matching_by_tag() {
        let catalog = Catalog::new(vec![
            object("env_tree_001", EntityKind::Environment, "resource_tree"),
            object("env_rock_002", EntityKind::Environment, "resource_rock"),
            object("struct_workbench_003", EntityKind::Structure, "crafting"),
        ])
        .unwrap();

        assert_eq!(catalog.matching("resource_tree").len(), 1);
        assert_eq!(catalog.matching("resource").len(), 2);
        assert_eq!(catalog.matching("rock").len(), 1);
        // Falls back to id containment
        assert_eq!(catalog.matching("workbench").len(), 1);
        assert_eq!(catalog.in_category("crafting").count(), 1);
        assert_eq!(catalog.of_kind(EntityKind::Environment).count(), 2);
    }
}
