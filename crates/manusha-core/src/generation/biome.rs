//! Biome spawn rules and the seeded roller that evaluates them.

use serde::{Deserialize, Serialize};

/// One line of a biome's initial-population recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Category tag matched against catalog entries
    pub category: String,
    /// Relative likelihood; scaled into a percent chance
    pub weight: u32,
    pub min_count: u32,
    pub max_count: u32,
}

impl SpawnRule {
    pub fn new(category: impl Into<String>, weight: u32, min_count: u32, max_count: u32) -> Self {
        Self {
            category: category.into(),
            weight,
            min_count,
            max_count,
        }
    }

    /// Percent chance this rule fires, capped at 90
    pub fn chance_percent(&self) -> u32 {
        (self.weight.saturating_mul(3).saturating_add(10)).min(90)
    }
}

/// A category and how many of it to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub category: String,
    pub count: u32,
}

/// Names of the built-in biomes
pub const BIOMES: [&str; 3] = ["urban_ruins", "wasteland", "forested_ruins"];

/// Spawn rules for a built-in biome; unknown biomes spawn nothing
pub fn biome_rules(biome: &str) -> Vec<SpawnRule> {
    match biome {
        "urban_ruins" => vec![
            SpawnRule::new("enemy_raider", 12, 1, 4),
            SpawnRule::new("vehicle_wreck", 6, 0, 2),
            SpawnRule::new("resource_scrap", 18, 1, 6),
            SpawnRule::new("npc_vendor", 2, 0, 1),
        ],
        "wasteland" => vec![
            SpawnRule::new("creature", 18, 1, 6),
            SpawnRule::new("resource_rock", 10, 1, 4),
            SpawnRule::new("resource_tree", 6, 0, 3),
        ],
        "forested_ruins" => vec![
            SpawnRule::new("resource_tree", 18, 2, 6),
            SpawnRule::new("creature", 10, 1, 3),
            SpawnRule::new("resource_herb", 8, 1, 4),
        ],
        _ => Vec::new(),
    }
}

/// Linear congruential generator used for reproducible spawn rolls
#[derive(Debug, Clone)]
pub struct SpawnRoller {
    seed: u64,
}

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MODULUS: u64 = 1 << 31;

impl SpawnRoller {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn next(&mut self) -> u64 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            % LCG_MODULUS;
        self.seed
    }

    /// Integer in `[low, high]`
    pub fn rand_int(&mut self, low: u32, high: u32) -> u32 {
        let span = u64::from(high.saturating_sub(low)) + 1;
        low + (self.next() % span) as u32
    }

    /// Roll every rule once, in order, returning the ones that fired with a nonzero count
    pub fn roll(&mut self, rules: &[SpawnRule]) -> Vec<SpawnRequest> {
        let mut out = Vec::new();
        for rule in rules {
            let roll = self.rand_int(1, 100);
            if roll <= rule.chance_percent() {
                let count = self.rand_int(rule.min_count, rule.max_count);
                if count > 0 {
                    out.push(SpawnRequest {
                        category: rule.category.clone(),
                        count,
                    });
                }
            }
        }
        out
    }
}
