//! Layered sprite composition for characters and NPCs.
//!
//! Each layer names a part in the sprite asset table; renderers stack
//! base, outfit, hair and weapon in that order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseBody {
    #[default]
    Male,
    Female,
    Mutant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hair {
    Hair1,
    Hair2,
    Hair3,
    Hair4,
    Hair5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outfit {
    Jacket,
    Hoodie,
    Armor,
    Scavenger,
    Worker,
    MutantSkin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    Knife,
    Bat,
    Pistol,
    Rifle,
}

/// Sprite layers for one actor; `None` leaves the layer empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visuals {
    pub base: BaseBody,
    #[serde(default)]
    pub hair: Option<Hair>,
    #[serde(default)]
    pub outfit: Option<Outfit>,
    #[serde(default)]
    pub weapon: Option<Weapon>,
}

impl Visuals {
    pub fn new(base: BaseBody) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    pub fn with_hair(mut self, hair: Hair) -> Self {
        self.hair = Some(hair);
        self
    }

    pub fn with_outfit(mut self, outfit: Outfit) -> Self {
        self.outfit = Some(outfit);
        self
    }

    pub fn with_weapon(mut self, weapon: Option<Weapon>) -> Self {
        self.weapon = weapon;
        self
    }

    /// Asset-table keys in draw order, as `(layer, part)` pairs
    pub fn layers(&self) -> Vec<(&'static str, &'static str)> {
        let mut layers = vec![("base", self.base.asset_key())];
        if let Some(outfit) = self.outfit {
            layers.push(("outfit", outfit.asset_key()));
        }
        if let Some(hair) = self.hair {
            layers.push(("hair", hair.asset_key()));
        }
        if let Some(weapon) = self.weapon {
            layers.push(("weapon", weapon.asset_key()));
        }
        layers
    }
}

impl BaseBody {
    pub fn asset_key(&self) -> &'static str {
        match self {
            BaseBody::Male => "male",
            BaseBody::Female => "female",
            BaseBody::Mutant => "mutant",
        }
    }
}

impl Hair {
    pub const ALL: [Hair; 5] = [Hair::Hair1, Hair::Hair2, Hair::Hair3, Hair::Hair4, Hair::Hair5];

    pub fn asset_key(&self) -> &'static str {
        match self {
            Hair::Hair1 => "hair1",
            Hair::Hair2 => "hair2",
            Hair::Hair3 => "hair3",
            Hair::Hair4 => "hair4",
            Hair::Hair5 => "hair5",
        }
    }
}

impl Outfit {
    pub fn asset_key(&self) -> &'static str {
        match self {
            Outfit::Jacket => "jacket",
            Outfit::Hoodie => "hoodie",
            Outfit::Armor => "armor",
            Outfit::Scavenger => "scavenger",
            Outfit::Worker => "worker",
            Outfit::MutantSkin => "mutant_skin",
        }
    }
}

impl Weapon {
    pub fn asset_key(&self) -> &'static str {
        match self {
            Weapon::Knife => "knife",
            Weapon::Bat => "bat",
            Weapon::Pistol => "pistol",
            Weapon::Rifle => "rifle",
        }
    }
}
