//! Placed entity components: EntityKind, ActionLabel, EntityInstance.

use serde::{Deserialize, Serialize};

use super::common::GridPos;

/// What sort of thing a catalog entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Npc,
    Structure,
    Environment,
    Item,
    Blueprint,
}

impl EntityKind {
    /// Items and blueprints live in inventories, never on the grid
    pub fn is_placeable(&self) -> bool {
        !matches!(self, EntityKind::Item | EntityKind::Blueprint)
    }

    /// Characters and NPCs take a turn every tick; everything else is static
    pub fn is_actor(&self) -> bool {
        matches!(self, EntityKind::Character | EntityKind::Npc)
    }
}

/// Current intent shown for an actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionLabel {
    #[default]
    Idle,
    Hunting,
    Wandering,
    Exploring,
}

impl ActionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::Idle => "Idle",
            ActionLabel::Hunting => "Hunting",
            ActionLabel::Wandering => "Wandering",
            ActionLabel::Exploring => "Exploring",
        }
    }
}

impl std::fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concrete occurrence of a catalog entry on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInstance {
    /// Catalog id plus a random suffix
    pub instance_id: String,
    /// Id of the catalog entry this was spawned from
    pub catalog_id: String,
    /// Kind copied from the catalog at spawn time
    pub kind: EntityKind,
    pub name: Option<String>,
    pub position: GridPos,
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub action: ActionLabel,
}

impl EntityInstance {
    pub fn new(
        instance_id: impl Into<String>,
        catalog_id: impl Into<String>,
        kind: EntityKind,
        position: GridPos,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            catalog_id: catalog_id.into(),
            kind,
            name: None,
            position,
            hp: None,
            max_hp: None,
            action: ActionLabel::Idle,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets both current and maximum hit points
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self.max_hp = Some(hp);
        self
    }

    pub fn is_actor(&self) -> bool {
        self.kind.is_actor()
    }
}
