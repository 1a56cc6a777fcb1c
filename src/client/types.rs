//! Response records of the collaborator endpoints.

use serde::{Deserialize, Serialize};

/// Skills accepted by `GET /api/hiscore`, in hiscore row order.
pub const SKILLS: [&str; 29] = [
    "Overall",
    "Attack",
    "Defence",
    "Strength",
    "Constitution",
    "Ranged",
    "Prayer",
    "Magic",
    "Cooking",
    "Woodcutting",
    "Fletching",
    "Fishing",
    "Firemaking",
    "Crafting",
    "Smithing",
    "Mining",
    "Herblore",
    "Agility",
    "Thieving",
    "Slayer",
    "Farming",
    "Runecrafting",
    "Hunter",
    "Construction",
    "Summoning",
    "Dungeoneering",
    "Divination",
    "Invention",
    "Archaeology",
];

/// Canonical spelling of `skill`, matched case-insensitively.
pub fn canonical_skill(skill: &str) -> Option<&'static str> {
    let skill = skill.trim();
    SKILLS.iter().copied().find(|s| s.eq_ignore_ascii_case(skill))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hiscore {
    pub rank: i64,
    pub level: i64,
    pub xp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiExtract {
    #[serde(default)]
    pub extract: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeStatus {
    pub loaded: bool,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeDetail {
    pub unit: i64,
    #[serde(default)]
    pub price_str: Option<String>,
}

/// Outcome of a GE name lookup. `StillLoading` is expected while the
/// backend is populating its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    Ready(Vec<String>),
    StillLoading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub update_available: bool,
    pub latest: String,
    pub current: String,
}

/// Body of `POST /api/download/report.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub username: String,
    pub skill: String,
    pub steps: Vec<String>,
}
