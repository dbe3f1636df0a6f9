//! Scenario manifests: whole maps as JSON data.
//!
//! A scenario names its rooms, passages, and the entry point. The shell
//! bundles one prison map via `include_str!` and can load others from
//! disk, so map authoring never touches engine code.

use std::fmt;

use serde::Deserialize;

use crate::graph::{MazeGraph, DEFAULT_CAPACITY};
use crate::room::{Room, RoomId};

/// A room as described in scenario JSON. Only name and description are
/// required; everything else defaults off.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub has_item: bool,
    #[serde(default)]
    pub requires_item: bool,
    #[serde(default)]
    pub is_exit: bool,
    #[serde(default)]
    pub trap: Option<TrapSpec>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrapSpec {
    pub challenge: String,
    pub solution: String,
}

/// A complete map: rooms, passages, and where the player wakes up.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub entry: RoomId,
    pub rooms: Vec<RoomSpec>,
    pub passages: Vec<[RoomId; 2]>,
}

/// Errors reading or assembling a scenario.
#[derive(Debug)]
pub enum ScenarioError {
    Parse(serde_json::Error),
    /// The manifest parsed but does not describe a playable map.
    Invalid(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Parse(err) => write!(f, "scenario does not parse: {}", err),
            ScenarioError::Invalid(reason) => write!(f, "invalid scenario: {}", reason),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl ScenarioSpec {
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(text).map_err(ScenarioError::Parse)
    }

    /// Assemble the maze and return it with the entry room.
    ///
    /// The graph's capacity is the room count or `DEFAULT_CAPACITY`,
    /// whichever is larger, leaving headroom for interactive edits after
    /// loading.
    pub fn build(&self) -> Result<(MazeGraph, RoomId), ScenarioError> {
        if self.rooms.is_empty() {
            return Err(ScenarioError::Invalid(format!(
                "scenario {:?} has no rooms",
                self.name
            )));
        }
        if self.entry >= self.rooms.len() {
            return Err(ScenarioError::Invalid(format!(
                "entry room {} does not exist ({} rooms)",
                self.entry,
                self.rooms.len()
            )));
        }

        let mut graph = MazeGraph::new(self.rooms.len().max(DEFAULT_CAPACITY));
        for spec in &self.rooms {
            let mut room = Room::new(spec.name.clone(), spec.description.clone());
            room.has_item = spec.has_item;
            room.requires_item = spec.requires_item;
            room.is_exit = spec.is_exit;
            if let Some(trap) = &spec.trap {
                room = room.with_trap(trap.challenge.clone(), trap.solution.clone());
            }
            room.hint = spec.hint.clone();
            graph
                .append(room)
                .map_err(|err| ScenarioError::Invalid(err.to_string()))?;
        }
        for &[u, v] in &self.passages {
            graph.connect(u, v).map_err(|err| {
                ScenarioError::Invalid(format!("passage {} {}: {}", u, v, err))
            })?;
        }
        Ok((graph, self.entry))
    }
}
