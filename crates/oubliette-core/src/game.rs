//! The exploration game played over the maze graph.
//!
//! `Adventure` is a pure state machine over a `MazeGraph`. The shell feeds
//! it decisions (a destination, a trap answer, abandonment) and narrates
//! the `TurnEvent`s it gets back; the machine itself never touches I/O.
//!
//! Entering a room always runs the same gauntlet, in order: an armed trap
//! demands an answer before anything else (one wrong answer ends the run),
//! then any hint is found, any key is pocketed, and an exit room ends the
//! run in victory. Rejected moves consume nothing; the run stays exactly
//! as it was.

use crate::answer;
use crate::graph::{GraphError, MazeGraph};
use crate::room::RoomId;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Reached an exit room.
    Escaped,
    /// Failed a trap challenge.
    Perished,
    /// Walked away mid-run.
    Abandoned,
}

/// Why a move was rejected. The run's state is untouched either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveBlock {
    /// No passage from the current room to the chosen one, or the run is
    /// not at a movement prompt at all.
    NotAdjacent(RoomId),
    /// The destination is locked and the key is not in hand.
    Locked(RoomId),
}

/// One neighbor offered at the "where to?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOption {
    pub room: RoomId,
    /// The destination needs the key, whether or not the player holds it.
    pub locked: bool,
}

/// Things that happened during an entry or an answer, in the order they
/// should be narrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Entered(RoomId),
    /// An armed trap wants an answer before the room yields anything else.
    TrapChallenge { room: RoomId, challenge: String },
    /// Correct answer; the trap is disarmed for good.
    TrapDisarmed,
    /// Wrong answer; the run is over.
    TrapSprung,
    HintFound(String),
    KeyCollected,
    /// This room is the way out; the run is won.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for a destination choice.
    Roaming,
    /// Waiting for a trap answer.
    TrapPending,
    Over(Outcome),
}

/// One run of the exploration game.
#[derive(Debug)]
pub struct Adventure {
    location: RoomId,
    carrying_key: bool,
    phase: Phase,
}

impl Adventure {
    /// Start a run in `entry`. The entry room's own gauntlet runs
    /// immediately, so a trap there fires before the first move.
    pub fn begin(
        graph: &mut MazeGraph,
        entry: RoomId,
    ) -> Result<(Adventure, Vec<TurnEvent>), GraphError> {
        graph.room(entry)?;
        let mut run = Adventure {
            location: entry,
            carrying_key: false,
            phase: Phase::Roaming,
        };
        let mut events = Vec::new();
        run.arrive(graph, &mut events);
        Ok((run, events))
    }

    pub fn location(&self) -> RoomId {
        self.location
    }

    pub fn carrying_key(&self) -> bool {
        self.carrying_key
    }

    /// Terminal outcome, once the run is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// True while a trap waits on `answer_trap`.
    pub fn awaiting_trap(&self) -> bool {
        self.phase == Phase::TrapPending
    }

    /// Neighbors of the current room in ascending id order, with their
    /// lock status, for the movement prompt.
    pub fn exits(&self, graph: &MazeGraph) -> Vec<ExitOption> {
        graph
            .neighbors(self.location)
            .into_iter()
            .map(|room| ExitOption {
                room,
                locked: graph.rooms()[room].requires_item,
            })
            .collect()
    }

    /// Walk away. Ends the run without a result; a finished run keeps its
    /// original outcome.
    pub fn abandon(&mut self) {
        if self.outcome().is_none() {
            self.phase = Phase::Over(Outcome::Abandoned);
        }
    }

    /// Try to move to `dest`. Only a roaming player can move; rejections
    /// leave the run exactly as it was.
    pub fn travel(
        &mut self,
        graph: &mut MazeGraph,
        dest: RoomId,
    ) -> Result<Vec<TurnEvent>, MoveBlock> {
        if self.phase != Phase::Roaming {
            return Err(MoveBlock::NotAdjacent(dest));
        }
        if !graph.has_passage(self.location, dest) {
            return Err(MoveBlock::NotAdjacent(dest));
        }
        if graph.rooms()[dest].requires_item && !self.carrying_key {
            return Err(MoveBlock::Locked(dest));
        }
        self.location = dest;
        let mut events = Vec::new();
        self.arrive(graph, &mut events);
        Ok(events)
    }

    /// Answer the pending trap. A correct answer disarms it for the rest
    /// of the game and the interrupted entry continues; anything else ends
    /// the run on the spot.
    pub fn answer_trap(&mut self, graph: &mut MazeGraph, given: &str) -> Vec<TurnEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::TrapPending {
            return events;
        }
        let trap = match graph.room_mut(self.location) {
            Ok(room) => match room.trap.as_mut() {
                Some(trap) => trap,
                None => return events,
            },
            Err(_) => return events,
        };
        if answer::matches(&trap.solution, given) {
            trap.solved = true;
            self.phase = Phase::Roaming;
            events.push(TurnEvent::TrapDisarmed);
            self.settle(graph, &mut events);
        } else {
            self.phase = Phase::Over(Outcome::Perished);
            events.push(TurnEvent::TrapSprung);
        }
        events
    }

    /// Entry gauntlet: the trap gate first, then the rest of the room.
    fn arrive(&mut self, graph: &mut MazeGraph, events: &mut Vec<TurnEvent>) {
        events.push(TurnEvent::Entered(self.location));
        let room = &graph.rooms()[self.location];
        if room.trap_armed() {
            let challenge = room
                .trap
                .as_ref()
                .map(|t| t.challenge.clone())
                .unwrap_or_default();
            self.phase = Phase::TrapPending;
            events.push(TurnEvent::TrapChallenge {
                room: self.location,
                challenge,
            });
            return;
        }
        self.settle(graph, events);
    }

    /// Post-trap half of an entry: hint, key, exit check, in that order.
    fn settle(&mut self, graph: &mut MazeGraph, events: &mut Vec<TurnEvent>) {
        let room = match graph.room_mut(self.location) {
            Ok(room) => room,
            Err(_) => return,
        };
        if let Some(hint) = &room.hint {
            events.push(TurnEvent::HintFound(hint.clone()));
        }
        if room.has_item {
            room.has_item = false;
            self.carrying_key = true;
            events.push(TurnEvent::KeyCollected);
        }
        if room.is_exit {
            self.phase = Phase::Over(Outcome::Escaped);
            events.push(TurnEvent::Escaped);
        }
    }
}
