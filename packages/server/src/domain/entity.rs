//! Core domain models for the voting application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    error::RoomError,
    tally::RankedOption,
    value_object::{OptionName, ResultId, RoomCode, RoomId, Score, Timestamp, Username},
};

/// Scores one participant gave, keyed by option.
pub type ScoreSheet = BTreeMap<OptionName, Score>;

/// Lifecycle state of a room. `Open -> Closed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomState {
    Open,
    Closed,
}

/// Represents a voting room with participants, options and their scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Shareable join code
    pub code: RoomCode,
    /// Username of the creator; the only user allowed to close the room
    pub owner: Username,
    /// Options in insertion order
    pub options: Vec<OptionName>,
    /// Participants in join order
    pub participants: Vec<Participant>,
    /// Lifecycle state
    pub state: RoomState,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new open room. The owner is the sole initial participant
    /// and starts with an empty (all-zero) score sheet.
    pub fn new(id: RoomId, code: RoomCode, owner: Username, created_at: Timestamp) -> Self {
        Self {
            id,
            code,
            participants: vec![Participant::new(owner.clone())],
            owner,
            options: Vec::new(),
            state: RoomState::Open,
            created_at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == RoomState::Open
    }

    pub fn is_owner(&self, username: &Username) -> bool {
        &self.owner == username
    }

    pub fn has_participant(&self, username: &Username) -> bool {
        self.participant(username).is_some()
    }

    pub fn has_option(&self, option: &OptionName) -> bool {
        self.options.contains(option)
    }

    /// Get a participant by username
    pub fn participant(&self, username: &Username) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.username == username)
    }

    /// Usernames of every participant, in join order
    pub fn participant_usernames(&self) -> Vec<Username> {
        self.participants.iter().map(|p| p.username.clone()).collect()
    }

    /// Number of participants who have locked in
    pub fn locked_in_count(&self) -> usize {
        self.participants.iter().filter(|p| p.locked_in).count()
    }

    /// True once every participant has locked in their scores.
    pub fn all_locked_in(&self) -> bool {
        !self.participants.is_empty() && self.locked_in_count() == self.participants.len()
    }

    /// Add a participant to the room.
    ///
    /// Adding an existing participant is a successful no-op.
    ///
    /// # Returns
    ///
    /// `true` if the participant was newly added
    ///
    /// # Errors
    ///
    /// Returns `RoomError::RoomClosed` if the room is closed
    pub fn add_participant(&mut self, username: Username) -> Result<bool, RoomError> {
        self.ensure_open()?;
        if self.has_participant(&username) {
            return Ok(false);
        }
        self.participants.push(Participant::new(username));
        Ok(true)
    }

    /// Append an option to the room.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::RoomClosed` if the room is closed, or
    /// `RoomError::OptionAlreadyExists` if the option is already present
    pub fn add_option(&mut self, option: OptionName) -> Result<(), RoomError> {
        self.ensure_open()?;
        if self.has_option(&option) {
            return Err(RoomError::OptionAlreadyExists(option.into_string()));
        }
        self.options.push(option);
        Ok(())
    }

    /// Record a participant's final scores. The first lock-in wins.
    ///
    /// Scores for options the room does not have are dropped; options the
    /// participant did not score are recorded as zero.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::RoomClosed`, `RoomError::NotParticipant` or
    /// `RoomError::AlreadyLockedIn`
    pub fn lock_in(&mut self, username: &Username, scores: ScoreSheet) -> Result<(), RoomError> {
        self.ensure_open()?;
        let sheet: ScoreSheet = self
            .options
            .iter()
            .map(|option| (option.clone(), scores.get(option).copied().unwrap_or(Score::ZERO)))
            .collect();

        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.username == username)
            .ok_or_else(|| RoomError::NotParticipant(username.to_string()))?;
        if participant.locked_in {
            return Err(RoomError::AlreadyLockedIn(username.to_string()));
        }
        participant.scores = sheet;
        participant.locked_in = true;
        Ok(())
    }

    /// Transition the room to `Closed`.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::RoomClosed` if the room is already closed
    pub fn close(&mut self) -> Result<(), RoomError> {
        self.ensure_open()?;
        self.state = RoomState::Closed;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), RoomError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(RoomError::RoomClosed)
        }
    }
}

/// Represents a participant in a voting room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant identifier (unique within a room)
    pub username: Username,
    /// Whether the participant has submitted their final scores
    pub locked_in: bool,
    /// Scores given to options
    pub scores: ScoreSheet,
}

impl Participant {
    /// Create a participant who has not voted yet
    pub fn new(username: Username) -> Self {
        Self {
            username,
            locked_in: false,
            scores: ScoreSheet::new(),
        }
    }

    /// Score given to an option; options never scored count as zero
    pub fn score_for(&self, option: &OptionName) -> Score {
        self.scores.get(option).copied().unwrap_or(Score::ZERO)
    }
}

/// Persisted outcome of a closed room. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    /// Result identifier
    pub id: ResultId,
    /// Room the result was tallied from
    pub room_id: RoomId,
    /// Owner of the room at closing time
    pub owner: Username,
    /// Options ranked by aggregate score
    pub ranking: Vec<RankedOption>,
    /// Timestamp when the result was created
    pub created_at: Timestamp,
}

impl VoteResult {
    /// Ranked option names, best first
    pub fn sorted_options(&self) -> Vec<OptionName> {
        self.ranking.iter().map(|r| r.option.clone()).collect()
    }
}
