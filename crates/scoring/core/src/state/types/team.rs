use super::common::PlayerId;

/// A named group of players whose scores are summed.
///
/// Teams hold member ids only; players stay owned by their session, so a
/// team never carries a second copy of a player that could drift.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub members: Vec<PlayerId>,
}

impl Team {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, player: PlayerId) -> Self {
        self.add_member(player);
        self
    }

    /// Adds a member. Duplicates are ignored.
    pub fn add_member(&mut self, player: PlayerId) {
        if !self.members.contains(&player) {
            self.members.push(player);
        }
    }
}
