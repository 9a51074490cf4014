//! Forced-choice ("most like me" / "least like me") answer handling.

use serde::{Deserialize, Serialize};

/// Which half of an ipsative answer a pick lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpsativeSlot {
    Most,
    Least,
}

/// A most/least pair of option labels. Empty strings mean "not picked yet",
/// matching the wire shape (`{"most": "A", "least": ""}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostLeastPick {
    #[serde(default)]
    pub most: String,
    #[serde(default)]
    pub least: String,
}

impl MostLeastPick {
    pub fn new(most: impl Into<String>, least: impl Into<String>) -> Self {
        Self {
            most: most.into(),
            least: least.into(),
        }
    }

    /// Assign a label to one slot. If the same label currently occupies the
    /// other slot, that slot is cleared — an invariant-preserving edit, not
    /// a rejection: picking "A" as most while "A" was least empties least.
    pub fn assign(&mut self, slot: IpsativeSlot, label: impl Into<String>) {
        let label = label.into();
        match slot {
            IpsativeSlot::Most => {
                if self.least == label {
                    self.least.clear();
                }
                self.most = label;
            }
            IpsativeSlot::Least => {
                if self.most == label {
                    self.most.clear();
                }
                self.least = label;
            }
        }
    }

    /// Holds whenever both slots are set: the picks must differ.
    pub fn is_mutually_exclusive(&self) -> bool {
        self.most.is_empty() || self.least.is_empty() || self.most != self.least
    }

    pub fn is_complete(&self) -> bool {
        !self.most.is_empty() && !self.least.is_empty()
    }
}
