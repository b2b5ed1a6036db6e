// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A candidate, as parsed from one descriptor of the election definition.
///
/// Descriptors are either `"name"` or `"name/gvtName/gvtOrder"`.
#[derive(PartialEq, Debug, Clone)]
pub struct Candidate {
    pub name: String,
    /// Zero-based position in the answer list of the question. Never changes.
    pub index: usize,
    /// The group voting ticket this candidate was declared in, if any.
    pub gvt: Option<String>,
    /// The declared order inside the group. Absent when the descriptor has no
    /// group or when the value could not be read as a number.
    pub gvt_order: Option<f64>,
}

impl Candidate {
    /// The index shown to voters and written to the answer field (1-based).
    pub fn display_index(&self) -> usize {
        self.index + 1
    }

    /// `"<index> - <name>"`
    pub fn plain_label(&self) -> String {
        format!("{} - {}", self.display_index(), self.name)
    }

    /// `"<index> - <name> (<gvt>)"`, or the plain label for ungrouped candidates.
    pub fn qualified_label(&self) -> String {
        match &self.gvt {
            Some(gvt) => format!("{} - {} ({})", self.display_index(), self.name, gvt),
            None => self.plain_label(),
        }
    }
}

/// A group voting ticket: candidates presented as a single draggable block.
#[derive(PartialEq, Debug, Clone)]
pub struct Gvt {
    pub name: String,
    /// Members, most preferred first.
    pub candidates: Vec<Candidate>,
}

/// A top-level entry of the available list, before rendering.
#[derive(PartialEq, Debug, Clone)]
pub enum Answer {
    Candidate(Candidate),
    Gvt(Gvt),
}

// ********* Tree addressing **********

/// Identifier of a group container inside one ballot.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct GroupId(pub u32);

/// One of the sortable lists of the widget.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ListId {
    /// The pool of candidates not ranked yet.
    Available,
    /// The ranked list. Its order is the ballot.
    Chosen,
    /// The nested list of a group container.
    Group(GroupId),
}

/// Something the voter can pick up.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ItemRef {
    /// A candidate, by its zero-based index.
    Candidate(usize),
    /// A whole group container.
    Group(GroupId),
}

/// A drop reported by the drag backend.
///
/// `position` is the insertion point in `to`, counted after the item has been
/// taken out of its current list. Positions past the end append.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Move {
    pub item: ItemRef,
    pub to: ListId,
    pub position: usize,
}

// ******** Output data structures *********

/// Which lists may receive drops while the current drag lasts.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DropPolicy {
    pub groups_accept_drops: bool,
}

/// What a successful drop did to the tree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MoveReport {
    /// The group dissolved because a foreign item was dropped into it.
    pub broke_up: Option<String>,
    /// The group container removed because its last member left.
    pub emptied: Option<String>,
    /// The answer field after the drop.
    pub answer: String,
}

/// Errors raised by the ballot. The tree is left untouched when one is returned.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotErrors {
    UnknownItem(ItemRef),
    UnknownList(ListId),
    UnknownQuestion(usize),
    /// The destination does not accept this item (a group inside a group,
    /// or any drop into a locked group).
    DropRejected(ItemRef, ListId),
    MalformedAnswer(String),
}

impl Error for BallotErrors {}

impl Display for BallotErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotErrors::UnknownItem(item) => write!(f, "no such item on the ballot: {:?}", item),
            BallotErrors::UnknownList(list) => write!(f, "no such list on the ballot: {:?}", list),
            BallotErrors::UnknownQuestion(q) => write!(f, "no such question: {}", q),
            BallotErrors::DropRejected(item, list) => {
                write!(f, "{:?} cannot be dropped into {:?}", item, list)
            }
            BallotErrors::MalformedAnswer(s) => write!(f, "malformed answer field: {:?}", s),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct BoothOptions {
    /// Shuffle the top-level entries of the available list.
    pub randomize_answer_order: bool,
    /// Fixes the shuffle. Each question derives its own permutation from it.
    /// The thread random generator is used when absent.
    pub random_seed: Option<u64>,
}

impl BoothOptions {
    pub const DEFAULT_OPTIONS: BoothOptions = BoothOptions {
        randomize_answer_order: false,
        random_seed: None,
    };
}

impl Default for BoothOptions {
    fn default() -> Self {
        BoothOptions::DEFAULT_OPTIONS
    }
}
