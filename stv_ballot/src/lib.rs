/*!
Ballot entry for ranked-choice (STV) questions.

A question is described by an ordered list of candidate descriptors, either
`"name"` or `"name/gvtName/gvtOrder"`. Candidates sharing a group voting
ticket (GVT) are bundled into a single draggable block. The voter moves
candidates and blocks between the *available* pool and the *chosen* list; the
chosen order, as 1-based candidate indices joined by commas, is the answer.

The crate is organised as follows:
- [`builder`] parses descriptors and builds the tree of a question,
- [`Ballot`] holds the tree and applies drops, including the breakup of a
  group that received a foreign candidate,
- [`drag`] defines the traits a drag-and-drop backend drives,
- [`session`] keeps the trees of the questions the voter left,
- [`render`] produces the booth markup from the tree.

See the [`manual`] for the details of the formats.
*/
mod config;

pub mod builder;
pub mod drag;
pub mod manual;
pub mod quick_start;
pub mod render;
pub mod session;

use log::debug;

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::drag::{cancel_drag, perform_drag, BallotView, DragSource, DropTarget};
pub use crate::session::{Booth, SessionStore};

// **** Private structures ****

#[derive(PartialEq, Debug, Clone)]
struct CandidateItem {
    candidate: Candidate,
    // Shows "(gvt)" after the name. Set when the candidate leaves its block.
    show_group: bool,
}

// **** Tree ****

/// An entry of one of the two top-level lists.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Candidate(usize),
    Group(GroupNode),
}

/// A group container and the candidates currently inside it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupNode {
    pub id: GroupId,
    pub members: Vec<usize>,
}

/// The live tree of one question.
///
/// The tree is the only state: labels, the answer field and the markup are
/// all derived from it.
#[derive(PartialEq, Debug, Clone)]
pub struct Ballot {
    items: BTreeMap<usize, CandidateItem>,
    group_names: Vec<String>,
    available: Vec<Node>,
    chosen: Vec<Node>,
    groups_accept_drops: bool,
    answer: String,
}

impl Ballot {
    pub(crate) fn from_answers(answers: Vec<Answer>) -> Ballot {
        let mut items: BTreeMap<usize, CandidateItem> = BTreeMap::new();
        let mut group_names: Vec<String> = Vec::new();
        let mut available: Vec<Node> = Vec::new();
        for answer in answers {
            match answer {
                Answer::Candidate(candidate) => {
                    available.push(Node::Candidate(candidate.index));
                    items.insert(
                        candidate.index,
                        CandidateItem {
                            candidate,
                            show_group: false,
                        },
                    );
                }
                Answer::Gvt(gvt) => {
                    let id = GroupId(group_names.len() as u32);
                    group_names.push(gvt.name);
                    let members: Vec<usize> = gvt.candidates.iter().map(|c| c.index).collect();
                    for candidate in gvt.candidates {
                        items.insert(
                            candidate.index,
                            CandidateItem {
                                candidate,
                                show_group: false,
                            },
                        );
                    }
                    available.push(Node::Group(GroupNode { id, members }));
                }
            }
        }
        debug!(
            "from_answers: {} candidates, {} groups",
            items.len(),
            group_names.len()
        );
        Ballot {
            items,
            group_names,
            available,
            chosen: Vec::new(),
            groups_accept_drops: true,
            answer: String::new(),
        }
    }

    // ******** Read access *********

    pub fn available(&self) -> &[Node] {
        &self.available
    }

    pub fn chosen(&self) -> &[Node] {
        &self.chosen
    }

    /// The content of the answer field, as of the last reorder.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn groups_accept_drops(&self) -> bool {
        self.groups_accept_drops
    }

    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.items.get(&index).map(|item| &item.candidate)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.items.values().map(|item| &item.candidate)
    }

    /// The first candidate with this name.
    pub fn find_candidate(&self, name: &str) -> Option<usize> {
        self.candidates()
            .find(|c| c.name == name)
            .map(|c| c.index)
    }

    pub fn group_name(&self, id: GroupId) -> Option<&str> {
        self.group_names.get(id.0 as usize).map(|s| s.as_str())
    }

    /// The id of a group, whether or not its container still exists.
    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.group_names
            .iter()
            .position(|n| n == name)
            .map(|idx| GroupId(idx as u32))
    }

    /// The text currently displayed for a candidate.
    pub fn label(&self, index: usize) -> Option<String> {
        self.items.get(&index).map(|item| {
            if item.show_group {
                item.candidate.qualified_label()
            } else {
                item.candidate.plain_label()
            }
        })
    }

    pub fn available_labels(&self) -> Vec<String> {
        self.labels_of(&self.available)
    }

    pub fn chosen_labels(&self) -> Vec<String> {
        self.labels_of(&self.chosen)
    }

    /// The zero-based indices of the chosen candidates, in ballot order.
    pub fn chosen_ranking(&self) -> Vec<usize> {
        leaves(&self.chosen)
    }

    /// Recomputes the answer field from the chosen list.
    pub fn serialize_answer(&self) -> String {
        self.chosen_ranking()
            .iter()
            .map(|idx| (idx + 1).to_string())
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Where an item currently sits: its list and its position in that list.
    pub fn locate(&self, item: ItemRef) -> Option<(ListId, usize)> {
        match item {
            ItemRef::Group(id) => self.group_slot(id),
            ItemRef::Candidate(index) => {
                for (list_id, list) in [
                    (ListId::Available, &self.available),
                    (ListId::Chosen, &self.chosen),
                ] {
                    for (pos, node) in list.iter().enumerate() {
                        match node {
                            Node::Candidate(idx) if *idx == index => {
                                return Some((list_id, pos));
                            }
                            Node::Group(g) => {
                                if let Some(p) = g.members.iter().position(|idx| *idx == index) {
                                    return Some((ListId::Group(g.id), p));
                                }
                            }
                            Node::Candidate(_) => {}
                        }
                    }
                }
                None
            }
        }
    }

    // ******** Drag handling *********

    /// A drag started. Group containers cannot be dropped inside other groups,
    /// so the nested lists only accept drops while a candidate is carried.
    pub fn drag_start(&mut self, item: ItemRef) -> Result<DropPolicy, BallotErrors> {
        if self.locate(item).is_none() {
            return Err(BallotErrors::UnknownItem(item));
        }
        self.groups_accept_drops = matches!(item, ItemRef::Candidate(_));
        debug!(
            "drag_start: {:?}, groups accept drops: {}",
            item, self.groups_accept_drops
        );
        Ok(DropPolicy {
            groups_accept_drops: self.groups_accept_drops,
        })
    }

    /// Applies a drop and refreshes the answer field.
    ///
    /// Between two lists, the item is first inserted at its destination and
    /// then the source is cleaned up, in the order drag libraries report
    /// `add` and `remove`. A move inside one list only reorders it.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveReport, BallotErrors> {
        let (from, from_pos) = self
            .locate(mv.item)
            .ok_or(BallotErrors::UnknownItem(mv.item))?;
        let into_group = match (mv.to, mv.item) {
            (ListId::Group(gid), ItemRef::Candidate(index)) => {
                if self.group_slot(gid).is_none() {
                    return Err(BallotErrors::UnknownList(mv.to));
                }
                if !self.groups_accept_drops {
                    return Err(BallotErrors::DropRejected(mv.item, mv.to));
                }
                Some((gid, index))
            }
            (ListId::Group(gid), ItemRef::Group(_)) => {
                if self.group_slot(gid).is_none() {
                    return Err(BallotErrors::UnknownList(mv.to));
                }
                return Err(BallotErrors::DropRejected(mv.item, mv.to));
            }
            _ => None,
        };
        debug!(
            "apply_move: {:?} from {:?}@{} to {:?}@{}",
            mv.item, from, from_pos, mv.to, mv.position
        );

        let mut report = MoveReport {
            broke_up: None,
            emptied: None,
            answer: String::new(),
        };
        let node = self
            .take(from, from_pos)
            .ok_or(BallotErrors::UnknownItem(mv.item))?;
        match into_group {
            Some((gid, index)) if from == mv.to => self.insert_member(gid, mv.position, index),
            Some((gid, index)) => report.broke_up = self.added_to_group(gid, mv.position, index),
            None => self.insert_top_level(mv.to, mv.position, node),
        }
        if from != mv.to {
            if let (ListId::Group(gid), ItemRef::Candidate(index)) = (from, mv.item) {
                report.emptied = self.removed_from_group(gid, index);
            }
        }
        report.answer = self.refresh_answer().to_string();
        Ok(report)
    }

    /// Resets the answer field and fills it again from the chosen list.
    pub fn refresh_answer(&mut self) -> &str {
        self.answer.clear();
        self.answer = self.serialize_answer();
        &self.answer
    }

    // ******** Internals *********

    fn labels_of(&self, list: &[Node]) -> Vec<String> {
        leaves(list)
            .iter()
            .filter_map(|idx| self.label(*idx))
            .collect()
    }

    fn group_slot(&self, id: GroupId) -> Option<(ListId, usize)> {
        for (list_id, list) in [
            (ListId::Available, &self.available),
            (ListId::Chosen, &self.chosen),
        ] {
            let found = list
                .iter()
                .position(|node| matches!(node, Node::Group(g) if g.id == id));
            if let Some(pos) = found {
                return Some((list_id, pos));
            }
        }
        None
    }

    fn group_members_mut(&mut self, id: GroupId) -> Option<&mut Vec<usize>> {
        self.available
            .iter_mut()
            .chain(self.chosen.iter_mut())
            .find_map(|node| match node {
                Node::Group(g) if g.id == id => Some(&mut g.members),
                _ => None,
            })
    }

    // Only called with a top-level list.
    fn top_level_mut(&mut self, list: ListId) -> &mut Vec<Node> {
        match list {
            ListId::Chosen => &mut self.chosen,
            _ => &mut self.available,
        }
    }

    fn set_show_group(&mut self, index: usize, show: bool) {
        if let Some(item) = self.items.get_mut(&index) {
            item.show_group = show;
        }
    }

    // The position comes from locate(), so it is always in range.
    fn take(&mut self, list: ListId, pos: usize) -> Option<Node> {
        match list {
            ListId::Group(gid) => self
                .group_members_mut(gid)
                .map(|members| Node::Candidate(members.remove(pos))),
            top => Some(self.top_level_mut(top).remove(pos)),
        }
    }

    fn insert_top_level(&mut self, list: ListId, position: usize, node: Node) {
        let nodes = self.top_level_mut(list);
        let p = position.min(nodes.len());
        nodes.insert(p, node);
    }

    fn insert_member(&mut self, gid: GroupId, position: usize, index: usize) {
        if let Some(members) = self.group_members_mut(gid) {
            let p = position.min(members.len());
            members.insert(p, index);
        }
    }

    fn added_to_group(&mut self, gid: GroupId, position: usize, index: usize) -> Option<String> {
        let name = self.group_name(gid)?.to_string();
        self.insert_member(gid, position, index);
        let same_group = self
            .candidate(index)
            .and_then(|c| c.gvt.as_deref())
            .map_or(false, |gvt| gvt == name);
        if same_group {
            self.set_show_group(index, false);
            None
        } else {
            self.break_up(gid);
            Some(name)
        }
    }

    // Returns the name of the group if its container went away.
    fn removed_from_group(&mut self, gid: GroupId, index: usize) -> Option<String> {
        self.set_show_group(index, true);
        let now_empty = match self.group_members_mut(gid) {
            Some(members) => members.is_empty(),
            None => false,
        };
        if !now_empty {
            return None;
        }
        let (parent, pos) = self.group_slot(gid)?;
        self.top_level_mut(parent).remove(pos);
        debug!("removed_from_group: group {:?} is empty, container removed", gid);
        self.group_name(gid).map(|s| s.to_string())
    }

    /// Replaces a group container by its members, each showing its group.
    fn break_up(&mut self, gid: GroupId) {
        let (parent, pos) = match self.group_slot(gid) {
            Some(slot) => slot,
            None => return,
        };
        let members = match self.top_level_mut(parent).remove(pos) {
            Node::Group(g) => g.members,
            Node::Candidate(idx) => vec![idx],
        };
        debug!(
            "break_up: group {:?} in {:?}@{} releases {:?}",
            gid, parent, pos, members
        );
        for index in members.iter() {
            self.set_show_group(*index, true);
        }
        let nodes = self.top_level_mut(parent);
        for (offset, index) in members.into_iter().enumerate() {
            nodes.insert(pos + offset, Node::Candidate(index));
        }
    }
}

fn leaves(list: &[Node]) -> Vec<usize> {
    let mut res: Vec<usize> = Vec::new();
    for node in list {
        match node {
            Node::Candidate(idx) => res.push(*idx),
            Node::Group(g) => res.extend(g.members.iter().cloned()),
        }
    }
    res
}

/// Reads an answer field back into zero-based candidate indices.
pub fn parse_answer(answer: &str) -> Result<Vec<usize>, BallotErrors> {
    if answer.trim().is_empty() {
        return Ok(Vec::new());
    }
    answer
        .split(',')
        .map(|field| match field.trim().parse::<usize>() {
            Ok(x) if x >= 1 => Ok(x - 1),
            _ => Err(BallotErrors::MalformedAnswer(answer.to_string())),
        })
        .collect()
}
