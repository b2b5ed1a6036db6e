// Names used by the scripts to designate items and lists on a ballot.

use stv_ballot::{Ballot, ItemRef, ListId};

const GROUP_PREFIX: &str = "gvt:";

/// `#<n>` is the candidate shown with index n, `gvt:<name>` a group block,
/// anything else a candidate name.
pub fn resolve_item(ballot: &Ballot, reference: &str) -> Option<ItemRef> {
    if let Some(name) = reference.strip_prefix(GROUP_PREFIX) {
        return ballot.group_id(name).map(ItemRef::Group);
    }
    if let Some(num) = reference.strip_prefix('#') {
        let shown: usize = num.trim().parse().ok()?;
        let index = shown.checked_sub(1)?;
        return ballot.candidate(index).map(|c| ItemRef::Candidate(c.index));
    }
    ballot.find_candidate(reference).map(ItemRef::Candidate)
}

pub fn resolve_list(ballot: &Ballot, reference: &str) -> Option<ListId> {
    match reference {
        "available" => Some(ListId::Available),
        "chosen" => Some(ListId::Chosen),
        _ => reference
            .strip_prefix(GROUP_PREFIX)
            .and_then(|name| ballot.group_id(name))
            .map(ListId::Group),
    }
}
