//! The seam between the ballot and a drag-and-drop backend.
//!
//! A backend (a browser binding, a terminal UI, a scripted replay) reports
//! what the voter does through [`DragSource`] and [`DropTarget`]. The ballot
//! pushes its state to a [`BallotView`] after every change and never reads
//! anything back from it.

use log::debug;

use crate::{Ballot, BallotErrors, DropPolicy, ItemRef, Move, MoveReport};

/// Told when the voter picks an item up.
pub trait DragSource {
    /// Returns which lists may receive the item for the rest of the drag.
    fn on_drag_start(&mut self, item: ItemRef) -> Result<DropPolicy, BallotErrors>;
}

/// Told when the voter drops an item, and after every reorder.
pub trait DropTarget {
    fn on_item_moved(&mut self, mv: Move) -> Result<MoveReport, BallotErrors>;

    /// Recomputes the answer field and returns it.
    fn on_reorder(&mut self) -> String;
}

/// Receives the model after each change.
pub trait BallotView {
    fn sync(&mut self, ballot: &Ballot);
}

impl BallotView for () {
    fn sync(&mut self, _ballot: &Ballot) {}
}

impl DragSource for Ballot {
    fn on_drag_start(&mut self, item: ItemRef) -> Result<DropPolicy, BallotErrors> {
        self.drag_start(item)
    }
}

impl DropTarget for Ballot {
    fn on_item_moved(&mut self, mv: Move) -> Result<MoveReport, BallotErrors> {
        self.apply_move(mv)
    }

    fn on_reorder(&mut self) -> String {
        self.refresh_answer().to_string()
    }
}

/// One complete drag as a backend reports it: pick up, drop, reorder.
///
/// A rejected drop leaves the tree as it was; the view still sees the lock
/// state set by the pick up.
pub fn perform_drag<V: BallotView + ?Sized>(
    ballot: &mut Ballot,
    mv: Move,
    view: &mut V,
) -> Result<MoveReport, BallotErrors> {
    ballot.on_drag_start(mv.item)?;
    view.sync(ballot);
    let report = match ballot.on_item_moved(mv) {
        Ok(report) => report,
        Err(e) => {
            debug!("perform_drag: drop refused: {}", e);
            view.sync(ballot);
            return Err(e);
        }
    };
    ballot.on_reorder();
    view.sync(ballot);
    Ok(report)
}

/// A drag that ended outside any list. Only the lock state changes.
pub fn cancel_drag<V: BallotView + ?Sized>(
    ballot: &mut Ballot,
    item: ItemRef,
    view: &mut V,
) -> Result<DropPolicy, BallotErrors> {
    let policy = ballot.on_drag_start(item)?;
    view.sync(ballot);
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::{BoothOptions, ListId};

    #[derive(Default)]
    struct RecordingView {
        answers: Vec<String>,
        locks: Vec<bool>,
    }

    impl BallotView for RecordingView {
        fn sync(&mut self, ballot: &Ballot) {
            self.answers.push(ballot.answer().to_string());
            self.locks.push(ballot.groups_accept_drops());
        }
    }

    fn party_x() -> Ballot {
        let d: Vec<String> = ["Alice", "Bob/PartyX/2", "Carol/PartyX/1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Builder::new(&BoothOptions::DEFAULT_OPTIONS)
            .unwrap()
            .descriptors(&d)
            .unwrap()
            .build()
    }

    #[test]
    fn view_sees_every_step() {
        let mut b = party_x();
        let mut view = RecordingView::default();
        let mv = Move {
            item: ItemRef::Candidate(0),
            to: ListId::Chosen,
            position: 0,
        };
        let report = perform_drag(&mut b, mv, &mut view).unwrap();
        assert_eq!(report.answer, "1");
        assert_eq!(view.answers, vec!["", "1"]);
        assert_eq!(view.locks, vec![true, true]);
    }

    #[test]
    fn rejected_drop_still_syncs_lock() {
        let mut b = party_x();
        let gid = b.group_id("PartyX").unwrap();
        let mut view = RecordingView::default();
        let mv = Move {
            item: ItemRef::Group(gid),
            to: ListId::Group(gid),
            position: 0,
        };
        assert!(perform_drag(&mut b, mv, &mut view).is_err());
        assert_eq!(view.locks, vec![false, false]);
        assert_eq!(b.answer(), "");
    }

    #[test]
    fn cancelled_drag_changes_nothing_else() {
        let mut b = party_x();
        let gid = b.group_id("PartyX").unwrap();
        let before_available = b.available().to_vec();
        let policy = cancel_drag(&mut b, ItemRef::Group(gid), &mut ()).unwrap();
        assert!(!policy.groups_accept_drops);
        assert_eq!(b.available(), before_available.as_slice());
        assert_eq!(b.answer(), "");
    }

    #[test]
    fn traits_drive_the_ballot() {
        let mut b = party_x();
        let target: &mut dyn DropTarget = &mut b;
        let report = target
            .on_item_moved(Move {
                item: ItemRef::Candidate(2),
                to: ListId::Chosen,
                position: 0,
            })
            .unwrap();
        assert_eq!(report.answer, "3");
        assert_eq!(target.on_reorder(), "3");
    }
}
