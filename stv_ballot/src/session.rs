//! Question navigation and the trees the voter left behind.

use log::{debug, info};

use std::collections::HashMap;

use crate::builder::Builder;
use crate::{Ballot, BallotErrors, BoothOptions};

/// The trees of the questions the voter navigated away from, keyed by
/// question index. Lives for one voting session.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct SessionStore {
    trees: HashMap<usize, Ballot>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::default()
    }

    pub fn stash(&mut self, question: usize, ballot: Ballot) {
        debug!("stash: question {} answer {:?}", question, ballot.answer());
        self.trees.insert(question, ballot);
    }

    /// Hands the tree back and forgets it.
    pub fn restore(&mut self, question: usize) -> Option<Ballot> {
        self.trees.remove(&question)
    }

    pub fn peek(&self, question: usize) -> Option<&Ballot> {
        self.trees.get(&question)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

/// The ballot widget of a whole election: one tree per question, one shown
/// at a time.
pub struct Booth {
    questions: Vec<Vec<String>>,
    options: BoothOptions,
    store: SessionStore,
    current: Option<(usize, Ballot)>,
}

impl Booth {
    /// `questions` holds the candidate descriptors of every question.
    pub fn new(questions: Vec<Vec<String>>, options: &BoothOptions) -> Booth {
        Booth::with_store(questions, options, SessionStore::new())
    }

    /// Resumes a session with trees saved earlier.
    pub fn with_store(
        questions: Vec<Vec<String>>,
        options: &BoothOptions,
        store: SessionStore,
    ) -> Booth {
        Booth {
            questions,
            options: *options,
            store,
            current: None,
        }
    }

    pub fn num_questions(&self) -> usize {
        self.questions.len()
    }

    /// Shows a question. The tree currently shown is stashed first; the
    /// question's own tree is restored if the voter saw it before, and built
    /// from the descriptors otherwise.
    pub fn show_question(&mut self, question: usize) -> Result<&mut Ballot, BallotErrors> {
        let descriptors = self
            .questions
            .get(question)
            .ok_or(BallotErrors::UnknownQuestion(question))?;
        let already_shown = matches!(&self.current, Some((q, _)) if *q == question);
        if !already_shown {
            let ballot = match self.store.restore(question) {
                Some(ballot) => {
                    info!(
                        "show_question: restoring question {} with answer {:?}",
                        question,
                        ballot.answer()
                    );
                    ballot
                }
                None => {
                    info!("show_question: building question {}", question);
                    Builder::new(&self.options)?
                        .question(question)
                        .descriptors(descriptors)?
                        .build()
                }
            };
            self.leave();
            self.current = Some((question, ballot));
        }
        match self.current.as_mut() {
            Some((_, ballot)) => Ok(ballot),
            None => Err(BallotErrors::UnknownQuestion(question)),
        }
    }

    /// Stashes the tree currently shown, if any.
    pub fn leave(&mut self) {
        if let Some((question, ballot)) = self.current.take() {
            self.store.stash(question, ballot);
        }
    }

    pub fn current(&self) -> Option<(usize, &Ballot)> {
        self.current.as_ref().map(|(q, b)| (*q, b))
    }

    pub fn current_mut(&mut self) -> Option<&mut Ballot> {
        self.current.as_mut().map(|(_, b)| b)
    }

    /// The tree of a question the voter has seen, shown or stashed.
    pub fn ballot(&self, question: usize) -> Option<&Ballot> {
        match &self.current {
            Some((q, ballot)) if *q == question => Some(ballot),
            _ => self.store.peek(question),
        }
    }

    /// The answer field of a question the voter has seen.
    pub fn answer(&self, question: usize) -> Option<String> {
        self.ballot(question).map(|b| b.answer().to_string())
    }

    /// Ends the session, keeping every tree.
    pub fn into_store(mut self) -> SessionStore {
        self.leave();
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemRef, ListId, Move};

    fn questions() -> Vec<Vec<String>> {
        vec![
            vec!["Alice", "Bob/PartyX/2", "Carol/PartyX/1"],
            vec!["Yes", "No"],
        ]
        .into_iter()
        .map(|q| q.into_iter().map(|s| s.to_string()).collect())
        .collect()
    }

    fn choose(ballot: &mut Ballot, index: usize, position: usize) {
        ballot.drag_start(ItemRef::Candidate(index)).unwrap();
        ballot
            .apply_move(Move {
                item: ItemRef::Candidate(index),
                to: ListId::Chosen,
                position,
            })
            .unwrap();
    }

    #[test]
    fn restore_reproduces_answer() {
        let mut booth = Booth::new(questions(), &BoothOptions::DEFAULT_OPTIONS);
        let b = booth.show_question(0).unwrap();
        choose(b, 2, 0);
        choose(b, 0, 1);
        assert_eq!(b.answer(), "3,1");
        let labels = b.chosen_labels();

        let b = booth.show_question(1).unwrap();
        assert_eq!(b.answer(), "");
        assert_eq!(booth.answer(0), Some("3,1".to_string()));

        let b = booth.show_question(0).unwrap();
        assert_eq!(b.answer(), "3,1");
        assert_eq!(b.serialize_answer(), "3,1");
        assert_eq!(b.chosen_labels(), labels);
    }

    #[test]
    fn showing_the_same_question_keeps_the_tree() {
        let mut booth = Booth::new(questions(), &BoothOptions::DEFAULT_OPTIONS);
        choose(booth.show_question(1).unwrap(), 1, 0);
        assert_eq!(booth.show_question(1).unwrap().answer(), "2");
    }

    #[test]
    fn unknown_question() {
        let mut booth = Booth::new(questions(), &BoothOptions::DEFAULT_OPTIONS);
        assert!(matches!(
            booth.show_question(5),
            Err(BallotErrors::UnknownQuestion(5))
        ));
        assert!(booth.current().is_none());
    }

    #[test]
    fn store_can_be_carried_over() {
        let mut booth = Booth::new(questions(), &BoothOptions::DEFAULT_OPTIONS);
        choose(booth.show_question(1).unwrap(), 0, 0);
        let store = booth.into_store();
        assert_eq!(store.len(), 1);

        let mut resumed = Booth::with_store(questions(), &BoothOptions::DEFAULT_OPTIONS, store);
        assert_eq!(resumed.answer(1), Some("1".to_string()));
        assert_eq!(resumed.show_question(1).unwrap().answer(), "1");
        assert_eq!(resumed.answer(0), None);
    }

    #[test]
    fn restore_is_read_once() {
        let mut store = SessionStore::new();
        let booth_ballot = Booth::new(questions(), &BoothOptions::DEFAULT_OPTIONS)
            .show_question(1)
            .unwrap()
            .clone();
        store.stash(1, booth_ballot);
        assert!(store.restore(1).is_some());
        assert!(store.restore(1).is_none());
        assert!(store.is_empty());
    }
}
