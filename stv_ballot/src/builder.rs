use std::cmp::Ordering;

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub use crate::config::*;
use crate::Ballot;

/// A builder for the answer tree of one question.
///
/// ```
/// pub use stv_ballot::builder::Builder;
/// pub use stv_ballot::BoothOptions;
/// # use stv_ballot::BallotErrors;
///
/// let ballot = Builder::new(&BoothOptions::DEFAULT_OPTIONS)?
///     .descriptors(&["Alice".to_string(), "Bob/PartyX/2".to_string()])?
///     .build();
///
/// assert_eq!(ballot.answer(), "");
///
/// # Ok::<(), BallotErrors>(())
/// ```
pub struct Builder {
    pub(crate) _options: BoothOptions,
    pub(crate) _question: usize,
    pub(crate) _answers: Vec<Answer>,
}

impl Builder {
    pub fn new(options: &BoothOptions) -> Result<Builder, BallotErrors> {
        Ok(Builder {
            _options: *options,
            _question: 0,
            _answers: Vec::new(),
        })
    }

    /// The question this tree belongs to. Only used to derive the shuffle.
    pub fn question(self, question: usize) -> Builder {
        Builder {
            _question: question,
            ..self
        }
    }

    /// Sets the candidate descriptors, in the order of the election definition.
    pub fn descriptors(self, descriptors: &[String]) -> Result<Builder, BallotErrors> {
        Ok(Builder {
            _answers: assemble_answers(descriptors),
            ..self
        })
    }

    pub fn build(self) -> Ballot {
        let mut answers = self._answers;
        if self._options.randomize_answer_order {
            shuffle_answers(&mut answers, &self._options, self._question);
        }
        Ballot::from_answers(answers)
    }
}

/// Parses one descriptor. This never fails: a missing or unreadable group
/// order is simply recorded as absent.
pub fn parse_descriptor(index: usize, descriptor: &str) -> Candidate {
    let bits: Vec<&str> = descriptor.split('/').collect();
    if bits.len() >= 3 {
        Candidate {
            name: bits[0].to_string(),
            index,
            gvt: Some(bits[1].to_string()),
            gvt_order: bits[2].trim().parse::<f64>().ok().filter(|x| !x.is_nan()),
        }
    } else {
        Candidate {
            name: bits[0].to_string(),
            index,
            gvt: None,
            gvt_order: None,
        }
    }
}

/// Groups the candidates of a question into top-level answers.
///
/// Ungrouped candidates stay in descriptor order. A group takes the place of
/// its first-seen member and its members are sorted by descending order.
pub fn assemble_answers(descriptors: &[String]) -> Vec<Answer> {
    let mut answers: Vec<Answer> = Vec::new();
    for (idx, descriptor) in descriptors.iter().enumerate() {
        let candidate = parse_descriptor(idx, descriptor);
        debug!("assemble_answers: {:?} -> {:?}", descriptor, candidate);
        let gvt_name = match candidate.gvt.clone() {
            Some(name) => name,
            None => {
                answers.push(Answer::Candidate(candidate));
                continue;
            }
        };
        let existing = answers.iter_mut().find_map(|a| match a {
            Answer::Gvt(gvt) if gvt.name == gvt_name => Some(gvt),
            _ => None,
        });
        match existing {
            Some(gvt) => gvt.candidates.push(candidate),
            None => answers.push(Answer::Gvt(Gvt {
                name: gvt_name,
                candidates: vec![candidate],
            })),
        }
    }
    for answer in answers.iter_mut() {
        if let Answer::Gvt(gvt) = answer {
            sort_members(&mut gvt.candidates);
        }
    }
    answers
}

// Stable: equal orders keep descriptor order, unnumbered members go last.
fn sort_members(members: &mut [Candidate]) {
    members.sort_by(|a, b| match (a.gvt_order, b.gvt_order) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn shuffle_answers(answers: &mut [Answer], options: &BoothOptions, question: usize) {
    match options.random_seed {
        Some(seed) => {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(question as u64));
            answers.shuffle(&mut rng);
        }
        None => answers.shuffle(&mut rand::rng()),
    }
    debug!(
        "shuffle_answers: question {} shuffled {} entries",
        question,
        answers.len()
    );
}
