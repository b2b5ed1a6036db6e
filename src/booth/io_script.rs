// Replays the actions of a voter on a booth.

use crate::booth::io_common::*;
use crate::booth::*;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use stv_ballot::{cancel_drag, perform_drag, BallotErrors, BallotView, Booth, Move};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Shows a question, saving the one currently shown.
    Show { question: usize },
    /// Drags an item and drops it in a list. Without a position, the item
    /// goes to the end of the list.
    Drag {
        item: String,
        to: String,
        position: Option<usize>,
    },
    /// Picks up an item and releases it outside any list.
    Cancel { item: String },
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Shows the first question and does nothing else.
    pub fn show_first() -> Script {
        Script {
            steps: vec![ScriptStep::Show { question: 0 }],
        }
    }
}

pub fn read_script(path: &str) -> BoothResult<Script> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let script: Script = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("read_script: {} steps from {:?}", script.steps.len(), path);
    Ok(script)
}

/// Runs every step of the script. Refused drops are logged and skipped, as a
/// voter would see the item go back to where it was. Any other problem stops
/// the replay.
pub fn replay<V: BallotView + ?Sized>(
    booth: &mut Booth,
    script: &Script,
    view: &mut V,
) -> BoothResult<()> {
    for (step, action) in script.steps.iter().enumerate() {
        debug!("replay: step {}: {:?}", step, action);
        match action {
            ScriptStep::Show { question } => {
                let ballot = booth
                    .show_question(*question)
                    .context(BallotSnafu {
                        question: *question,
                    })?;
                view.sync(ballot);
            }
            ScriptStep::Drag { item, to, position } => {
                let question = current_question(booth, step)?;
                let ballot = booth
                    .current_mut()
                    .context(NoQuestionShownSnafu { step })?;
                let item_ref = resolve_item(ballot, item).context(UnresolvedReferenceSnafu {
                    step,
                    reference: item.clone(),
                })?;
                let list = resolve_list(ballot, to).context(UnresolvedReferenceSnafu {
                    step,
                    reference: to.clone(),
                })?;
                let mv = Move {
                    item: item_ref,
                    to: list,
                    position: position.unwrap_or(usize::MAX),
                };
                match perform_drag(ballot, mv, view) {
                    Ok(report) => {
                        if let Some(name) = &report.broke_up {
                            info!("replay: step {}: group {} broken up", step, name);
                        }
                        if let Some(name) = &report.emptied {
                            info!("replay: step {}: group {} emptied", step, name);
                        }
                        debug!("replay: step {}: answer {:?}", step, report.answer);
                    }
                    Err(e @ BallotErrors::DropRejected(_, _)) => {
                        warn!("replay: step {}: {}", step, e);
                    }
                    Err(e) => {
                        return Err(e).context(BallotSnafu { question });
                    }
                }
            }
            ScriptStep::Cancel { item } => {
                let question = current_question(booth, step)?;
                let ballot = booth
                    .current_mut()
                    .context(NoQuestionShownSnafu { step })?;
                let item_ref = resolve_item(ballot, item).context(UnresolvedReferenceSnafu {
                    step,
                    reference: item.clone(),
                })?;
                let policy =
                    cancel_drag(ballot, item_ref, view).context(BallotSnafu { question })?;
                debug!("replay: step {}: {:?}", step, policy);
            }
        }
    }
    Ok(())
}

fn current_question(booth: &Booth, step: usize) -> BoothResult<usize> {
    booth
        .current()
        .map(|(q, _)| q)
        .context(NoQuestionShownSnafu { step })
}
