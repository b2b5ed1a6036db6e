use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use stv_ballot::render::HtmlView;
use stv_ballot::*;

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_script;

use crate::booth::config_reader::*;
use crate::booth::io_script::*;

#[derive(Debug, Snafu)]
pub enum BoothError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No election file given"))]
    MissingElection {},

    #[snafu(display("Question {question}: {source}"))]
    Ballot {
        source: BallotErrors,
        question: usize,
    },
    #[snafu(display("Script step {step}: nothing called {reference:?} on the ballot"))]
    UnresolvedReference { step: usize, reference: String },
    #[snafu(display("Script step {step}: no question is shown"))]
    NoQuestionShown { step: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BoothResult<T> = Result<T, BoothError>;

/// The summary of every question the voter has seen, in question order.
fn build_summary_js(election: &ElectionConfig, booth: &Booth) -> BoothResult<JSValue> {
    let mut answers: Vec<JSValue> = Vec::new();
    for (q, question) in election.questions.iter().enumerate() {
        let ballot = match booth.ballot(q) {
            Some(b) => b,
            None => continue,
        };
        let ranking: Vec<String> = parse_answer(ballot.answer())
            .context(BallotSnafu { question: q })?
            .iter()
            .filter_map(|idx| ballot.candidate(*idx))
            .map(|c| c.name.clone())
            .collect();
        answers.push(json!({
            "question": q,
            "short_name": question.short_name,
            "answer": ballot.answer(),
            "ranking": ranking,
            "available": ballot.available_labels(),
            "chosen": ballot.chosen_labels(),
        }));
    }
    Ok(json!({
        "election": election.name,
        "answers": answers
    }))
}

fn write_output(out: Option<&str>, contents: &str) -> BoothResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            fs::write(path, contents).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_summary: &str) -> BoothResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        whatever!("Difference detected between replayed answers and reference summary")
    }
    Ok(())
}

pub fn run_session(args: &Args) -> BoothResult<()> {
    let election_path = args.election.clone().context(MissingElectionSnafu {})?;
    let election = read_election(&election_path)?;
    let options = election.booth_options(args.randomize, args.seed);
    info!(
        "Election {:?}: {} questions, options: {:?}",
        election.name,
        election.questions.len(),
        options
    );

    let script = match &args.script {
        Some(path) => read_script(path)?,
        None => Script::show_first(),
    };

    let mut booth = Booth::new(election.descriptors(), &options);
    let mut view = HtmlView::default();
    replay(&mut booth, &script, &mut view)?;

    let summary_js = build_summary_js(&election, &booth)?;
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    write_output(args.out.as_deref(), &pretty_js_summary)?;

    if let Some(path) = &args.html {
        fs::write(path, &view.fragment).context(WritingOutputSnafu { path })?;
        info!("Markup written to {:?}", path);
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_summary)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        format!("{}/tests/booth/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn args(reference: &str, out: &str) -> Args {
        Args {
            election: Some(fixture("board_election.json")),
            script: Some(fixture("board_script.json")),
            out: Some(std::env::temp_dir().join(out).display().to_string()),
            reference: Some(fixture(reference)),
            html: None,
            randomize: false,
            seed: None,
            verbose: false,
        }
    }

    #[test]
    fn board_session_matches_summary() {
        let election = read_election(&fixture("board_election.json")).unwrap();
        let script = read_script(&fixture("board_script.json")).unwrap();
        let mut booth = Booth::new(election.descriptors(), &election.booth_options(false, None));
        let mut view = HtmlView::default();
        replay(&mut booth, &script, &mut view).unwrap();

        let summary = build_summary_js(&election, &booth).unwrap();
        let expected = read_summary(&fixture("board_expected_summary.json")).unwrap();
        assert_eq!(summary, expected);
        assert!(view.fragment.contains("value=\"5,2,3\""));
    }

    #[test]
    fn run_session_with_reference() {
        let res = run_session(&args("board_expected_summary.json", "stvbooth_board_ok.json"));
        assert!(res.is_ok(), "{:?}", res.err());
    }

    #[test]
    fn run_session_detects_differences() {
        let res = run_session(&args("board_wrong_summary.json", "stvbooth_board_diff.json"));
        assert!(matches!(res, Err(BoothError::Whatever { .. })));
    }

    #[test]
    fn missing_election() {
        let mut a = args("board_expected_summary.json", "stvbooth_unused.json");
        a.election = None;
        assert!(matches!(
            run_session(&a),
            Err(BoothError::MissingElection {})
        ));
    }

    #[test]
    fn default_script_shows_first_question() {
        let election = read_election(&fixture("board_election.json")).unwrap();
        let mut booth = Booth::new(election.descriptors(), &election.booth_options(false, None));
        replay(&mut booth, &Script::show_first(), &mut ()).unwrap();
        let summary = build_summary_js(&election, &booth).unwrap();
        assert_eq!(summary["answers"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(summary["answers"][0]["answer"], json!(""));
        assert_eq!(
            summary["answers"][0]["available"],
            json!(["1 - Alice", "2 - Bob", "3 - Carol", "5 - Erin", "4 - Dave"])
        );
    }
}
