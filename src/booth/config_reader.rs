use crate::booth::*;

use log::{debug, warn};
use std::fs;
use stv_ballot::BoothOptions;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionMetadata {
    #[serde(default)]
    pub randomize_answer_order: bool,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub question: Option<String>,
    pub short_name: Option<String>,
    pub choice_type: Option<String>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// The candidate descriptors, "name" or "name/ticket/order".
    pub answers: Vec<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub questions: Vec<QuestionConfig>,
    pub metadata: Option<ElectionMetadata>,
}

impl ElectionConfig {
    /// The descriptors of every question, in question order.
    pub fn descriptors(&self) -> Vec<Vec<String>> {
        self.questions.iter().map(|q| q.answers.clone()).collect()
    }

    /// The options of the booth for this election. `force_randomize` comes from
    /// the command line and can only turn shuffling on.
    pub fn booth_options(&self, force_randomize: bool, seed: Option<u64>) -> BoothOptions {
        let from_metadata = self
            .metadata
            .as_ref()
            .map(|m| m.randomize_answer_order)
            .unwrap_or(false);
        BoothOptions {
            randomize_answer_order: from_metadata || force_randomize,
            random_seed: seed,
        }
    }
}

pub fn read_election(path: &str) -> BoothResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let election: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_election: {:?}", election);
    for (q, question) in election.questions.iter().enumerate() {
        match question.choice_type.as_deref() {
            None | Some("stv") => {}
            Some(other) => {
                warn!(
                    "read_election: question {} has choice type {:?}, it is shown as a ranked ballot",
                    q, other
                );
            }
        }
    }
    Ok(election)
}

pub fn read_summary(path: &str) -> BoothResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn election(js: &str) -> ElectionConfig {
        serde_json::from_str(js).unwrap()
    }

    #[test]
    fn minimal_election() {
        let e = election(r#"{"questions": [{"answers": ["Alice", "Bob/PartyX/1"]}]}"#);
        assert_eq!(e.name, None);
        assert_eq!(
            e.descriptors(),
            vec![vec!["Alice".to_string(), "Bob/PartyX/1".to_string()]]
        );
        assert_eq!(e.booth_options(false, None), BoothOptions::DEFAULT_OPTIONS);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let e = election(
            r#"{"name": "E", "frozen_at": null, "questions": [
                {"answers": ["A"], "tally_type": "stv", "result_type": "absolute"}
            ]}"#,
        );
        assert_eq!(e.questions.len(), 1);
    }

    #[test]
    fn randomize_from_metadata_or_flag() {
        let e = election(
            r#"{"questions": [], "metadata": {"randomize_answer_order": true}}"#,
        );
        assert!(e.booth_options(false, None).randomize_answer_order);
        let e = election(r#"{"questions": [], "metadata": {}}"#);
        assert!(!e.booth_options(false, None).randomize_answer_order);
        let opts = e.booth_options(true, Some(7));
        assert!(opts.randomize_answer_order);
        assert_eq!(opts.random_seed, Some(7));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_election("/nonexistent/stvbooth/election.json"),
            Err(BoothError::OpeningJson { .. })
        ));
    }
}
