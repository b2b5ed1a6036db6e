use clap::Parser;

/// This is a replay program for the ranked-choice (STV) ballot of a voting booth.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The election definition in JSON format. Each question lists its candidates
    /// as "name" or "name/ticket/order". See the documentation for the complete format.
    #[clap(short, long, value_parser)]
    pub election: Option<String>,

    /// (file path, optional) The actions of the voter, in JSON format. If not provided, the
    /// first question is shown and left untouched.
    #[clap(short, long, value_parser)]
    pub script: Option<String>,

    /// (file path, 'stdout' or empty) Where the JSON summary of the answers is written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, stvbooth will check
    /// that the replayed answers match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, optional) If specified, the markup of the last question shown is written
    /// to this location.
    #[clap(long, value_parser)]
    pub html: Option<String>,

    /// Shuffles the candidates of each question, even if the election does not ask for it.
    #[clap(long, takes_value = false)]
    pub randomize: bool,

    /// (number, optional) Fixes the shuffle so that a session can be replayed exactly.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
