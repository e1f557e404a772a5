// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `build-index` — embeds the corpus and persists the index
//   2. `prepare`     — windows + span-aligns the corpus to JSON
//   3. `ask`         — retrieves passages and extracts an answer

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, BuildIndexArgs, Commands, PrepareArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "corpus-qa",
    version = "0.1.0",
    about = "Build a dense passage index over a SQuAD corpus, then ask questions."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    ///
    /// The handlers are associated functions: matching moves the
    /// args out of `self.command`, so they must not borrow `self`.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::BuildIndex(args) => Self::run_build_index(args),
            Commands::Prepare(args)    => Self::run_prepare(args),
            Commands::Ask(args)        => Self::run_ask(args),
        }
    }

    /// Handles the `build-index` subcommand.
    fn run_build_index(args: BuildIndexArgs) -> Result<()> {
        use crate::application::build_index_use_case::BuildIndexUseCase;

        let index_path = args.index_path.clone();

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = BuildIndexUseCase::new(args.into());
        use_case.execute()?;

        println!("Index built and saved to {index_path}.");
        Ok(())
    }

    /// Handles the `prepare` subcommand.
    fn run_prepare(args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        let out = args.out.clone();

        let use_case = PrepareUseCase::new(args.into());
        use_case.execute()?;

        println!("Prepared data written to {out}.");
        Ok(())
    }

    /// Handles the `ask` subcommand.
    /// Loads the index and prints the selected answer.
    fn run_ask(args: AskArgs) -> Result<()> {
        use crate::application::ask_use_case::AskUseCase;
        use crate::domain::traits::QuestionAnswerer;

        let use_case = AskUseCase::new(&args.index_path, args.top_k)?;

        let answer = use_case.answer(&args.question)?;
        if answer.is_no_answer() {
            println!("\nNo answer found in the corpus.");
        } else {
            println!("\nAnswer: {}", answer.text);
            println!("Confidence: {:.3}", answer.confidence);
            if let Some(id) = &answer.source_passage_id {
                println!("Passage: {id}");
            }
        }
        Ok(())
    }
}
