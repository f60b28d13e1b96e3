use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use dtboost::config::{string2learner, Config, Learner};
use dtboost::decision_tree::LabelSet;
use dtboost::errors::Result;
use dtboost::hypothesis::Hypothesis;
use dtboost::input::{self, LanguageInput, FEATURE_COUNT};
use dtboost::model::Model;

#[derive(Parser, Debug)]
#[command(name = "dtboost", about = "Decision tree and AdaBoost language classifier")]
struct Cli {
    /// Log debug output from training.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Learn a model from a file of `label|text` lines.
    Train {
        examples: PathBuf,
        model: PathBuf,
        #[arg(value_parser = parse_learner)]
        learner: Learner,
        /// Boosting rounds.
        #[arg(long, default_value_t = dtboost::config::DEFAULT_ITERATIONS)]
        rounds: usize,
        /// Tree depth limit, negative for none.
        #[arg(long, default_value_t = dtboost::config::UNLIMITED_DEPTH, allow_hyphen_values = true)]
        max_depth: i32,
        #[arg(long, default_value = "nl")]
        positive: String,
        #[arg(long, default_value = "en")]
        negative: String,
        #[command(flatten)]
        words: WordLists,
    },
    /// Print one label per line of `file`. Pass the word lists used for training.
    Predict {
        model: PathBuf,
        file: PathBuf,
        #[command(flatten)]
        words: WordLists,
    },
}

/// Word list files for the language features, all three or none.
#[derive(Args, Debug, Default, PartialEq)]
struct WordLists {
    #[arg(long, requires_all = ["to_be", "to_have"])]
    pronouns: Option<PathBuf>,
    #[arg(long, requires_all = ["pronouns", "to_have"])]
    to_be: Option<PathBuf>,
    #[arg(long, requires_all = ["pronouns", "to_be"])]
    to_have: Option<PathBuf>,
}

impl WordLists {
    fn processor(&self) -> Result<LanguageInput> {
        match (&self.pronouns, &self.to_be, &self.to_have) {
            (Some(p), Some(b), Some(h)) => LanguageInput::from_files(p, b, h),
            _ => Ok(LanguageInput::default()),
        }
    }
}

fn parse_learner(s: &str) -> std::result::Result<Learner, String> {
    string2learner(s).ok_or_else(|| format!("unknown learner `{}`, expected dt or ada", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = pretty_env_logger::formatted_builder();
    if cli.debug {
        builder.filter_level(LevelFilter::Debug);
    } else if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();

    match cli.command {
        Command::Train {
            examples,
            model,
            learner,
            rounds,
            max_depth,
            positive,
            negative,
            words,
        } => {
            let processor = words.processor()?;
            let dv = input::load(&examples, &processor)?;

            let mut cfg = Config::new();
            cfg.set_feature_size(FEATURE_COUNT);
            cfg.set_learner(learner);
            cfg.set_iterations(rounds);
            cfg.set_max_depth(max_depth);
            cfg.set_labels(LabelSet::new(positive, negative));
            cfg.set_debug(cli.debug);
            info!("config:\n{}", cfg);

            let trained = Model::train(&cfg, &dv)?;
            trained.save_model(&model)?;
            info!("model saved to {}", model.display());
        }
        Command::Predict { model, file, words } => {
            let processor = words.processor()?;
            let trained = Model::load_model(&model)?;
            let rows = input::load_queries(&file, &processor)?;
            for label in trained.ask_all(&rows)? {
                println!("{}", label);
            }
        }
    }
    Ok(())
}
