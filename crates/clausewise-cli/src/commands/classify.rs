//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clausewise_classifier::ClauseClassifier;

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<()> {
    let text = super::read_input(&args.input)?;
    if text.trim().is_empty() && args.title.trim().is_empty() {
        return Err(CliError::InvalidInput("Nothing to classify".to_string()));
    }

    let classifier = ClauseClassifier::builtin()?;
    let scores = classifier.score(&args.title, &text);
    let classification = classifier.classify(&args.title, &text);
    println!("{}", formatter.format_classification(&classification, &scores)?);
    Ok(())
}
