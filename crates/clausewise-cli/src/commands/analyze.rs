//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use clausewise_analyzer::{ContractAnalysis, ContractAnalyzer};
use clausewise_domain::AnalysisContext;
use tracing::info;

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = super::read_input(&args.input)?;
    let analysis = analyze(&text, &args, config)?;
    println!("{}", formatter.format_analysis(&analysis)?);
    Ok(())
}

/// Run the pipeline with flags taking precedence over configured defaults.
fn analyze(text: &str, args: &AnalyzeArgs, config: &Config) -> Result<ContractAnalysis> {
    let context = resolve_context(args, config);

    let analyzer = match args.playbook.as_ref().or(config.defaults.playbook.as_ref()) {
        Some(path) => {
            info!("Loading playbook {}", path.display());
            ContractAnalyzer::with_playbook(path)?
        }
        None => ContractAnalyzer::builtin()?,
    };

    Ok(analyzer.analyze_text(text, &context))
}

fn resolve_context(args: &AnalyzeArgs, config: &Config) -> AnalysisContext {
    AnalysisContext::new(
        args.contract_type
            .as_deref()
            .or(config.defaults.contract_type.as_deref()),
        args.perspective
            .as_deref()
            .or(config.defaults.perspective.as_deref()),
    )
}
