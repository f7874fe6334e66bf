//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use clausewise_risk::RuleSet;

/// Execute the rules command.
///
/// Loading the playbook validates it; any malformed rule aborts the listing.
pub fn execute_rules(args: RulesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let rules = match args.playbook.as_ref().or(config.defaults.playbook.as_ref()) {
        Some(path) => RuleSet::with_playbook(path)?,
        None => RuleSet::builtin()?,
    };
    println!("{}", formatter.format_rules(&rules)?);
    Ok(())
}
