//! Segment command implementation.

use crate::cli::SegmentArgs;
use crate::error::Result;
use crate::output::Formatter;
use clausewise_segmenter::ClauseTreeBuilder;

/// Execute the segment command.
pub fn execute_segment(args: SegmentArgs, formatter: &Formatter) -> Result<()> {
    let text = super::read_input(&args.input)?;
    let clauses = ClauseTreeBuilder::default_config()?.segment(&text);
    println!("{}", formatter.format_clauses(&clauses)?);
    Ok(())
}
