//! Print a quick summary

use anyhow::Result;

use crate::SummaryArgs;

pub fn run(args: SummaryArgs) -> Result<()> {
    let grade = super::load_grade(&args.input)?;
    println!("{}", grade.summary());
    Ok(())
}
