use std::io::{self, Write};

use schemasync_diff::ConnectionTarget;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print the comparison summary shown before the diff runs.
pub fn print_banner(
    out: &mut dyn Write,
    reference: &ConnectionTarget,
    comparison: &ConnectionTarget,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "PostgreSQL Schema Sync")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Source (target schema): {}", reference.endpoint())?;
    writeln!(out, "Target (current schema): {}", comparison.endpoint())?;
    writeln!(
        out,
        "Direction: Make {} match {}",
        comparison.role().to_string().to_uppercase(),
        reference.role().to_string().to_uppercase()
    )?;
    writeln!(out, "{}", rule())?;
    writeln!(out)
}

/// Print the generated SQL between rules.
pub fn print_preview(out: &mut dyn Write, sql: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "MIGRATION SQL PREVIEW:")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "{sql}")?;
    writeln!(out, "{}", rule())
}
