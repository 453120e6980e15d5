//! Subcommand handlers.

mod plan;
mod respond;

pub use plan::plan;
pub use respond::respond;

/// Write a JSON document to stdout.
fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
