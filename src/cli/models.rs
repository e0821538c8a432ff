//! Model catalog listing
//!
//! Prints the informational catalog and the reference links. No network
//! access and no credentials are needed.

use std::error::Error;
use std::io::{self, Write};

use crate::core::catalog::ModelCatalog;
use crate::core::prompt::BACKEND_MODEL;

pub fn list_models() -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    write_catalog(&mut stdout.lock(), &ModelCatalog)?;
    Ok(())
}

pub fn write_catalog<W: Write>(out: &mut W, catalog: &ModelCatalog) -> io::Result<()> {
    writeln!(out, "🤖 Available Models")?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out)?;

    let id_width = catalog
        .entries()
        .iter()
        .map(|entry| entry.id.len())
        .max()
        .unwrap_or(0);
    for entry in catalog.entries() {
        writeln!(
            out,
            "  • {:<id_width$}  {}",
            entry.id,
            entry.description,
            id_width = id_width
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "ℹ️  For reference only. Chat answers come from {BACKEND_MODEL}."
    )?;
    writeln!(out)?;
    writeln!(out, "🔗 Resources")?;
    for link in catalog.links() {
        writeln!(out, "  • {}: {}", link.label, link.url)?;
    }
    Ok(())
}
