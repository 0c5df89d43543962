//! Schema listing command handler

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::OutputWriter;
use formcheck_schemas::{Schema, SchemaId};

/// Handle the schemas command
pub fn handle_schemas(output: &mut OutputWriter) -> Result<()> {
    let schemas: Vec<&'static Schema> = SchemaId::ALL.iter().map(|id| id.schema()).collect();

    if output.format() != OutputFormat::Human {
        return output.data(&schemas);
    }

    for schema in schemas {
        output.section(&format!("{} schema", schema.name))?;
        for rule in schema.fields {
            output.writeln(&format!(
                "  {:<10} {:<14} \"{}\"",
                rule.field,
                rule.constraint.to_string(),
                rule.message
            ))?;
        }
    }

    Ok(())
}
