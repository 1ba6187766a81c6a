use clap::Args;
use eyre::{Context, Result};
use kiln_index::{SymbolRecord, SymbolSource};

use super::ConfigArg;

#[derive(Args)]
pub struct IndexCommand {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Fully qualified marker type, e.g. org.apache.camel.spi.UriEndpoint
    #[arg(short, long)]
    pub marker: String,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.config.open();
        let index = project.scan();
        let records = index.lookup(&self.marker);

        if self.json {
            let json = serde_json::to_string_pretty(records).wrap_err("Failed to encode records")?;
            println!("{}", json);
            return Ok(());
        }

        for record in records {
            println!("{}", describe(record));
        }
        eprintln!("{} records marked with {}", records.len(), self.marker);
        Ok(())
    }
}

/// `owner[#member]` followed by the marker attributes.
fn describe(record: &SymbolRecord) -> String {
    let mut line = record.owner.clone();
    if let Some(name) = &record.element.name {
        line.push('#');
        line.push_str(name);
    }
    if record.deprecated {
        line.push_str(" (deprecated)");
    }
    for (key, value) in &record.attributes {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

#[cfg(test)]
mod tests {
    use kiln_index::MarkerValue;

    use super::*;

    #[test]
    fn test_describe() {
        let record = SymbolRecord::on_field("org.acme.FooEndpoint", "period", "long", "a.UriParam")
            .attr("defaultValue", "1000")
            .attr("secret", MarkerValue::Bool(false))
            .deprecated(true);
        assert_eq!(
            describe(&record),
            "org.acme.FooEndpoint#period (deprecated) defaultValue=1000 secret=false"
        );
    }
}
