//! `nb id` command implementation.

use clap::Args;
use nb_notion::id;

use crate::output::Output;

/// Arguments for the id command.
#[derive(Args)]
pub(crate) struct IdArgs {
    /// Block id in either form.
    block_id: String,
}

impl IdArgs {
    /// Print both forms of the id.
    pub(crate) fn execute(self) {
        let output = Output::new();
        let compact = id::to_compact(&self.block_id);
        let canonical = id::to_canonical(&compact);
        output.data(&format!("compact:   {compact}"));
        output.data(&format!("canonical: {canonical}"));
    }
}
