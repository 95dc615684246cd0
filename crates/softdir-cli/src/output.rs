//! Output format selection for commands that print structured data.

/// Output format for `show` and `normalize`
///
/// ```bash
/// softdir show "7-Zip" --format json | jq '.versions[0]'
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default)
    Text,
    /// Single JSON document
    Json,
}

impl OutputFormat {
    /// Whether the output is meant for other programs.
    #[must_use]
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json)
    }
}
