/// Log tags identifying the subsystem that emitted a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Api,
    Aggregator,
    Webserver,
}

impl LogTag {
    /// All tags, used when expanding `--debug-all`
    pub const ALL: [LogTag; 6] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Cache,
        LogTag::Api,
        LogTag::Aggregator,
        LogTag::Webserver,
    ];

    /// Key used by `--debug-<key>` command-line flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Cache => "cache",
            LogTag::Api => "api",
            LogTag::Aggregator => "aggregator",
            LogTag::Webserver => "webserver",
        }
        .to_string()
    }

    /// Uncolored label written to the log file
    pub fn to_plain_string(&self) -> String {
        self.to_debug_key().to_uppercase()
    }
}
