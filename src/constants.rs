pub mod network {
    pub const SSH_DEFAULT_PORT: u16 = 22;
    pub const TIMEOUT_SSH_READY_MS: u64 = 10_000;
    pub const KEEPALIVE_INTERVAL_SECS: u32 = 30;
    pub const POLL_INTERVAL_MS: u64 = 20;
}

pub mod limits {
    pub const MAX_PORT: u16 = 65_535;
    pub const MIN_PORT: u16 = 1;
    pub const READ_CHUNK_BYTES: usize = 8192;
}

pub mod relay {
    pub const STDOUT_TAG: &str = "STDOUT";
    pub const STDERR_TAG: &str = "STDERR";
}

pub mod env {
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const CONNECT_TIMEOUT_MS: &str = "SSH_RESOURCE_CONNECT_TIMEOUT_MS";
    pub const KEEPALIVE_SECS: &str = "SSH_RESOURCE_KEEPALIVE_SECS";
}

pub mod messages {
    pub const REQUEST_PARSE: &str = "unable to parse JSON from standard input";
    pub const COMMAND_EXECUTION: &str = "unable to run SSH command";
    pub const OUTPUT_WRITE: &str = "unable to write JSON to standard output";
    pub const RELAY_WRITE: &str = "unable to relay command output to standard error";
}
