pub struct NetConfig;

impl NetConfig {
    pub const UNKNOWN_HOSTNAME: &'static str = "Unknown";
    /// Port appended to hostnames before handing them to the OS resolver.
    /// The resolver only cares about the host part; 0 keeps the result inert.
    pub const RESOLVER_PROBE_PORT: u16 = 0;
}
