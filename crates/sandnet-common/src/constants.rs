//! System-wide constants and default paths.

/// Default base directory under which every sandbox gets its own subdirectory.
pub const DEFAULT_SANDBOX_ROOT: &str = "/run/sandnet/sandboxes";

/// Hosts file duplicated into each sandbox.
pub const SYSTEM_HOSTS_FILE: &str = "/etc/hosts";

/// File name of the hostname artifact inside a sandbox directory.
pub const HOSTNAME_FILE: &str = "hostname";

/// File name of the hosts artifact inside a sandbox directory.
pub const HOSTS_FILE: &str = "hosts";

/// File name of the resolver configuration artifact inside a sandbox directory.
pub const RESOLV_CONF_FILE: &str = "resolv.conf";

/// Permission bits for the sandbox root directory.
pub const SANDBOX_DIR_MODE: u32 = 0o755;

/// Permission bits for every artifact file.
pub const SANDBOX_FILE_MODE: u32 = 0o644;

/// Upper bound on `search` entries accepted by the resolver.
pub const MAX_DNS_SEARCHES: usize = 6;

/// Separator used by the network subsystem for DNS suffix and server lists.
pub const DNS_LIST_SEPARATOR: char = ',';

/// Environment variable overriding the sandbox root directory.
pub const ENV_SANDBOX_ROOT: &str = "SANDNET_SANDBOX_ROOT";

/// Environment variable overriding the hosts file source.
pub const ENV_HOSTS_FILE: &str = "SANDNET_HOSTS_FILE";

/// Environment variable pointing at a JSON configuration file.
pub const ENV_CONFIG: &str = "SANDNET_CONFIG";
