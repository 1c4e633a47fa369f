//! # Constants
//!
//! Configuration keys, defaults and wire constants shared by both hosts.

/// Configuration key holding the Key Vault URI (or bare vault name)
pub const KEYVAULT_URI_KEY: &str = "KEYVAULT_URI";

/// Configuration key holding the name of the secret to fetch
pub const SECRET_NAME_KEY: &str = "SECRET_NAME";

/// Static bearer token for local emulators; bypasses the Azure credential chain
pub const KEYVAULT_STATIC_TOKEN_KEY: &str = "KEYVAULT_STATIC_TOKEN";

/// Set by Azure Workload Identity on the pod
pub const AZURE_FEDERATED_TOKEN_FILE_KEY: &str = "AZURE_FEDERATED_TOKEN_FILE";

/// Client ID of the workload identity or service principal
pub const AZURE_CLIENT_ID_KEY: &str = "AZURE_CLIENT_ID";

/// Tenant of the service principal
pub const AZURE_TENANT_ID_KEY: &str = "AZURE_TENANT_ID";

/// Service principal secret
pub const AZURE_CLIENT_SECRET_KEY: &str = "AZURE_CLIENT_SECRET";

/// Managed identity endpoint injected by App Service and Azure Functions
pub const IDENTITY_ENDPOINT_KEY: &str = "IDENTITY_ENDPOINT";

/// Legacy managed identity endpoint (older App Service sandboxes)
pub const MSI_ENDPOINT_KEY: &str = "MSI_ENDPOINT";

/// Outbound Key Vault request timeout (seconds)
pub const KEYVAULT_TIMEOUT_SECS_KEY: &str = "KEYVAULT_TIMEOUT_SECS";

/// Port variable read by the web host
pub const WEB_PORT_KEY: &str = "PORT";

/// Port variable the Azure Functions host hands to custom handlers
pub const FUNCTIONS_CUSTOMHANDLER_PORT_KEY: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

/// Default web host port
pub const DEFAULT_WEB_PORT: u16 = 8080;

/// Default custom handler port (matches `func start`)
pub const DEFAULT_FUNCTION_PORT: u16 = 7071;

/// Server startup timeout in seconds
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Server readiness poll interval in milliseconds
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Default outbound Key Vault request timeout in seconds
pub const DEFAULT_KEYVAULT_TIMEOUT_SECS: u64 = 30;

/// Key Vault REST API version requested by the secret client
pub const KEYVAULT_API_VERSION: &str = "7.4";

/// OAuth scope for Key Vault data plane tokens
pub const KEYVAULT_SCOPE: &str = "https://vault.azure.net/.default";

/// Longest valid Key Vault name
pub const KEYVAULT_NAME_MAX_LEN: usize = 24;

/// DNS suffix used to expand a bare vault name into a URL
pub const KEYVAULT_DNS_SUFFIX: &str = "vault.azure.net";

/// Number of leading characters revealed by the web host
pub const MASK_PREFIX_LEN: usize = 4;

/// Placeholder appended to the revealed prefix
pub const MASK_SUFFIX: &str = "****";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "keyvault_demo=info,tower_http=info";
