/// Default upload endpoint of the hosting service.
pub const ENDPOINT: &str = "https://api.imgbb.com/1/upload";

// The upload endpoint only accepts requests that look like they come from
// the service's own web client, so these never follow the endpoint URL.
pub const HOST: &str = "imgbb.com";
pub const ORIGIN: &str = "https://imgbb.com";
pub const REFERER: &str = "https://imgbb.com/";

/// Largest accepted payload, 32 MiB.
pub const MAX_SIZE: usize = 33_554_432;
