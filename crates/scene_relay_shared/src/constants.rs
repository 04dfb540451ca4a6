//! # Wire Constants
//!
//! Values the relay and the viewer must agree on.
//!
//! **NOTE:** Route paths are part of the producer contract. The external
//! simulation pushes to and drains from these exact paths.

// =============================================================================
// NETWORK CONFIGURATION
// =============================================================================

/// Default HTTP port of the relay.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address of the relay (all interfaces).
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default base URL the viewer polls.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

// =============================================================================
// ROUTES
// =============================================================================

/// Snapshot push (`POST`) and fetch (`GET`).
pub const PARTS_ROUTE: &str = "/parts";

/// Kick request prefix; the target id is the trailing path segment.
pub const KICK_ROUTE: &str = "/kick";

/// Kick queue drain (`GET`). Reading clears the queue.
pub const KICK_QUEUE_ROUTE: &str = "/kickqueue";

/// Liveness probe.
pub const HEALTH_ROUTE: &str = "/health";

// =============================================================================
// CLIENT CADENCE
// =============================================================================

/// Interval between snapshot polls in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Target display refresh rate of the viewer.
pub const FRAME_RATE: u32 = 60;
