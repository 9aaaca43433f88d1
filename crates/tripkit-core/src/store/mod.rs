// ── Entity cache store ──
//
// Generic cache-and-filter state shared by every repository.

pub mod cache;
pub mod filter;
pub mod persist;
pub mod policy;

pub use cache::{CacheView, EntityCache, FetchTicket, OperationState};
pub use filter::{FilterSpec, Range};
pub use persist::{FileStorage, MemoryStorage, PersistedCache, SessionStorage};
pub use policy::{CachePolicy, DEFAULT_MAX_AGE};
