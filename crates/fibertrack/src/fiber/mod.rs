//! Framework internal-tree access: locating the node attached to a DOM
//! element, and reading component metadata from it.

mod node;
pub mod extract;
pub mod resolver;

pub use node::{FiberKind, FiberNode};
pub use extract::{FiberInfo, extract_fiber_info};
pub use resolver::{NodeLocator, reset_cache, resolve, resolve_with_ancestors};
