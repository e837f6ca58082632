//! Application layer: concrete node records and hierarchy use cases
//!
//! This layer loads department tables and drives the domain builder and queries.

pub mod department;
pub mod error;
pub mod error_ext;
pub mod hierarchy;

pub use department::{load_departments, parse_departments, Department};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use hierarchy::{FoundNode, HierarchyService, SizeReport};
