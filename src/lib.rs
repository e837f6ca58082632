//! Turn flat, parent-referencing records into a linked tree or forest, then
//! traverse, search, flatten and render the result.
//!
//! ```
//! use treeize::domain::{Tree, TreeNode, OrphanPolicy};
//!
//! struct Dept(&'static str, Option<&'static str>);
//!
//! impl TreeNode for Dept {
//!     type Id = &'static str;
//!     fn is_top_level(&self) -> bool { self.1.is_none() }
//!     fn identifier(&self) -> Self::Id { self.0 }
//!     fn parent_identifier(&self) -> Option<Self::Id> { self.1 }
//! }
//!
//! let tree = Tree::build(
//!     vec![Dept("hr", Some("admin")), Dept("admin", None), Dept("job", Some("hr"))],
//!     false,
//!     Some(OrphanPolicy::Reject),
//! )
//! .unwrap();
//! let text = tree.render_to_string(|d| d.0.to_string(), Some("+-"), "--").unwrap();
//! assert_eq!(text, "admin\n+-hr\n+---job");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
