//! Department records: the org-chart node type and its TOML table loader.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{SortedTreeNode, TreeNode};

/// One row of a department table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    /// Parent department id; absent or empty for top-level departments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Position among siblings in sorted output
    #[serde(default)]
    pub order: i64,
    /// Rows marked invalid are ignored when building
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

impl Department {
    pub fn new(id: &str, name: &str, parent: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent: parent.map(str::to_string),
            order: 0,
            valid: true,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    /// Display label; sorted output shows the order in front of the name.
    pub fn label(&self, with_order: bool) -> String {
        if with_order {
            format!("{}.{}", self.order, self.name)
        } else {
            self.name.clone()
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl TreeNode for Department {
    type Id = String;

    fn is_valid(&self) -> bool {
        self.valid && !self.id.trim().is_empty()
    }

    fn is_top_level(&self) -> bool {
        self.parent.as_deref().map_or(true, |p| p.trim().is_empty())
    }

    fn identifier(&self) -> Self::Id {
        self.id.clone()
    }

    fn parent_identifier(&self) -> Option<Self::Id> {
        self.parent.clone()
    }
}

impl SortedTreeNode for Department {
    fn compare(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }
}

#[derive(Debug, Default, Deserialize)]
struct DepartmentTable {
    #[serde(default)]
    department: Vec<Department>,
}

/// Parses `[[department]]` tables; `origin` is only used in error messages.
pub fn parse_departments(content: &str, origin: &Path) -> ApplicationResult<Vec<Department>> {
    let table: DepartmentTable = toml::from_str(content).map_err(|e| ApplicationError::Load {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(table.department)
}

#[instrument(level = "debug")]
pub fn load_departments(path: &Path) -> ApplicationResult<Vec<Department>> {
    let content = std::fs::read_to_string(path).with_path_context("read departments", path)?;
    let departments = parse_departments(&content, path)?;
    debug!("loaded {} departments", departments.len());
    Ok(departments)
}
