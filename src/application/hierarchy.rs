//! Hierarchy use cases: build a department tree per settings and query it.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, Department};
use crate::config::Settings;
use crate::domain::{SortedTree, Tree, TreeConvert};

/// A built hierarchy, plain or sorted by department order.
#[derive(Debug)]
enum Hierarchy {
    Plain(Tree<Department>),
    Sorted(SortedTree<Department>),
}

/// Runs `$body` with `$tree` bound to whichever tree variant was built.
macro_rules! with_tree {
    ($hierarchy:expr, $tree:ident => $body:expr) => {
        match $hierarchy {
            Hierarchy::Plain($tree) => $body,
            Hierarchy::Sorted($tree) => $body,
        }
    };
}

/// Where a department sits in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundNode {
    pub path: String,
    pub layer: i32,
    pub children: usize,
}

/// Frozen construction count next to a fresh walk count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub cached: usize,
    pub live: usize,
}

pub struct HierarchyService {
    settings: Settings,
}

impl HierarchyService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[instrument(level = "debug", skip_all, fields(count = departments.len()))]
    fn build(&self, departments: Vec<Department>) -> ApplicationResult<Hierarchy> {
        let builder = self.settings.builder();
        let hierarchy = if self.settings.sorted {
            Hierarchy::Sorted(builder.build_sorted(departments)?)
        } else {
            Hierarchy::Plain(builder.build(departments)?)
        };
        debug!("built {:?} hierarchy", builder.kind());
        Ok(hierarchy)
    }

    /// Indented text, one department per line.
    pub fn render(&self, departments: Vec<Department>) -> ApplicationResult<String> {
        let sorted = self.settings.sorted;
        let hierarchy = self.build(departments)?;
        let text = with_tree!(&hierarchy, tree => tree.render_to_string(
            |d| d.label(sorted),
            self.settings.first_prefix.as_deref(),
            &self.settings.prefix,
        ))?;
        Ok(text)
    }

    /// Box-drawing rendering, one block per top node.
    pub fn termtree(&self, departments: Vec<Department>) -> ApplicationResult<String> {
        let sorted = self.settings.sorted;
        let hierarchy = self.build(departments)?;
        let trees = with_tree!(&hierarchy, tree => tree.to_termtree(|d| d.label(sorted)));
        Ok(trees
            .iter()
            .map(|t| t.to_string().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Paths of every reachable department in depth-first order.
    pub fn flat(&self, departments: Vec<Department>) -> ApplicationResult<Vec<String>> {
        let separator = &self.settings.path_separator;
        let hierarchy = self.build(departments)?;
        let paths = with_tree!(&hierarchy, tree => tree
            .flatten()
            .into_iter()
            .map(|id| tree.path(id, |d| d.id.clone(), separator))
            .collect::<Result<Vec<_>, _>>())?;
        Ok(paths)
    }

    /// Locates a department by id among reachable nodes.
    pub fn find(&self, departments: Vec<Department>, id: &str) -> ApplicationResult<FoundNode> {
        let separator = &self.settings.path_separator;
        let hierarchy = self.build(departments)?;
        with_tree!(&hierarchy, tree => {
            let node = tree
                .find(|d| d.id == id)
                .ok_or_else(|| ApplicationError::NotFound(id.to_string()))?;
            Ok(FoundNode {
                path: tree.path(node, |d| d.name.clone(), separator)?,
                layer: tree.layer(node)?,
                children: tree.children(node).len(),
            })
        })
    }

    pub fn size(&self, departments: Vec<Department>) -> ApplicationResult<SizeReport> {
        let hierarchy = self.build(departments)?;
        Ok(with_tree!(&hierarchy, tree => SizeReport {
            cached: tree.cached_size(),
            live: tree.size(),
        }))
    }
}
