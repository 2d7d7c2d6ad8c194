//! # Navigation Validation
//!
//! Fail-fast structural validation of the navigation document.
//!
//! ## Rules
//!
//! 1. The site `title` and every social link `label` are non-empty.
//! 2. Every sidebar node has a non-empty `label` (whitespace only is empty).
//! 3. Every page sets exactly one of `slug`/`link`.
//! 4. No slug appears twice anywhere in the tree. Slugs compare equal when
//!    they differ only in leading/trailing `/`, since both deep-link to the
//!    same URL.
//!
//! Nodes are visited depth-first in declaration order; within a node the
//! rules are checked in the order above. The first violation is returned.

use std::collections::HashMap;
use std::ops::Deref;

use serde::Serialize;
use sitecfg_core::{ConfigError, FieldPath};

use crate::model::{NavPage, NavigationNode, SiteConfig};

/// A navigation document that passed [`validate()`].
///
/// Holds the input unchanged; validation applies no normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedSiteConfig(SiteConfig);

impl ValidatedSiteConfig {
    /// Access the validated document.
    pub fn config(&self) -> &SiteConfig {
        &self.0
    }

    /// Consume the wrapper, returning the document.
    pub fn into_inner(self) -> SiteConfig {
        self.0
    }

    /// Every page of the sidebar in render order, with its field path.
    pub fn pages(&self) -> Vec<(FieldPath, &NavPage)> {
        let mut out = Vec::new();
        collect_pages(&self.0.sidebar, &FieldPath::root().key("sidebar"), &mut out);
        out
    }
}

impl Deref for ValidatedSiteConfig {
    type Target = SiteConfig;

    fn deref(&self) -> &SiteConfig {
        &self.0
    }
}

fn collect_pages<'a>(
    nodes: &'a [NavigationNode],
    path: &FieldPath,
    out: &mut Vec<(FieldPath, &'a NavPage)>,
) {
    for (i, node) in nodes.iter().enumerate() {
        let node_path = path.index(i);
        match node {
            NavigationNode::Page(page) => out.push((node_path, page)),
            NavigationNode::Group(group) => {
                collect_pages(&group.items, &node_path.key("items"), out)
            }
            NavigationNode::AutoGroup(_) => {}
        }
    }
}

/// Validate a navigation document.
///
/// # Errors
///
/// Returns the first [`ConfigError`] in declaration order:
/// `MissingLabel`, `AmbiguousTarget` or `DuplicateSlug`.
pub fn validate(config: SiteConfig) -> Result<ValidatedSiteConfig, ConfigError> {
    let root = FieldPath::root();

    if is_blank(&config.title) {
        return Err(fail(ConfigError::MissingLabel {
            path: root.key("title"),
        }));
    }

    let social = root.key("social");
    for (i, link) in config.social.iter().enumerate() {
        if is_blank(&link.label) {
            return Err(fail(ConfigError::MissingLabel {
                path: social.index(i).key("label"),
            }));
        }
    }

    let stats = SidebarWalker::default()
        .walk(&config.sidebar, &root.key("sidebar"))
        .map_err(fail)?;

    tracing::debug!(
        title = %config.title,
        pages = stats.pages,
        groups = stats.groups,
        autogroups = stats.autogroups,
        "navigation validated"
    );
    Ok(ValidatedSiteConfig(config))
}

/// Validate a bare sidebar tree, returning it unchanged.
///
/// Paths in errors are relative to the sequence itself (e.g. `[1].items[0]`).
pub fn validate_sidebar(nodes: Vec<NavigationNode>) -> Result<Vec<NavigationNode>, ConfigError> {
    SidebarWalker::default()
        .walk(&nodes, &FieldPath::root())
        .map_err(fail)?;
    Ok(nodes)
}

fn fail(err: ConfigError) -> ConfigError {
    tracing::debug!(kind = %err.kind(), path = %err.path(), "navigation rejected");
    err
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[derive(Debug, Default, Clone, Copy)]
struct WalkStats {
    pages: usize,
    groups: usize,
    autogroups: usize,
}

/// Depth-first walker holding the slugs seen so far.
#[derive(Default)]
struct SidebarWalker {
    seen_slugs: HashMap<String, FieldPath>,
    stats: WalkStats,
}

impl SidebarWalker {
    fn walk(mut self, nodes: &[NavigationNode], path: &FieldPath) -> Result<WalkStats, ConfigError> {
        self.visit_all(nodes, path)?;
        Ok(self.stats)
    }

    fn visit_all(&mut self, nodes: &[NavigationNode], path: &FieldPath) -> Result<(), ConfigError> {
        for (i, node) in nodes.iter().enumerate() {
            self.visit(node, &path.index(i))?;
        }
        Ok(())
    }

    fn visit(&mut self, node: &NavigationNode, path: &FieldPath) -> Result<(), ConfigError> {
        if is_blank(node.label()) {
            return Err(ConfigError::MissingLabel {
                path: path.key("label"),
            });
        }

        match node {
            NavigationNode::Page(page) => {
                self.stats.pages += 1;
                self.visit_page(page, path)
            }
            NavigationNode::Group(group) => {
                self.stats.groups += 1;
                self.visit_all(&group.items, &path.key("items"))
            }
            NavigationNode::AutoGroup(_) => {
                self.stats.autogroups += 1;
                Ok(())
            }
        }
    }

    fn visit_page(&mut self, page: &NavPage, path: &FieldPath) -> Result<(), ConfigError> {
        page.target().map_err(|conflict| ConfigError::AmbiguousTarget {
            path: path.clone(),
            conflict,
        })?;

        if let Some(slug) = &page.slug {
            let slug_path = path.key("slug");
            let normalized = slug.trim_matches('/').to_string();
            if let Some(first) = self.seen_slugs.get(&normalized) {
                return Err(ConfigError::DuplicateSlug {
                    path: slug_path,
                    slug: slug.clone(),
                    first: first.clone(),
                });
            }
            self.seen_slugs.insert(normalized, slug_path);
        }
        Ok(())
    }
}
