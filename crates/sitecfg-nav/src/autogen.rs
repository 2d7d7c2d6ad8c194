//! # Autogenerated Groups
//!
//! Resolves the items of an [`NavAutoGroup`] from the files in its content
//! directory, the way the site build does:
//!
//! - `*.md` / `*.mdx` files become pages, sorted by file name;
//! - a page's label is the `title` from its YAML frontmatter, falling back
//!   to the file stem (`setup-googletest` → `Setup googletest`);
//! - an `index` file maps to the directory's own slug;
//! - subdirectories become nested groups; empty ones are skipped.
//!
//! A missing or empty directory yields an empty group, not an error.

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::model::{NavAutoGroup, NavGroup, NavigationNode, SiteConfig};

const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Discover the items of `group` under `content_root`.
///
/// # Errors
///
/// Returns an I/O error if the directory exists but cannot be read.
pub fn discover(content_root: &Path, group: &NavAutoGroup) -> io::Result<Vec<NavigationNode>> {
    let directory = group.autogenerate.directory.trim_matches('/');
    let dir = content_root.join(directory);
    if !dir.is_dir() {
        tracing::debug!(
            directory = %dir.display(),
            label = %group.label,
            "autogenerate directory missing; group is empty"
        );
        return Ok(Vec::new());
    }
    let items = discover_dir(&dir, directory, group.autogenerate.collapsed)?;
    tracing::debug!(
        directory = %dir.display(),
        items = items.len(),
        "autogenerate directory discovered"
    );
    Ok(items)
}

/// Return a copy of `config` with every autogenerated group replaced by a
/// plain group holding its discovered items.
///
/// The result should be validated again: discovered slugs can collide with
/// slugs declared explicitly elsewhere in the tree.
pub fn expand_autogroups(config: &SiteConfig, content_root: &Path) -> io::Result<SiteConfig> {
    let mut expanded = config.clone();
    expanded.sidebar = expand_nodes(&config.sidebar, content_root)?;
    Ok(expanded)
}

fn expand_nodes(nodes: &[NavigationNode], content_root: &Path) -> io::Result<Vec<NavigationNode>> {
    nodes
        .iter()
        .map(|node| match node {
            NavigationNode::AutoGroup(auto) => Ok(NavigationNode::Group(NavGroup {
                label: auto.label.clone(),
                items: discover(content_root, auto)?,
                collapsed: auto.collapsed,
            })),
            NavigationNode::Group(group) => Ok(NavigationNode::Group(NavGroup {
                label: group.label.clone(),
                items: expand_nodes(&group.items, content_root)?,
                collapsed: group.collapsed,
            })),
            NavigationNode::Page(_) => Ok(node.clone()),
        })
        .collect()
}

fn discover_dir(
    dir: &Path,
    slug_prefix: &str,
    collapsed: Option<bool>,
) -> io::Result<Vec<NavigationNode>> {
    let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut index = None;
    let mut items = Vec::new();
    for entry in entries {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            let child_prefix = join_slug(slug_prefix, name);
            let children = discover_dir(&path, &child_prefix, collapsed)?;
            if !children.is_empty() {
                items.push(NavigationNode::Group(NavGroup {
                    label: humanize(name),
                    items: children,
                    collapsed,
                }));
            }
            continue;
        }

        let is_page = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext));
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_page {
            continue;
        }

        let label = frontmatter_title(&path).unwrap_or_else(|| humanize(stem));
        if stem == "index" {
            index = Some(NavigationNode::slug_page(label, slug_prefix));
        } else {
            items.push(NavigationNode::slug_page(label, join_slug(slug_prefix, stem)));
        }
    }

    if let Some(index) = index {
        items.insert(0, index);
    }
    Ok(items)
}

fn join_slug(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// `add-framework` → `Add framework`.
fn humanize(stem: &str) -> String {
    let words = stem.replace(['-', '_'], " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => stem.to_string(),
    }
}

#[derive(Deserialize)]
struct Frontmatter {
    title: Option<String>,
}

fn frontmatter_title(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let rest = content.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    let fm: Frontmatter = serde_yaml::from_str(&rest[..end]).ok()?;
    fm.title.filter(|t| !t.trim().is_empty())
}
