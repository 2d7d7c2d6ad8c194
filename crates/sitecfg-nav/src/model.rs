//! # Navigation Model
//!
//! Typed form of the navigation document. Field names follow the document
//! (`trailingSlash`, `autogenerate`), so a model serializes back to the
//! JSON it was read from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sitecfg_core::TargetConflict;

/// The navigation configuration of a documentation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title shown in the header.
    pub title: String,
    /// Deployed origin, e.g. `https://sibkru.github.io`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Base path the site is served under, e.g. `/allure-cpp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Trailing slash policy applied when slugs are turned into URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_slash: Option<TrailingSlash>,
    /// Header social links.
    #[serde(default)]
    pub social: Vec<SocialLink>,
    /// The sidebar tree, rendered top-to-bottom.
    pub sidebar: Vec<NavigationNode>,
    /// Theme plugins. Opaque; passed through to the theme.
    #[serde(default)]
    pub plugins: Vec<serde_json::Value>,
    /// Any other theme options. Passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A header social link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    #[serde(default)]
    pub label: String,
    pub href: String,
}

/// URL trailing slash policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    /// Every page URL ends with `/`.
    Always,
    /// No page URL ends with `/` (except the site root).
    Never,
    /// URLs are emitted as built, without a trailing `/`.
    Ignore,
}

/// One entry of the sidebar tree.
///
/// The variant is inferred from the fields present: `items` makes a group,
/// `autogenerate` makes an autogenerated group, anything else is a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationNode {
    Group(NavGroup),
    AutoGroup(NavAutoGroup),
    Page(NavPage),
}

impl NavigationNode {
    /// The label displayed for this node.
    pub fn label(&self) -> &str {
        match self {
            Self::Group(g) => &g.label,
            Self::AutoGroup(a) => &a.label,
            Self::Page(p) => &p.label,
        }
    }

    /// Short name of the node variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::AutoGroup(_) => "autogroup",
            Self::Page(_) => "page",
        }
    }

    /// Convenience constructor for a page targeting a slug.
    pub fn slug_page(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::Page(NavPage {
            label: label.into(),
            slug: Some(slug.into()),
            link: None,
        })
    }

    /// Convenience constructor for a page targeting a link.
    pub fn link_page(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Page(NavPage {
            label: label.into(),
            slug: None,
            link: Some(link.into()),
        })
    }

    /// Convenience constructor for a group.
    pub fn group(label: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self::Group(NavGroup {
            label: label.into(),
            items,
            collapsed: None,
        })
    }

    /// Convenience constructor for an autogenerated group.
    pub fn auto_group(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self::AutoGroup(NavAutoGroup {
            label: label.into(),
            autogenerate: AutoGenerate {
                directory: directory.into(),
                collapsed: None,
            },
            collapsed: None,
        })
    }
}

/// A single page. Exactly one of `slug`/`link` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavPage {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NavPage {
    /// Resolve the page target.
    ///
    /// # Errors
    ///
    /// Returns the [`TargetConflict`] when both or neither target is set.
    pub fn target(&self) -> Result<PathRef<'_>, TargetConflict> {
        match (&self.slug, &self.link) {
            (Some(slug), None) => Ok(PathRef::Slug(slug)),
            (None, Some(link)) => Ok(PathRef::Link(link)),
            (Some(_), Some(_)) => Err(TargetConflict::Both),
            (None, None) => Err(TargetConflict::Neither),
        }
    }
}

/// A labelled group of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavGroup {
    #[serde(default)]
    pub label: String,
    pub items: Vec<NavigationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// A group whose items are discovered from a content directory at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavAutoGroup {
    #[serde(default)]
    pub label: String,
    pub autogenerate: AutoGenerate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// The `autogenerate` block of an [`NavAutoGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoGenerate {
    /// Content directory, relative to the content root.
    pub directory: String,
    /// Whether discovered subgroups start collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// A resolved page target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRef<'a> {
    /// Site-relative logical identifier, resolved against `base`.
    Slug(&'a str),
    /// Absolute path or external URL, used verbatim.
    Link(&'a str),
}

impl SiteConfig {
    /// Build the href a renderer should emit for `target`.
    ///
    /// Slugs are joined onto `base` and shaped by `trailingSlash`; links are
    /// returned unchanged. The site root always renders as `<base>/`.
    pub fn resolve_href(&self, target: &PathRef<'_>) -> String {
        let slug = match target {
            PathRef::Link(link) => return (*link).to_string(),
            PathRef::Slug(slug) => slug.trim_matches('/'),
        };
        let base = self.base.as_deref().unwrap_or("").trim_end_matches('/');
        if slug.is_empty() {
            return format!("{base}/");
        }
        let path = format!("{base}/{slug}");
        match self.trailing_slash {
            Some(TrailingSlash::Always) => format!("{path}/"),
            Some(TrailingSlash::Never) | Some(TrailingSlash::Ignore) | None => path,
        }
    }

    /// Build an absolute URL for `target` when `site` is configured.
    ///
    /// External links (anything not starting with `/`) are returned as-is.
    pub fn resolve_url(&self, target: &PathRef<'_>) -> String {
        let href = self.resolve_href(target);
        match &self.site {
            Some(site) if href.starts_with('/') => {
                format!("{}{href}", site.trim_end_matches('/'))
            }
            _ => href,
        }
    }
}
