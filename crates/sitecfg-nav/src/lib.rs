//! # sitecfg-nav — Navigation Schema
//!
//! Models the navigation configuration of a documentation site: the site
//! title, social links, opaque theme plugins and, most importantly, the
//! sidebar tree rendered top-to-bottom by the site theme.
//!
//! ## Sidebar Nodes
//!
//! | Node | Fields | Notes |
//! |------|--------|-------|
//! | Page | `label`, `slug` or `link` | exactly one target |
//! | Group | `label`, `items` | nests, order significant |
//! | AutoGroup | `label`, `autogenerate.directory` | items discovered at build time |
//!
//! ## Validation
//!
//! [`validate()`] is pure and fail-fast. It returns the input unchanged,
//! wrapped in [`ValidatedSiteConfig`], or the first `ConfigError` met in
//! depth-first declaration order.
//!
//! ## Crate Policy
//!
//! - Depends on `sitecfg-core` for errors and `sitecfg-schema` for loading.
//! - Validation never normalizes: a validated tree serializes back to the
//!   document it was read from.

pub mod autogen;
pub mod load;
pub mod model;
pub mod validate;

pub use autogen::{discover, expand_autogroups};
pub use load::{load_site_config, parse_site_config};
pub use model::{
    AutoGenerate, NavAutoGroup, NavGroup, NavPage, NavigationNode, PathRef, SiteConfig,
    SocialLink, TrailingSlash,
};
pub use validate::{validate, validate_sidebar, ValidatedSiteConfig};
