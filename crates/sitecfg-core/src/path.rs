//! # Field Paths
//!
//! A [`FieldPath`] locates a value inside a configuration document. It
//! renders the way the document author reads the document, e.g.
//! `sidebar[2].items[0].slug` or `plugins.awesome.options.charts[3].mode`.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Location of a field inside a configuration document.
///
/// Paths are immutable; [`key`](FieldPath::key) and
/// [`index`](FieldPath::index) return an extended copy so a validator can
/// hand a child path down the tree without touching the parent's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by an object key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Returns this path extended by an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns `other` appended to this path.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Whether this path points at the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Render as an RFC 6901 JSON Pointer (e.g. `/sidebar/2/items/0`).
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => f.write_str(k)?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(FieldPath::root().to_string(), "(root)");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = FieldPath::root()
            .key("sidebar")
            .index(2)
            .key("items")
            .index(0)
            .key("slug");
        assert_eq!(path.to_string(), "sidebar[2].items[0].slug");
    }

    #[test]
    fn test_index_at_root() {
        assert_eq!(FieldPath::root().index(3).key("label").to_string(), "[3].label");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = FieldPath::root().key("charts");
        let child = parent.index(1);
        assert_eq!(parent.segments().len(), 1);
        assert_eq!(child.segments().len(), 2);
    }

    #[test]
    fn test_join() {
        let prefix = FieldPath::root().key("plugins").key("awesome").key("options");
        let inner = FieldPath::root().key("charts").index(0).key("type");
        assert_eq!(
            prefix.join(&inner).to_string(),
            "plugins.awesome.options.charts[0].type"
        );
    }

    #[test]
    fn test_json_pointer_escapes() {
        let path = FieldPath::root().key("a/b").key("c~d").index(7);
        assert_eq!(path.to_json_pointer(), "/a~1b/c~0d/7");
        assert_eq!(FieldPath::root().to_json_pointer(), "");
    }
}
