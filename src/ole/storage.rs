use super::error::OleError;
use smallvec::SmallVec;
use std::fmt;

/// Handle to a storage inside a compound file.
///
/// A handle is the list of storage names from the root down; the empty path
/// is the root storage. Message files rarely nest more than three levels
/// (root, attachment, embedded message), so the components live inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StoragePath(SmallVec<[String; 4]>);

impl StoragePath {
    /// The root storage.
    pub fn root() -> Self {
        StoragePath(SmallVec::new())
    }

    /// Build a handle from its components.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StoragePath(components.into_iter().map(Into::into).collect())
    }

    /// Handle of a child entry.
    pub fn child(&self, name: &str) -> Self {
        let mut components = self.0.clone();
        components.push(name.to_string());
        StoragePath(components)
    }

    /// Handle of the containing storage, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        let mut components = self.0.clone();
        components.pop();
        Some(StoragePath(components))
    }

    /// Last component, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether this is the root storage.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path components, root first.
    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Nesting depth (0 for root).
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

/// Container primitives the property codec writes through.
///
/// Both operations fail only on resource exhaustion or misuse of the
/// container (unknown parent, invalid name); the codec propagates those
/// errors unchanged.
pub trait Storage {
    /// Create (or reopen) a storage named `name` inside `parent`.
    fn create_sub_storage(
        &mut self,
        parent: &StoragePath,
        name: &str,
    ) -> Result<StoragePath, OleError>;

    /// Create or overwrite the stream `name` inside `parent`.
    fn write_stream(&mut self, parent: &StoragePath, name: &str, data: &[u8])
    -> Result<(), OleError>;
}
