/// Per-write options for a gated store.
///
/// There is deliberately no `Default`: a caller must spell out either a
/// category or [`WriteOptions::unrestricted`], so a bypass of the consent
/// check is always visible at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    category: Option<String>,
}

impl WriteOptions {
    /// Gate the write on `category` being granted.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    /// Write without consulting consent.
    pub fn unrestricted() -> Self {
        Self { category: None }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none()
    }
}

impl From<&str> for WriteOptions {
    fn from(category: &str) -> Self {
        Self::for_category(category)
    }
}

impl From<String> for WriteOptions {
    fn from(category: String) -> Self {
        Self::for_category(category)
    }
}
