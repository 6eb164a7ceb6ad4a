//! Key namespacing for stores that share one medium.

use std::borrow::Cow;

use consent_core::constants::NAMESPACE_SEPARATOR;

/// Maps caller keys to medium keys.
///
/// Names and keys are percent-encoded, so the separator only ever appears
/// between a namespace and its key. The empty namespace stores keys encoded
/// but unprefixed, and owns exactly the medium keys without a separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    prefix: String,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let prefix = if name.is_empty() {
            String::new()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}", urlencoding::encode(&name))
        };
        Self { name, prefix }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix shared by every medium key in this namespace. Other namespaces'
    /// keys may share it too; filter with [`strip`](Self::strip).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn qualify(&self, key: &str) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(key))
    }

    /// Inverse of `qualify`; `None` for keys outside the namespace.
    pub fn strip(&self, medium_key: &str) -> Option<String> {
        let rest = medium_key.strip_prefix(self.prefix.as_str())?;
        if rest.contains(NAMESPACE_SEPARATOR) {
            return None;
        }
        urlencoding::decode(rest).ok().map(Cow::into_owned)
    }

    pub fn owns(&self, medium_key: &str) -> bool {
        self.strip(medium_key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_namespace_leaves_plain_keys_alone() {
        let ns = Namespace::new("");
        assert_eq!(ns.qualify("cart"), "cart");
        assert_eq!(ns.strip("cart").as_deref(), Some("cart"));
        assert_eq!(ns.strip("checkout:cart"), None);
    }

    #[test]
    fn named_namespace_prefixes_keys() {
        let ns = Namespace::new("checkout");
        assert_eq!(ns.qualify("cart"), "checkout:cart");
        assert_eq!(ns.strip("checkout:cart").as_deref(), Some("cart"));
        assert_eq!(ns.strip("profile:cart"), None);
    }

    #[test]
    fn separator_in_names_and_keys_is_encoded() {
        let a = Namespace::new("a");
        let ab = Namespace::new("a:b");
        assert_eq!(ab.qualify("x"), "a%3Ab:x");
        assert_eq!(a.qualify("b:x"), "a:b%3Ax");
        assert_ne!(a.qualify("b:x"), ab.qualify("x"));

        assert!(!a.owns(&ab.qualify("x")));
        assert_eq!(a.strip(&a.qualify("b:x")).as_deref(), Some("b:x"));
        assert!(!Namespace::new("").owns(&a.qualify("k")));
    }
}
