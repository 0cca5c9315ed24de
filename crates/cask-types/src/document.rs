use serde::{Deserialize, Serialize};

use crate::cas::CasToken;

/// Read view of a stored item at a specific version.
///
/// Two documents are equal when they name the same item at the same version;
/// the value is not compared.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub collection: String,
    pub key: String,
    pub cas: CasToken,
    pub value: T,
}

impl<T> Document<T> {
    /// Convert the value, keeping the item coordinates and version.
    /// Returns `None` if `f` rejects the value.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Option<U>) -> Option<Document<U>> {
        Some(Document {
            value: f(self.value)?,
            collection: self.collection,
            key: self.key,
            cas: self.cas,
        })
    }
}

impl<T> PartialEq for Document<T> {
    fn eq(&self, other: &Self) -> bool {
        self.collection == other.collection && self.key == other.key && self.cas == other.cas
    }
}

impl<T> Eq for Document<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(cas: u64, value: &str) -> Document<String> {
        Document {
            collection: "users".into(),
            key: "u1".into(),
            cas: CasToken::new(cas),
            value: value.into(),
        }
    }

    #[test]
    fn equality_ignores_value() {
        assert_eq!(doc(1, "a"), doc(1, "b"));
        assert_ne!(doc(1, "a"), doc(2, "a"));
    }

    #[test]
    fn try_map_keeps_version() {
        let mapped = doc(5, "17").try_map(|v| v.parse::<u32>().ok()).unwrap();
        assert_eq!(mapped.value, 17);
        assert_eq!(mapped.cas, CasToken::new(5));
        assert_eq!(mapped.key, "u1");
    }

    #[test]
    fn try_map_rejects() {
        assert!(doc(5, "abc").try_map(|v| v.parse::<u32>().ok()).is_none());
    }
}
