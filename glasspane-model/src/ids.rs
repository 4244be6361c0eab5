use uuid::Uuid;

/// Identifier of a top-level category, unique across the tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        CategoryId(id.into())
    }

    /// Fresh time-ordered identifier for newly created categories
    pub fn generate() -> Self {
        CategoryId(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        CategoryId(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        CategoryId(id)
    }
}

/// Identifier of a sub-category, unique within its parent category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SubCategoryId(pub String);

impl SubCategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        SubCategoryId(id.into())
    }

    pub fn generate() -> Self {
        SubCategoryId(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SubCategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubCategoryId {
    fn from(id: &str) -> Self {
        SubCategoryId(id.to_string())
    }
}

impl From<String> for SubCategoryId {
    fn from(id: String) -> Self {
        SubCategoryId(id)
    }
}

/// Identifier of a single bookmark entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LinkId(pub String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        LinkId(id.into())
    }

    pub fn generate() -> Self {
        LinkId(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(id: &str) -> Self {
        LinkId(id.to_string())
    }
}

impl From<String> for LinkId {
    fn from(id: String) -> Self {
        LinkId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_and_non_empty() {
        let a = CategoryId::generate();
        let b = CategoryId::generate();
        assert_ne!(a, b);
        assert!(!a.is_empty());
        assert!(!SubCategoryId::generate().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CategoryId::from("c1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1\"");
        let back: LinkId = serde_json::from_str("\"l9\"").unwrap();
        assert_eq!(back, LinkId::from("l9"));
    }
}
