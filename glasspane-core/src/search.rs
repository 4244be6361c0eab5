//! Search box dispatch: turning a query into an engine URL

use serde::{Deserialize, Serialize};

/// A search provider addressed by appending the encoded query to a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    pub id: String,
    pub name: String,
    pub url_template: String,
}

impl SearchEngine {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// URL to open for `query`, or `None` when there is nothing to search
    pub fn dispatch_url(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.url_template, urlencoding::encode(query)))
    }
}

/// Engines offered out of the box, the first being the default
pub fn builtin_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine::new("google", "Google", "https://www.google.com/search?q="),
        SearchEngine::new("bing", "Bing", "https://www.bing.com/search?q="),
        SearchEngine::new("duckduckgo", "DuckDuckGo", "https://duckduckgo.com/?q="),
        SearchEngine::new("baidu", "Baidu", "https://www.baidu.com/s?wd="),
    ]
}

/// Ordered engine list with lookup by id
#[derive(Debug, Clone)]
pub struct SearchEngines {
    engines: Vec<SearchEngine>,
}

impl Default for SearchEngines {
    fn default() -> Self {
        Self {
            engines: builtin_engines(),
        }
    }
}

impl SearchEngines {
    pub fn new(engines: Vec<SearchEngine>) -> Self {
        Self { engines }
    }

    pub fn all(&self) -> &[SearchEngine] {
        &self.engines
    }

    pub fn default_engine(&self) -> Option<&SearchEngine> {
        self.engines.first()
    }

    /// Engine with `id`, falling back to the default for `None`
    pub fn resolve(&self, id: Option<&str>) -> Option<&SearchEngine> {
        match id {
            Some(id) => self.engines.iter().find(|engine| engine.id == id),
            None => self.default_engine(),
        }
    }
}
