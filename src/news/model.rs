use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Topical tag used to filter top-headline requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    General,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    /// Display order of the category bar.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Science,
        Category::Health,
    ];

    /// Value sent in the `category` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Science => "Science",
            Category::Health => "Health",
        }
    }

    pub fn index(self) -> usize {
        Category::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn next(self) -> Category {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    pub fn previous(self) -> Category {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}' (expected one of general, business, technology, entertainment, sports, science, health)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_rfc3339")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub source: Source,
    #[serde(default, deserialize_with = "nullable")]
    pub authors: Vec<Author>,
}

/// The current page of articles plus the total used for pagination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub articles: Vec<Article>,
    pub total: u64,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Body of a successful news API response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub articles: Vec<Article>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_articles: u64,
}

impl From<ApiResponse> for ResultSet {
    fn from(resp: ApiResponse) -> Self {
        ResultSet {
            articles: resp.articles,
            total: resp.total_articles,
        }
    }
}

/// Body returned alongside a non-success status.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: serde_json::Value,
}

impl ApiErrorBody {
    /// Flatten `errors` (a list of strings or a keyed object) into one line.
    pub fn message(&self) -> Option<String> {
        let parts: Vec<String> = match &self.errors {
            serde_json::Value::Array(items) => items.iter().map(value_text).collect(),
            serde_json::Value::Object(map) => map.values().map(value_text).collect(),
            serde_json::Value::String(s) => vec![s.clone()],
            _ => Vec::new(),
        };
        let joined = parts.join("; ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

fn value_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// `null` and missing both mean "empty" for this API.
fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn lenient_rfc3339<'de, D>(de: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| OffsetDateTime::parse(s.trim(), &Rfc3339).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "totalArticles": 23,
        "articles": [
            {
                "title": "Markets rally",
                "description": "Stocks rose on Tuesday.",
                "content": "ignored",
                "url": "https://example.com/markets",
                "image": "https://example.com/markets.jpg",
                "publishedAt": "2024-03-05T14:30:00Z",
                "source": { "name": "Example Wire", "url": "https://example.com" }
            },
            {
                "title": "No extras",
                "description": null,
                "publishedAt": "yesterday",
                "authors": [{ "name": "Ada Lovelace", "avatar": "https://example.com/a.png" }]
            }
        ]
    }"#;

    #[test]
    fn parses_api_response() {
        let resp: ApiResponse = serde_json::from_str(SAMPLE).unwrap();
        let set = ResultSet::from(resp);
        assert_eq!(set.total, 23);
        assert_eq!(set.articles.len(), 2);

        let first = &set.articles[0];
        assert_eq!(first.source.name, "Example Wire");
        assert!(first.authors.is_empty());
        let ts = first.published_at.unwrap();
        assert_eq!((ts.year(), ts.month() as u8, ts.day()), (2024, 3, 5));

        let second = &set.articles[1];
        assert_eq!(second.description, "");
        assert_eq!(second.published_at, None);
        assert_eq!(second.source, Source::default());
        assert_eq!(second.authors[0].name, "Ada Lovelace");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let resp: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.articles.is_empty());
        assert_eq!(resp.total_articles, 0);

        let resp: ApiResponse =
            serde_json::from_str(r#"{"articles": null, "totalArticles": null}"#).unwrap();
        assert!(ResultSet::from(resp).is_empty());
    }

    #[test]
    fn category_parsing_and_cycling() {
        assert_eq!("Sports".parse::<Category>(), Ok(Category::Sports));
        assert_eq!(" health ".parse::<Category>(), Ok(Category::Health));
        assert!("weather".parse::<Category>().is_err());

        assert_eq!(Category::Health.next(), Category::General);
        assert_eq!(Category::General.previous(), Category::Health);
        assert_eq!(Category::Business.next(), Category::Technology);
    }

    #[test]
    fn error_body_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"errors": ["You did not provide an API key."]}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("You did not provide an API key."));

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"errors": {"q": "The query is invalid."}}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("The query is invalid."));

        assert_eq!(ApiErrorBody::default().message(), None);
    }
}
