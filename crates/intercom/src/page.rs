use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Pagination state returned in the `pages` object of a search response.
///
/// Feed it back into [`ConversationsHandler::next_search`] to fetch the page
/// after the one it was taken from.
///
/// [`ConversationsHandler::next_search`]: crate::handlers::ConversationsHandler::next_search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageCursor {
    #[serde(deserialize_with = "number_or_string")]
    pub per_page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NextPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub starting_after: String,
}

impl PageCursor {
    #[must_use]
    pub fn new(per_page: u32, starting_after: impl Into<String>) -> Self {
        Self {
            per_page,
            page: None,
            total_pages: None,
            next: Some(NextPage {
                page: None,
                starting_after: starting_after.into(),
            }),
        }
    }

    /// Extract the cursor from a full search response.
    ///
    /// Returns `None` if the response carries no `pages` object, or if it
    /// cannot be read as a cursor.
    #[must_use]
    pub fn from_response(response: &Value) -> Option<Self> {
        response
            .get("pages")
            .cloned()
            .and_then(|pages| serde_json::from_value(pages).ok())
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        String(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}
