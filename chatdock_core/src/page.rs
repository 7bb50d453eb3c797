//! Page-context tags.
//!
//! The tag classifies the portal page the assistant was opened on. It is
//! resolved once per session and sent along with every call so the server
//! can bias its prompt and suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PageContext {
    WinterOpsLog,
    GreenOpsLog,
    MyTickets,
    PropertyInfo,
    #[default]
    #[serde(rename = "default")]
    Default,
}

impl PageContext {
    /// Lookup order matters: the first marker contained in the path wins.
    const MARKERS: [(&'static str, Self); 4] = [
        ("WinterOpsLog", Self::WinterOpsLog),
        ("GreenOpsLog", Self::GreenOpsLog),
        ("MyTickets", Self::MyTickets),
        ("PropertyInfo", Self::PropertyInfo),
    ];

    /// Classify a page path such as `/WinterOpsLog.html`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| path.contains(marker))
            .map_or(Self::Default, |(_, page)| *page)
    }

    /// Wire tag, as sent in `page_context` and `?page=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WinterOpsLog => "WinterOpsLog",
            Self::GreenOpsLog => "GreenOpsLog",
            Self::MyTickets => "MyTickets",
            Self::PropertyInfo => "PropertyInfo",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_pages() {
        assert_eq!(
            PageContext::from_path("/portal/WinterOpsLog.html"),
            PageContext::WinterOpsLog
        );
        assert_eq!(
            PageContext::from_path("/GreenOpsLog"),
            PageContext::GreenOpsLog
        );
        assert_eq!(
            PageContext::from_path("/MyTickets.html?x=1"),
            PageContext::MyTickets
        );
        assert_eq!(
            PageContext::from_path("/PropertyInfo.html"),
            PageContext::PropertyInfo
        );
    }

    #[test]
    fn unknown_pages_fall_back_to_default() {
        assert_eq!(PageContext::from_path("/"), PageContext::Default);
        assert_eq!(PageContext::from_path("/login.html"), PageContext::Default);
        // Matching is case-sensitive.
        assert_eq!(PageContext::from_path("/mytickets"), PageContext::Default);
    }

    #[test]
    fn serializes_to_wire_tag() {
        let tags: Vec<String> = [PageContext::MyTickets, PageContext::Default]
            .iter()
            .filter_map(|p| serde_json::to_string(p).ok())
            .collect();
        assert_eq!(tags, vec!["\"MyTickets\"", "\"default\""]);
        assert_eq!(PageContext::Default.to_string(), "default");
    }
}
