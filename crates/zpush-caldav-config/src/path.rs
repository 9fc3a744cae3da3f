//! Calendar collection path template.

use std::fmt;

/// Placeholder replaced by the username.
pub const USERNAME_PLACEHOLDER: &str = "%u";

/// URL path of a user's calendar collection, e.g. `/caldav/calendars/%u/`.
///
/// Always absolute and always carries exactly one [`USERNAME_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Validates and wraps a template.
    pub fn parse(template: &str) -> Result<Self, String> {
        if !template.starts_with('/') {
            return Err(format!("{:?} must start with '/'", template));
        }
        if template.contains(['?', '#']) {
            return Err(format!(
                "{:?} must be a plain path without query or fragment",
                template
            ));
        }
        match template.matches(USERNAME_PLACEHOLDER).count() {
            1 => Ok(Self(template.to_string())),
            0 => Err(format!(
                "{:?} has no {} placeholder",
                template, USERNAME_PLACEHOLDER
            )),
            n => Err(format!(
                "{:?} has {} {} placeholders, expected one",
                template, n, USERNAME_PLACEHOLDER
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes the placeholder with the percent-encoded username.
    pub fn expand(&self, username: &str) -> String {
        self.0
            .replacen(USERNAME_PLACEHOLDER, &urlencoding::encode(username), 1)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_single_placeholder() {
        let template = PathTemplate::parse("/caldav/calendars/%u/").unwrap();
        assert_eq!(template.expand("alice"), "/caldav/calendars/alice/");
        assert_eq!(template.as_str(), "/caldav/calendars/%u/");
    }

    #[test]
    fn encodes_username() {
        let template = PathTemplate::parse("/caldav/calendars/%u/").unwrap();
        assert_eq!(
            template.expand("alice@example.com"),
            "/caldav/calendars/alice%40example.com/"
        );
        assert_eq!(template.expand("a/b"), "/caldav/calendars/a%2Fb/");
    }

    #[test]
    fn placeholder_count_must_be_one() {
        assert!(PathTemplate::parse("/caldav/calendars/").is_err());
        let err = PathTemplate::parse("/%u/%u/").unwrap_err();
        assert!(err.contains("2 %u placeholders"), "{err}");
    }

    #[test]
    fn rejects_query_and_fragment() {
        assert!(PathTemplate::parse("/caldav/%u/?x=1").is_err());
        assert!(PathTemplate::parse("/caldav/%u/#cal").is_err());
    }

    #[test]
    fn must_be_absolute() {
        assert!(PathTemplate::parse("caldav/%u/").is_err());
        assert!(PathTemplate::parse("").is_err());
    }
}
