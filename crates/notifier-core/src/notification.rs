//! Typed view of notification text.
//!
//! The server puts a `"<kind>": "<text>"` pair inside the `message` field,
//! e.g. `"new_like": "@bob just liked your thread!"`.

use std::fmt;
use std::str::FromStr;

/// What triggered a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Test,
    NewThread,
    NewSubscriber,
    NewLike,
    NewComment,
    NewMention,
    /// A kind this client does not know about.
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Test => "test",
            Self::NewThread => "new_thread",
            Self::NewSubscriber => "new_subscriber",
            Self::NewLike => "new_like",
            Self::NewComment => "new_comment",
            Self::NewMention => "new_mention",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        match s {
            "test" => Self::Test,
            "new_thread" => Self::NewThread,
            "new_subscriber" => Self::NewSubscriber,
            "new_like" => Self::NewLike,
            "new_comment" => Self::NewComment,
            "new_mention" => Self::NewMention,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification split into its kind and human-readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl FromStr for Notification {
    type Err = NotificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or(NotificationParseError::NotQuoted)?;
        let (kind, text) = inner
            .split_once("\": \"")
            .ok_or(NotificationParseError::MissingSeparator)?;
        if kind.is_empty() {
            return Err(NotificationParseError::EmptyKind);
        }

        Ok(Self {
            kind: kind.into(),
            text: text.to_string(),
        })
    }
}

/// Error parsing notification text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationParseError {
    #[error("notification must be a quoted \"kind\": \"text\" pair")]
    NotQuoted,
    #[error("notification is missing the \": \" separator")]
    MissingSeparator,
    #[error("notification kind cannot be empty")]
    EmptyKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kind() {
        let n: Notification = r#""new_like": "@bob just liked your thread!""#.parse().unwrap();
        assert_eq!(n.kind, NotificationKind::NewLike);
        assert_eq!(n.text, "@bob just liked your thread!");
    }

    #[test]
    fn parse_unknown_kind() {
        let n: Notification = r#""badge": "You earned a badge""#.parse().unwrap();
        assert_eq!(n.kind, NotificationKind::Other("badge".into()));
        assert_eq!(n.kind.to_string(), "badge");
    }

    #[test]
    fn text_may_contain_quotes() {
        let n: Notification = r#""test": "it's "fine"""#.parse().unwrap();
        assert_eq!(n.kind, NotificationKind::Test);
        assert_eq!(n.text, r#"it's "fine""#);
    }

    #[test]
    fn plain_text_is_not_a_notification() {
        assert_eq!(
            "hi".parse::<Notification>(),
            Err(NotificationParseError::NotQuoted)
        );
        assert_eq!(
            r#""": "x""#.parse::<Notification>(),
            Err(NotificationParseError::EmptyKind)
        );
        assert_eq!(
            r#""test" "x""#.parse::<Notification>(),
            Err(NotificationParseError::MissingSeparator)
        );
    }
}
