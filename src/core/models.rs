use serde::{Deserialize, Deserializer, Serialize};

/// Author of the message being replied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepliedTo {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// One recorded text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i32,
    pub text: String,
    pub from: String,
    pub timestamp: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_replied_to"
    )]
    pub replied_to: Option<RepliedTo>,
}

impl Message {
    #[must_use]
    pub fn new(id: i32, from: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            text: text.into(),
            from: from.into(),
            timestamp,
            replied_to: None,
        }
    }

    #[must_use]
    pub fn replying_to(mut self, first_name: impl Into<String>, username: Option<String>) -> Self {
        self.replied_to = Some(RepliedTo {
            first_name: first_name.into(),
            username,
        });
        self
    }
}

/// Ordered message history for one chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRepliedTo {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

// Older files store `"repliedTo": {}` for messages that are not replies.
fn deserialize_replied_to<'de, D>(deserializer: D) -> Result<Option<RepliedTo>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawRepliedTo>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| {
        r.first_name.map(|first_name| RepliedTo {
            first_name,
            username: r.username,
        })
    }))
}
