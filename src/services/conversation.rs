//! Conversation history panel: seeded chats with search and status filter.

use serde::{Deserialize, Serialize};

use crate::display::{Presentable, Presentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Resolved,
    Pending,
}

/// Status filter from the panel's select box; `all` passes everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Resolved,
    Pending,
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: ConversationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == ConversationStatus::Active,
            Self::Resolved => status == ConversationStatus::Resolved,
            Self::Pending => status == ConversationStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: String,
    pub user: String,
    pub phone: String,
    pub messages: u32,
    pub last_message: String,
    pub status: ConversationStatus,
    pub timestamp: String,
    /// 1–5 rating, only for rated chats.
    pub satisfaction: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversationStats {
    pub total: usize,
    pub resolved: usize,
    pub pending: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationRow {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationsView {
    /// Counts over the unfiltered list.
    pub stats: ConversationStats,
    pub conversations: Vec<ConversationRow>,
}

/// Case-insensitive match on user and last message, raw substring on phone.
#[must_use]
pub fn matches_search(conversation: &Conversation, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    conversation.user.to_lowercase().contains(&needle)
        || conversation.phone.contains(search)
        || conversation.last_message.to_lowercase().contains(&needle)
}

#[must_use]
pub fn stats(conversations: &[Conversation]) -> ConversationStats {
    conversations.iter().fold(
        ConversationStats { total: conversations.len(), ..ConversationStats::default() },
        |mut acc, c| {
            match c.status {
                ConversationStatus::Resolved => acc.resolved += 1,
                ConversationStatus::Pending => acc.pending += 1,
                ConversationStatus::Active => acc.active += 1,
            }
            acc
        },
    )
}

#[must_use]
pub fn view(conversations: &[Conversation], search: &str, filter: StatusFilter) -> ConversationsView {
    let rows = conversations
        .iter()
        .filter(|c| filter.matches(c.status) && matches_search(c, search))
        .map(|c| ConversationRow { conversation: c.clone(), presentation: c.status.presentation() })
        .collect();
    ConversationsView { stats: stats(conversations), conversations: rows }
}

#[must_use]
pub fn seed_conversations() -> Vec<Conversation> {
    let row = |id: &str,
               user: &str,
               phone: &str,
               messages: u32,
               last: &str,
               status: ConversationStatus,
               ts: &str,
               satisfaction: Option<u8>| Conversation {
        id: id.to_owned(),
        user: user.to_owned(),
        phone: phone.to_owned(),
        messages,
        last_message: last.to_owned(),
        status,
        timestamp: ts.to_owned(),
        satisfaction,
    };
    vec![
        row("1", "João Silva", "+55 11 99999-1234", 12, "Thanks for the help with the product!", ConversationStatus::Resolved, "2024-01-10 14:30", Some(5)),
        row("2", "Maria Santos", "+55 11 98888-5678", 5, "I still have questions about the warranty", ConversationStatus::Pending, "2024-01-10 13:45", None),
        row("3", "Carlos Oliveira", "+55 11 97777-9012", 8, "Perfect, problem solved!", ConversationStatus::Resolved, "2024-01-10 11:20", Some(4)),
        row("4", "Ana Costa", "+55 11 96666-3456", 3, "How do I cancel?", ConversationStatus::Active, "2024-01-10 09:15", None),
    ]
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
