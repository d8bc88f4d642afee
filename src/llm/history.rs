// src/llm/history.rs
// Collapses consecutive same-role turns before anything goes upstream

use super::provider::Message;

/// Merge adjacent messages that share a role, joining content with one space.
///
/// Nothing is dropped: output content is the input content plus one space
/// per merge, and no two adjacent output messages share a role.
pub fn normalize_history(messages: &[Message]) -> Vec<Message> {
    let mut normalized: Vec<Message> = Vec::with_capacity(messages.len());

    for msg in messages {
        match normalized.last_mut() {
            Some(prev) if prev.role == msg.role => {
                prev.content.push(' ');
                prev.content.push_str(&msg.content);
            }
            _ => normalized.push(msg.clone()),
        }
    }

    normalized
}
