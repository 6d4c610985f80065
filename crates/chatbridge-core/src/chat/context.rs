//! Conversation context assembly.
//!
//! Each stored turn expands to a user message followed by the assistant's
//! reply. The incoming message is appended last. History must already be
//! in chronological order; this module does not sort.

use chatbridge_types::chat::ChatMessage;
use chatbridge_types::llm::Message;

/// Build the ordered message list sent to the completion provider.
pub fn build_conversation(history: &[ChatMessage], new_message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);

    for turn in history {
        messages.push(Message::user(turn.message.clone()));
        messages.push(Message::assistant(turn.reply.clone()));
    }

    messages.push(Message::user(new_message));
    messages
}
