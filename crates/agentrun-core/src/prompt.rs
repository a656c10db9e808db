//! Provider prompt construction.

use agentrun_protocols::memory::MemoryEntry;

/// Build the final provider prompt from retained memory and the new input.
///
/// Memory arrives most-recent-first and is rendered chronologically so the
/// conversation reads top to bottom. The history block is omitted entirely
/// when nothing is retained.
pub fn build_prompt(memory: &[MemoryEntry], input: &str) -> String {
    let mut prompt = String::new();

    if !memory.is_empty() {
        prompt.push_str("Conversation history:\n");
        for entry in memory.iter().rev() {
            prompt.push_str("User: ");
            prompt.push_str(&entry.input);
            prompt.push('\n');
            prompt.push_str("Assistant: ");
            prompt.push_str(&entry.output);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(input);
    prompt.push_str("\nAssistant:");
    prompt
}
