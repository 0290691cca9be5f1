//! Merging failure messages from repeated executions of the same spec.

/// Append every message from `incoming` that `merged` does not already hold.
///
/// Equality is exact text. Messages keep the order in which they were first
/// seen, so a message that recurs on every execution shows up once while
/// messages that vary between executions each show up once.
///
/// Returns the number of messages appended.
pub fn merge_errors(merged: &mut Vec<String>, incoming: &[String]) -> usize {
    let before = merged.len();
    for message in incoming {
        if !merged.contains(message) {
            merged.push(message.clone());
        }
    }
    merged.len() - before
}
