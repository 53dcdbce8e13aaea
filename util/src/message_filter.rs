use std::{collections::HashSet, hash::Hash};

/// Keeps only the latest message per key. Messages without a key are always kept.
///
/// The remaining messages keep their relative order.
pub fn keep_last_per_key<Msg, Key: Eq + Hash>(
    messages: Vec<Msg>,
    mut get_key: impl FnMut(&Msg) -> Option<Key>,
) -> Vec<Msg> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(messages.len());
    for msg in messages.into_iter().rev() {
        match get_key(&msg) {
            Some(key) => {
                if seen.insert(key) {
                    out.push(msg);
                }
            }
            None => out.push(msg),
        }
    }
    out.reverse(); // restore original order
    out
}
