use std::collections::VecDeque;

/// Lazily take the tab-indented entries that follow a section label.
///
/// Each item is trimmed. Iteration stops, without consuming it, at the first
/// entry that does not start with a tab.
pub(crate) fn read_group<'q, 'a>(
    entries: &'q mut VecDeque<&'a str>,
) -> impl Iterator<Item = &'a str> + 'q
where
    'a: 'q,
{
    std::iter::from_fn(move || {
        if entries.front()?.starts_with('\t') {
            entries.pop_front().map(str::trim)
        } else {
            None
        }
    })
}
