use super::context::InvocationContext;
use super::pattern::Segment;
use super::registry::{CommandEntry, CommandRegistry, MatchPolicy};
use indexmap::IndexSet;

/// Candidate filtering is always case-insensitive, independent of the match
/// policy: suggestions are forgiving even when matching is strict.
fn is_prefix(partial: &str, candidate: &str) -> bool {
    candidate
        .get(..partial.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(partial))
}

/// Completes the argument position currently being typed.
///
/// `tokens` are the argument tokens with the command name stripped; the last
/// one is the (possibly empty) partial. A pattern contributes only when all
/// earlier segments accept their tokens and the sender would be allowed to
/// run it. Placeholders without a completer contribute nothing.
pub fn complete_entry<S>(
    entry: &CommandEntry<S>,
    tokens: &[&str],
    ctx: &InvocationContext,
    policy: MatchPolicy,
    limit: usize,
) -> Vec<String> {
    let Some(position) = tokens.len().checked_sub(1) else {
        return Vec::new();
    };
    let partial = tokens[position];

    let mut candidates: IndexSet<String> = IndexSet::new();
    for decl in entry.patterns() {
        if decl.pattern().len() < position + 1 {
            continue;
        }
        if !decl.authorized(ctx.sender()) {
            continue;
        }
        if !decl.accepts_prefix(&tokens[..position], ctx, policy) {
            continue;
        }
        match &decl.pattern().segments()[position] {
            Segment::Literal(text) => {
                if is_prefix(partial, text) {
                    candidates.insert(text.clone());
                }
            }
            Segment::Placeholder(name) => {
                if let Some(completer) = decl.completer(name) {
                    for candidate in completer(ctx, partial) {
                        if is_prefix(partial, &candidate) {
                            candidates.insert(candidate);
                        }
                    }
                }
            }
        }
    }
    candidates.into_iter().take(limit).collect()
}

/// Completes the command-name position (token 0): every primary name and
/// alias with a matching prefix, in registration order.
pub fn complete_command_names<S>(
    registry: &CommandRegistry<S>,
    partial: &str,
    limit: usize,
) -> Vec<String> {
    let mut candidates: IndexSet<String> = IndexSet::new();
    for name in registry.names() {
        if is_prefix(partial, name) {
            candidates.insert(name.to_string());
        }
    }
    candidates.into_iter().take(limit).collect()
}
