//! Yes-And prefix rule
//!
//! Every improv reply must open with "yes, and". Batch replies are fixed up
//! in one step with [`ensure_yes_and`]; streamed replies go through
//! [`YesAndGate`], which holds back fragments until it can decide whether the
//! model already supplied the phrase.

/// Phrase every reply opens with
pub const YES_AND: &str = "yes, and";

/// Case-insensitive check for the phrase at the very start of `text`
pub fn starts_with_yes_and(text: &str) -> bool {
    text.get(..YES_AND.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(YES_AND))
}

/// Normalize a complete reply.
///
/// Empty text becomes the bare phrase. Otherwise leading whitespace is
/// trimmed and the phrase is prepended (with one space) unless the text
/// already opens with it.
pub fn ensure_yes_and(text: &str) -> String {
    if text.is_empty() {
        return YES_AND.to_string();
    }
    let stripped = text.trim_start();
    if starts_with_yes_and(stripped) {
        stripped.to_string()
    } else {
        format!("{} {}", YES_AND, stripped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GateState {
    /// Holding fragments until the trimmed buffer is as long as the phrase
    Accumulating(String),
    /// Decision made; fragments flow through untouched
    Passthrough,
}

/// Streaming prefix state machine.
///
/// Feed fragments with [`push`](Self::push) in arrival order and forward
/// whatever it returns. Call [`finish`](Self::finish) once the source ends.
///
/// A source that produced no non-empty fragment yields nothing at all, unlike
/// [`ensure_yes_and`] which turns an empty reply into the bare phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesAndGate {
    state: GateState,
}

impl Default for YesAndGate {
    fn default() -> Self {
        Self::new()
    }
}

impl YesAndGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Accumulating(String::new()),
        }
    }

    /// True once the prefix decision has been emitted
    pub fn is_passthrough(&self) -> bool {
        self.state == GateState::Passthrough
    }

    /// Accept one fragment; returns the fragment to emit, if any.
    pub fn push(&mut self, fragment: &str) -> Option<String> {
        if fragment.is_empty() {
            return None;
        }

        match &mut self.state {
            GateState::Passthrough => Some(fragment.to_string()),
            GateState::Accumulating(buffer) => {
                buffer.push_str(fragment);
                let decided = decide(buffer)?;
                self.state = GateState::Passthrough;
                Some(decided)
            }
        }
    }

    /// End of source. Flushes a buffer shorter than the phrase.
    pub fn finish(self) -> Option<String> {
        match self.state {
            GateState::Accumulating(buffer) if !buffer.is_empty() => Some(ensure_yes_and(&buffer)),
            _ => None,
        }
    }
}

fn decide(buffer: &str) -> Option<String> {
    let candidate = buffer.trim_start();
    if candidate.chars().count() < YES_AND.len() {
        return None;
    }

    if starts_with_yes_and(candidate) {
        Some(buffer.to_string())
    } else {
        Some(format!("{} {}", YES_AND, candidate))
    }
}
