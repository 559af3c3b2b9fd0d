//! Asterisk-delimited action spans.
//!
//! Each `*` toggles between plain and action mode. Delimiters belong to the action run, so
//! `a *waves* b` yields `["a ", "*waves*", " b"]` with the middle segment dimmed. An unclosed
//! span runs to the end of the line; lines never share state.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub is_action: bool,
}

impl StyledSegment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_action: false,
        }
    }

    pub fn action(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_action: true,
        }
    }
}

pub fn parse(line: &str) -> Vec<StyledSegment> {
    if !line.contains('*') {
        return vec![StyledSegment::plain(line)];
    }

    let mut segments = Vec::new();
    let mut run = String::new();
    let mut in_action = false;

    for ch in line.chars() {
        if ch != '*' {
            run.push(ch);
            continue;
        }

        if in_action {
            run.push(ch);
            segments.push(StyledSegment::action(std::mem::take(&mut run)));
            in_action = false;
        } else {
            if !run.is_empty() {
                segments.push(StyledSegment::plain(std::mem::take(&mut run)));
            }
            run.push(ch);
            in_action = true;
        }
    }

    if !run.is_empty() {
        segments.push(StyledSegment {
            text: run,
            is_action: in_action,
        });
    }

    segments
}
