use nom::{
    bytes::complete::take_while1, character::complete::char, combinator::all_consuming,
    sequence::delimited, IResult, Parser,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("placeholder name must not be empty")]
    EmptyPlaceholderName,
    #[error("duplicate placeholder '{{{0}}}'")]
    DuplicatePlaceholder(String),
    #[error("malformed pattern token '{0}'")]
    MalformedPattern(String),
}

/// One token of a compiled pattern. Literals match an input token by
/// equality under the active case policy; a placeholder binds one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

impl Segment {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder(_))
    }
}

/// Ranking of patterns of equal length: more literal segments win, then the
/// longer run of leading literals. Declaration order breaks remaining ties
/// at the registry level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub literals: usize,
    pub literal_prefix: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    text: String,
    segments: Vec<Segment>,
    specificity: Specificity,
}

impl CompiledPattern {
    /// The pattern as it was declared, normalized to single spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Names of commands and placeholders: an ASCII letter followed by ASCII
/// letters and digits.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

fn placeholder(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(
        char('{'),
        take_while1(|c: char| c.is_ascii_alphanumeric()),
        char('}'),
    ))
    .parse(input)
}

fn classify_token(token: &str) -> Result<Segment, CompileError> {
    if !token.contains(['{', '}']) {
        return Ok(Segment::Literal(token.to_string()));
    }
    if token == "{}" {
        return Err(CompileError::EmptyPlaceholderName);
    }
    match placeholder(token) {
        Ok((_, name)) if is_valid_name(name) => Ok(Segment::Placeholder(name.to_string())),
        _ => Err(CompileError::MalformedPattern(token.to_string())),
    }
}

/// Compiles a raw pattern string into segments plus a specificity score.
///
/// A blank pattern compiles to the zero-segment pattern, which matches the
/// bare command name with no trailing tokens.
pub fn compile(raw: &str) -> Result<CompiledPattern, CompileError> {
    let mut segments = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for token in raw.split_whitespace() {
        let segment = classify_token(token)?;
        if let Segment::Placeholder(name) = &segment {
            if names.iter().any(|seen| seen == name) {
                return Err(CompileError::DuplicatePlaceholder(name.clone()));
            }
            names.push(name.clone());
        }
        segments.push(segment);
    }

    let literals = segments.iter().filter(|s| !s.is_placeholder()).count();
    let literal_prefix = segments.iter().take_while(|s| !s.is_placeholder()).count();
    let text = segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.clone(),
            Segment::Placeholder(name) => format!("{{{}}}", name),
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(CompiledPattern {
        text,
        segments,
        specificity: Specificity {
            literals,
            literal_prefix,
        },
    })
}
