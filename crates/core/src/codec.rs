//! Inline object reference codec.
//!
//! Notice messages are stored in an encoded form where each referenced
//! domain object is replaced by a `{kind.model.pk}` token. Rendering decodes
//! the tokens back through a caller-supplied decoder, so the output always
//! reflects the referenced object's *current* state rather than a snapshot
//! taken when the notice was issued.

use std::fmt;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// A domain object that can be embedded in a notice message by reference.
///
/// `kind` is the owning namespace (e.g. `"accounts"`), `model` the concrete
/// type name, `pk` the primary key rendered as its natural string form.
/// `kind` and `model` must not contain `.`, `{` or `}`.
pub trait Referenced {
    fn kind(&self) -> &'static str;
    fn model(&self) -> &'static str;
    fn pk(&self) -> String;
}

/// Encode a single object as a `{kind.model.pk}` token.
pub fn encode_object(obj: &dyn Referenced) -> String {
    format!("{{{}.{}.{}}}", obj.kind(), obj.model(), obj.pk())
}

/// Error type for [`encode_message`] failures.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The template's placeholder count does not match the object count.
    #[error("template has {placeholders} placeholder(s) but {objects} object(s) were given")]
    PlaceholderMismatch { placeholders: usize, objects: usize },

    /// A `%` in the template was not followed by `s` or `%`.
    #[error("unsupported placeholder at byte {position}, expected %s or %%")]
    BadPlaceholder { position: usize },
}

/// Substitute `%s` placeholders in `template` with encoded object tokens,
/// in positional order. `%%` produces a literal `%`.
///
/// Fails if the number of placeholders and objects differ in either
/// direction, or on any other `%`-sequence.
pub fn encode_message(
    template: &str,
    objects: &[&dyn Referenced],
) -> Result<String, EncodeError> {
    let mut out = String::with_capacity(template.len());
    let mut placeholders = 0usize;
    let mut chars = template.char_indices();

    while let Some((position, ch)) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, 's')) => {
                // Keep scanning past a missing object so the final count
                // mismatch reports the template's true placeholder total.
                if let Some(obj) = objects.get(placeholders) {
                    out.push_str(&encode_object(*obj));
                }
                placeholders += 1;
            }
            Some((_, '%')) => out.push('%'),
            _ => return Err(EncodeError::BadPlaceholder { position }),
        }
    }

    if placeholders != objects.len() {
        return Err(EncodeError::PlaceholderMismatch {
            placeholders,
            objects: objects.len(),
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Reference bodies
// ---------------------------------------------------------------------------

/// A parsed reference token body: the `kind.model.pk` between the braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub kind: String,
    pub model: String,
    pub pk: String,
}

/// A reference body did not split into exactly `kind.model.pk`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed object reference '{reference}', expected kind.model.pk")]
pub struct MalformedReference {
    pub reference: String,
}

impl ObjectRef {
    /// Parse a token body (the text between `{` and `}`).
    pub fn parse(body: &str) -> Result<Self, MalformedReference> {
        let mut parts = body.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(model), Some(pk), None) => Ok(Self {
                kind: kind.to_string(),
                model: model.to_string(),
                pk: pk.to_string(),
            }),
            _ => Err(MalformedReference {
                reference: body.to_string(),
            }),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.kind, self.model, self.pk)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Error type for message grammar violations.
///
/// Any of these fails the whole decode; there is no partial result.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A `}` was seen outside a reference field.
    #[error("unmatched '}}' at byte {position}")]
    UnmatchedClose { position: usize },

    /// A `{` was seen inside an already-open reference field.
    #[error("'{{' inside a reference field at byte {position}")]
    NestedOpen { position: usize },

    /// The input ended while a reference field was still open.
    #[error("unterminated reference field opened at byte {position}")]
    UnmatchedOpen { position: usize },
}

/// One span of a parsed message: literal text, or a reference token body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Reference(&'a str),
}

/// Scanner state: outside a field tracking the start of the pending literal,
/// or inside a field tracking the opening brace.
enum State {
    Outside { literal_start: usize },
    Inside { field_start: usize },
}

/// Split a message into literal and reference segments.
///
/// The scanner is a two-state automaton over the input characters. Byte
/// positions in errors refer to the offending character (for
/// [`FormatError::UnmatchedOpen`], the unclosed `{`).
pub fn parse_message(message: &str) -> Result<Vec<Segment<'_>>, FormatError> {
    let mut segments = Vec::new();
    let mut state = State::Outside { literal_start: 0 };

    for (position, ch) in message.char_indices() {
        state = match state {
            State::Outside { literal_start } => match ch {
                '{' => {
                    if literal_start < position {
                        segments.push(Segment::Literal(&message[literal_start..position]));
                    }
                    State::Inside {
                        field_start: position,
                    }
                }
                '}' => return Err(FormatError::UnmatchedClose { position }),
                _ => State::Outside { literal_start },
            },
            State::Inside { field_start } => match ch {
                '{' => return Err(FormatError::NestedOpen { position }),
                '}' => {
                    segments.push(Segment::Reference(&message[field_start + 1..position]));
                    State::Outside {
                        literal_start: position + 1,
                    }
                }
                _ => State::Inside { field_start },
            },
        };
    }

    match state {
        State::Inside { field_start } => Err(FormatError::UnmatchedOpen {
            position: field_start,
        }),
        State::Outside { literal_start } => {
            if literal_start < message.len() {
                segments.push(Segment::Literal(&message[literal_start..]));
            }
            Ok(segments)
        }
    }
}

/// Decode a message by splicing `decoder`'s output in place of each
/// reference token, concatenated with the literal spans in order.
///
/// The decoder receives the token body (braces excluded) and may fail; any
/// decoder or grammar error fails the whole decode.
pub fn decode_message<E, F>(message: &str, mut decoder: F) -> Result<String, E>
where
    E: From<FormatError>,
    F: FnMut(&str) -> Result<String, E>,
{
    let segments = parse_message(message)?;
    let mut out = String::with_capacity(message.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Reference(body) => out.push_str(&decoder(body)?),
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
