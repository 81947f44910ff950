//! Output templates for renamed files.
//!
//! A template is literal text with `{Placeholder}` references to [`Release`] fields and
//! `[ ... ]` conditional segments. A segment is rendered only when every placeholder
//! inside it is active (see [`Template::render`]). Double a brace or bracket to emit it
//! literally: `{{`, `}}`, `[[`, `]]`.
//!
//! ```text
//! {Title}[ ({Year})] - {Episode}[ - {EpisodeTitle}][ ({Scene})]
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;

use super::types::{Field, Mode, Release};

pub const SERIES_TEMPLATE: &str = "{Title}[ ({Year})] - {Episode}[ - {EpisodeTitle}][ ({Scene})]";
pub const FILM_TEMPLATE: &str = "{Title} ({Year})[ ({Scene})]";

/// Pick the template for `mode`. A configured template wins unless it is absent or blank.
pub fn template_for(mode: Mode, configured: Option<&str>) -> &str {
    match configured {
        Some(t) if !t.trim().is_empty() => t,
        _ => match mode {
            Mode::Series => SERIES_TEMPLATE,
            Mode::Film => FILM_TEMPLATE,
        },
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{name}}}' at offset {position}")]
    UnknownPlaceholder { name: String, position: usize },

    #[error("empty placeholder at offset {position}")]
    EmptyPlaceholder { position: usize },

    #[error("unclosed placeholder starting at offset {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("unclosed conditional segment starting at offset {position}")]
    UnclosedSegment { position: usize },

    #[error("nested conditional segment at offset {position}")]
    NestedSegment { position: usize },

    #[error("unexpected '{ch}' at offset {position} (write '{ch}{ch}' for a literal)")]
    UnexpectedClose { ch: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Value(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Piece(Piece),
    Segment(Vec<Piece>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut nodes = Vec::new();
        // (start offset, pieces) of the segment being read
        let mut segment: Option<(usize, Vec<Piece>)> = None;
        let mut chars = source.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            let piece = match ch {
                '{' if next_is(&mut chars, '{') => Piece::Text("{".to_string()),
                '}' if next_is(&mut chars, '}') => Piece::Text("}".to_string()),
                '[' if next_is(&mut chars, '[') => Piece::Text("[".to_string()),
                ']' if next_is(&mut chars, ']') => Piece::Text("]".to_string()),
                '{' => Piece::Value(read_placeholder(&mut chars, pos)?),
                '[' => {
                    if segment.is_some() {
                        return Err(TemplateError::NestedSegment { position: pos });
                    }
                    segment = Some((pos, Vec::new()));
                    continue;
                }
                ']' => match segment.take() {
                    Some((_, pieces)) => {
                        nodes.push(Node::Segment(pieces));
                        continue;
                    }
                    None => return Err(TemplateError::UnexpectedClose { ch, position: pos }),
                },
                '}' => return Err(TemplateError::UnexpectedClose { ch, position: pos }),
                other => Piece::Text(other.to_string()),
            };

            match segment.as_mut() {
                Some((_, pieces)) => push_piece(pieces, piece),
                None => push_node(&mut nodes, piece),
            }
        }

        if let Some((position, _)) = segment {
            return Err(TemplateError::UnclosedSegment { position });
        }

        Ok(Self {
            source: source.to_string(),
            nodes,
        })
    }

    /// Render `release`.
    ///
    /// Placeholders outside segments always render their value, even when empty. A
    /// segment renders only if all of its placeholders are active:
    /// - `Scene` needs the scene option and a non-empty value;
    /// - `Year` needs a non-empty value, and in series mode the series-year option;
    /// - any other field needs a non-empty value.
    pub fn render(&self, release: &Release, mode: Mode) -> String {
        let mut out = String::with_capacity(self.source.len() + 32);

        for node in &self.nodes {
            match node {
                Node::Piece(piece) => render_piece(&mut out, piece, release),
                Node::Segment(pieces) => {
                    let active = pieces.iter().all(|p| match p {
                        Piece::Text(_) => true,
                        Piece::Value(field) => is_active(*field, release, mode),
                    });
                    if active {
                        for piece in pieces {
                            render_piece(&mut out, piece, release);
                        }
                    }
                }
            }
        }

        out
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn next_is(chars: &mut Peekable<CharIndices<'_>>, expected: char) -> bool {
    chars.next_if(|&(_, c)| c == expected).is_some()
}

fn read_placeholder(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<Field, TemplateError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '}')) => break,
            Some((_, '{' | '[' | ']')) | None => {
                return Err(TemplateError::UnclosedPlaceholder { position: start })
            }
            Some((_, c)) => name.push(c),
        }
    }

    if name.trim().is_empty() {
        return Err(TemplateError::EmptyPlaceholder { position: start });
    }
    Field::from_placeholder(&name).ok_or(TemplateError::UnknownPlaceholder {
        name: name.trim().to_string(),
        position: start,
    })
}

fn push_piece(pieces: &mut Vec<Piece>, piece: Piece) {
    // merge adjacent text so rendering walks fewer pieces
    if let (Some(Piece::Text(prev)), Piece::Text(next)) = (pieces.last_mut(), &piece) {
        prev.push_str(next);
        return;
    }
    pieces.push(piece);
}

fn push_node(nodes: &mut Vec<Node>, piece: Piece) {
    if let (Some(Node::Piece(Piece::Text(prev))), Piece::Text(next)) = (nodes.last_mut(), &piece) {
        prev.push_str(next);
        return;
    }
    nodes.push(Node::Piece(piece));
}

fn render_piece(out: &mut String, piece: &Piece, release: &Release) {
    match piece {
        Piece::Text(text) => out.push_str(text),
        Piece::Value(field) => out.push_str(release.field(*field)),
    }
}

fn is_active(field: Field, release: &Release, mode: Mode) -> bool {
    let present = !release.field(field).is_empty();
    match field {
        Field::Scene => present && release.options.scene,
        Field::Year if mode == Mode::Series => present && release.options.series_year,
        _ => present,
    }
}
