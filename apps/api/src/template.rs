//! Substitution engine for admin-editable prompt templates.
//!
//! Three token forms are supported, nothing else:
//!   `{formData:json}`                               the whole record as JSON
//!   `{identifier}`                                  one field value
//!   `{identifier === "lit" ? "then" : "else"}`      exact-match conditional
//!
//! The scanner walks the template once, left to right. Substituted values are
//! appended to the output and never re-scanned, so field values containing
//! token-like text cannot trigger further expansion. Anything that does not
//! match one of the three grammars is inert text and passes through verbatim.

use std::collections::BTreeMap;

/// Reserved sentinel replaced by the serialized form record.
const FORM_DATA_JSON: &str = "formData:json}";

#[derive(Debug, PartialEq)]
enum Token<'t> {
    FormDataJson,
    Variable(&'t str),
    Ternary { ident: &'t str, literal: &'t str, if_true: &'t str, if_false: &'t str },
}

/// Renders `template` against the flat field map.
/// Pure: no I/O, no clock, no hidden state. Never fails; unknown variables
/// and malformed tokens stay in the output unchanged.
pub fn render(template: &str, data: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        match parse_token(candidate) {
            Some((token, len)) => {
                match token {
                    Token::FormDataJson => {
                        // BTreeMap<String, String> always serializes cleanly.
                        out.push_str(
                            &serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()),
                        );
                    }
                    Token::Variable(ident) => match data.get(ident) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&candidate[..len]),
                    },
                    Token::Ternary { ident, literal, if_true, if_false } => {
                        let matches = data.get(ident).map(String::as_str) == Some(literal);
                        out.push_str(if matches { if_true } else { if_false });
                    }
                }
                rest = &candidate[len..];
            }
            None => {
                // Not a token; emit the brace and keep scanning right after it
                // so tokens inside unbalanced braces still resolve.
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Tries the three grammars at a `{`. Returns the token and the byte length
/// of the full match (including both braces), or `None` for inert text.
fn parse_token(candidate: &str) -> Option<(Token<'_>, usize)> {
    let body = &candidate[1..];

    if let Some(rest) = body.strip_prefix(FORM_DATA_JSON) {
        return Some((Token::FormDataJson, candidate.len() - rest.len()));
    }

    let (ident, after_ident) = parse_ident(body)?;

    if let Some(rest) = after_ident.strip_prefix('}') {
        return Some((Token::Variable(ident), candidate.len() - rest.len()));
    }

    let rest = after_ident.trim_start_matches(' ');
    let rest = rest.strip_prefix("===")?;
    let (literal, rest) = parse_string_literal(rest.trim_start_matches(' '))?;
    let rest = rest.trim_start_matches(' ').strip_prefix('?')?;
    let (if_true, rest) = parse_string_literal(rest.trim_start_matches(' '))?;
    let rest = rest.trim_start_matches(' ').strip_prefix(':')?;
    let (if_false, rest) = parse_string_literal(rest.trim_start_matches(' '))?;
    let rest = rest.trim_start_matches(' ').strip_prefix('}')?;

    Some((
        Token::Ternary { ident, literal, if_true, if_false },
        candidate.len() - rest.len(),
    ))
}

/// `[A-Za-z_][A-Za-z0-9_]*`, anchored at the start of `input`.
fn parse_ident(input: &str) -> Option<(&str, &str)> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return None,
    }
    let end = chars
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

/// Double-quoted literal without escape support. The closing quote is the
/// first `"` after the opening one.
fn parse_string_literal(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some((&rest[..end], &rest[end + 1..]))
}

/// One substitutable field, as shown in the admin template editor.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TemplateVariable {
    pub name: &'static str,
    pub description: &'static str,
}

/// Catalog of variables the engine resolves, for the admin editor's
/// insert-chips. `formData:json` is listed alongside the plain fields.
pub const TEMPLATE_VARIABLES: &[TemplateVariable] = &[
    TemplateVariable { name: "time", description: "Uhrzeit der Behandlung (HH:MM)" },
    TemplateVariable {
        name: "goalStatus",
        description: "Zielstatus: \"erreicht\" oder \"nicht-erreicht\"",
    },
    TemplateVariable { name: "compliance", description: "Compliance: \"ja\" oder \"nein\"" },
    TemplateVariable { name: "therapyGoal", description: "Das formulierte Therapieziel" },
    TemplateVariable { name: "hypothesis", description: "Die physiotherapeutische Hypothese" },
    TemplateVariable {
        name: "reason",
        description: "Begründung bei Nicht-Erreichung (nur dann gesetzt)",
    },
    TemplateVariable {
        name: "formData:json",
        description: "Alle Formulardaten als JSON-Objekt",
    },
];
