//! Numbered-slot template rendering for catalog messages.
//!
//! Catalog templates use composite-format slots:
//!
//! - `{0}` substitutes the first argument
//! - `{0,12}` right-aligns the argument in a 12-character field
//! - `{0,-12}` left-aligns it
//! - `{0:G}` carries a format component, ignored because every argument is a string
//! - `{{` and `}}` are literal braces
//!
//! Referencing an argument that was not supplied is an error. Supplying more
//! arguments than the template references is not.
//!
//! # Example
//!
//! ```rust
//! use remote_failure::template;
//!
//! let text = template::render("VM {0} cannot start on host {1}.", &["vm-7", "xs-02"]).unwrap();
//! assert_eq!(text, "VM vm-7 cannot start on host xs-02.");
//!
//! assert!(template::render("{1}", &["only one"]).is_err());
//! ```

use std::fmt;

/// Highest argument index a slot may name.
const MAX_INDEX: usize = 1_000_000;

/// Widest alignment a slot may request.
const MAX_WIDTH: usize = 1_000_000;

/// Reasons a template cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` opens a slot that never closes.
    UnmatchedOpen { offset: usize },
    /// A `}` appears outside a slot without being doubled.
    UnmatchedClose { offset: usize },
    /// The slot index is missing, non-numeric or out of range.
    InvalidIndex { offset: usize },
    /// The alignment component is not a signed integer in range.
    InvalidAlignment { offset: usize },
    /// Unexpected characters follow the index or alignment.
    MalformedSlot { offset: usize },
    /// The slot names an argument that was not supplied.
    MissingArgument { index: usize, supplied: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedOpen { offset } => {
                write!(f, "unclosed slot opened at byte {}", offset)
            }
            Self::UnmatchedClose { offset } => {
                write!(f, "unmatched '}}' at byte {}", offset)
            }
            Self::InvalidIndex { offset } => {
                write!(f, "invalid argument index in slot at byte {}", offset)
            }
            Self::InvalidAlignment { offset } => {
                write!(f, "invalid alignment in slot at byte {}", offset)
            }
            Self::MalformedSlot { offset } => {
                write!(f, "malformed slot at byte {}", offset)
            }
            Self::MissingArgument { index, supplied } => {
                write!(
                    f,
                    "slot references argument {} but only {} supplied",
                    index, supplied
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render `template`, substituting `args` into its numbered slots.
pub fn render<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, TemplateError> {
    let bytes = template.as_bytes();
    let capacity = template.len() + args.iter().map(|a| a.as_ref().len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);

    let mut pos = 0;
    let mut literal_start = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => {
                out.push_str(&template[literal_start..pos]);
                if bytes.get(pos + 1) == Some(&b'{') {
                    out.push('{');
                    pos += 2;
                } else {
                    pos = render_slot(template, pos, args, &mut out)?;
                }
                literal_start = pos;
            }
            b'}' => {
                if bytes.get(pos + 1) != Some(&b'}') {
                    return Err(TemplateError::UnmatchedClose { offset: pos });
                }
                out.push_str(&template[literal_start..pos]);
                out.push('}');
                pos += 2;
                literal_start = pos;
            }
            _ => pos += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}

/// Alignment requested by a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Alignment {
    width: usize,
    left: bool,
}

/// Render the slot opening at `open` and return the offset just past its `}`.
fn render_slot<S: AsRef<str>>(
    template: &str,
    open: usize,
    args: &[S],
    out: &mut String,
) -> Result<usize, TemplateError> {
    let bytes = template.as_bytes();
    let mut pos = open + 1;

    let index = match take_number(template, &mut pos) {
        Some(index) if index < MAX_INDEX => index,
        _ if pos >= bytes.len() => return Err(TemplateError::UnmatchedOpen { offset: open }),
        _ => return Err(TemplateError::InvalidIndex { offset: open }),
    };
    skip_spaces(bytes, &mut pos);

    let mut alignment = None;
    if bytes.get(pos) == Some(&b',') {
        pos += 1;
        skip_spaces(bytes, &mut pos);
        let left = bytes.get(pos) == Some(&b'-');
        if left {
            pos += 1;
        }
        let width = match take_number(template, &mut pos) {
            Some(width) if width < MAX_WIDTH => width,
            _ => return Err(TemplateError::InvalidAlignment { offset: open }),
        };
        alignment = Some(Alignment { width, left });
        skip_spaces(bytes, &mut pos);
    }

    if bytes.get(pos) == Some(&b':') {
        // Strings take no format component; skip to the closing brace.
        pos += 1;
        while let Some(&b) = bytes.get(pos) {
            match b {
                b'}' => break,
                b'{' => return Err(TemplateError::MalformedSlot { offset: open }),
                _ => pos += 1,
            }
        }
    }

    match bytes.get(pos) {
        Some(b'}') => {}
        None => return Err(TemplateError::UnmatchedOpen { offset: open }),
        Some(_) => return Err(TemplateError::MalformedSlot { offset: open }),
    }

    let arg = args
        .get(index)
        .ok_or(TemplateError::MissingArgument {
            index,
            supplied: args.len(),
        })?
        .as_ref();

    push_aligned(out, arg, alignment);
    Ok(pos + 1)
}

fn push_aligned(out: &mut String, arg: &str, alignment: Option<Alignment>) {
    let Some(Alignment { width, left }) = alignment else {
        out.push_str(arg);
        return;
    };

    let padding = width.saturating_sub(arg.chars().count());
    if left {
        out.push_str(arg);
        out.extend(std::iter::repeat_n(' ', padding));
    } else {
        out.extend(std::iter::repeat_n(' ', padding));
        out.push_str(arg);
    }
}

/// Parse a run of ASCII digits at `pos`, advancing past it.
///
/// Returns `None` when no digits are present or the value overflows.
fn take_number(template: &str, pos: &mut usize) -> Option<usize> {
    let bytes = template.as_bytes();
    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    if *pos == start {
        return None;
    }
    template[start..*pos].parse().ok()
}

#[inline]
fn skip_spaces(bytes: &[u8], pos: &mut usize) {
    while bytes.get(*pos) == Some(&b' ') {
        *pos += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        let text = render("{0} then {1}", &["a", "b"]).unwrap();
        assert_eq!(text, "a then b");
    }

    #[test]
    fn slots_may_repeat_and_reorder() {
        let text = render("{1}/{0}/{1}", &["x", "y"]).unwrap();
        assert_eq!(text, "y/x/y");
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let text = render("only {0}", &["one", "two", "three"]).unwrap();
        assert_eq!(text, "only one");
    }

    #[test]
    fn literal_template_without_slots() {
        let args: [&str; 0] = [];
        assert_eq!(render("plain text", &args).unwrap(), "plain text");
        assert_eq!(render("", &args).unwrap(), "");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let text = render("{{{0}}}", &["v"]).unwrap();
        assert_eq!(text, "{v}");
    }

    #[test]
    fn alignment_pads_by_characters() {
        assert_eq!(render("[{0,5}]", &["ab"]).unwrap(), "[   ab]");
        assert_eq!(render("[{0,-5}]", &["ab"]).unwrap(), "[ab   ]");
        assert_eq!(render("[{0,2}]", &["abcd"]).unwrap(), "[abcd]");
        assert_eq!(render("[{0,3}]", &["й"]).unwrap(), "[  й]");
    }

    #[test]
    fn format_component_is_ignored() {
        assert_eq!(render("{0:N2}", &["12"]).unwrap(), "12");
        assert_eq!(render("{0 , -4 :x}|", &["z"]).unwrap(), "z   |");
    }

    #[test]
    fn missing_argument_is_reported() {
        let err = render("{0} {2}", &["a", "b"]).unwrap_err();
        assert_eq!(err, TemplateError::MissingArgument { index: 2, supplied: 2 });
    }

    #[test]
    fn structural_errors() {
        let args = ["a"];
        assert_eq!(
            render("oops {0", &args).unwrap_err(),
            TemplateError::UnmatchedOpen { offset: 5 }
        );
        assert_eq!(
            render("oops {", &args).unwrap_err(),
            TemplateError::UnmatchedOpen { offset: 5 }
        );
        assert_eq!(
            render("a } b", &args).unwrap_err(),
            TemplateError::UnmatchedClose { offset: 2 }
        );
        assert_eq!(
            render("{x}", &args).unwrap_err(),
            TemplateError::InvalidIndex { offset: 0 }
        );
        assert_eq!(
            render("{0,}", &args).unwrap_err(),
            TemplateError::InvalidAlignment { offset: 0 }
        );
        assert_eq!(
            render("{0x}", &args).unwrap_err(),
            TemplateError::MalformedSlot { offset: 0 }
        );
    }

    #[test]
    fn oversized_index_and_width_are_rejected() {
        let args = ["a"];
        assert!(matches!(
            render("{99999999999999999999999}", &args),
            Err(TemplateError::InvalidIndex { .. })
        ));
        assert!(matches!(
            render("{0,5000000}", &args),
            Err(TemplateError::InvalidAlignment { .. })
        ));
    }

    #[test]
    fn multibyte_literals_survive() {
        let text = render("Ошибка: {0} 🔥", &["диск"]).unwrap();
        assert_eq!(text, "Ошибка: диск 🔥");
    }

    #[test]
    fn error_display_is_readable() {
        let err = TemplateError::MissingArgument { index: 3, supplied: 1 };
        assert_eq!(
            err.to_string(),
            "slot references argument 3 but only 1 supplied"
        );
        let err = TemplateError::UnmatchedClose { offset: 4 };
        assert_eq!(err.to_string(), "unmatched '}' at byte 4");
    }
}
