//! Page template with named `{{slot}}` placeholders
//!
//! The template carries everything presentational: document class, packages,
//! color definitions, page backgrounds and the header box layout. The composer
//! only supplies the three slot values.

use std::path::Path;

use crate::error::{Error, Result};

const BUILTIN: &str = include_str!("../../templates/page.tex");

/// Named placeholder in a page template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Date,
    Attendees,
    Sections,
}

impl Slot {
    const ALL: [Slot; 3] = [Slot::Date, Slot::Attendees, Slot::Sections];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Slot::Date),
            "attendees" => Some(Slot::Attendees),
            "sections" => Some(Slot::Sections),
            _ => None,
        }
    }
}

/// Values substituted into a template
#[derive(Debug, Clone, Copy)]
pub struct SlotValues<'a> {
    pub date: &'a str,
    pub attendees: &'a str,
    pub sections: &'a str,
}

impl<'a> SlotValues<'a> {
    fn get(&self, slot: Slot) -> &'a str {
        match slot {
            Slot::Date => self.date,
            Slot::Attendees => self.attendees,
            Slot::Sections => self.sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A parsed page template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    segments: Vec<Segment>,
}

impl PageTemplate {
    /// The template shipped with the crate
    ///
    /// # Panics
    ///
    /// Panics if `templates/page.tex` loses one of its slots. The asset is
    /// compiled in, so this surfaces in `builtin_template_has_all_slots`
    /// rather than at runtime.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN).expect("built-in page template must contain every slot")
    }

    /// Read and parse a template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse template text.
    ///
    /// `{{name}}` is a slot when `name` is made of ASCII letters and
    /// underscores; any other `{{...}}` is kept verbatim since it is ordinary
    /// LaTeX grouping. Every slot must appear at least once.
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find("{{") {
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                break;
            };
            let name = &after[..close];
            if name.starts_with('{') {
                // `{{{slot}}}`: the outer brace is LaTeX grouping, rescan past it
                literal.push_str(&rest[..open + 1]);
                rest = &rest[open + 1..];
                continue;
            }
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
                literal.push_str(&rest[..open + 2]);
                rest = after;
                continue;
            }
            let slot = Slot::from_name(name).ok_or_else(|| {
                Error::Config(format!("unknown template slot `{{{{{name}}}}}`"))
            })?;
            literal.push_str(&rest[..open]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Slot(slot));
            rest = &after[close + 2..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        for slot in Slot::ALL {
            if !segments.contains(&Segment::Slot(slot)) {
                return Err(Error::Config(format!("template is missing slot {slot:?}")));
            }
        }
        Ok(Self { segments })
    }

    /// Substitute slot values in a single pass; substituted text is never re-scanned.
    pub fn render(&self, values: &SlotValues<'_>) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Slot(slot) => out.push_str(values.get(*slot)),
            }
        }
        out
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Escape characters that are special to LaTeX in free text.
pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
