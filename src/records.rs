//! Record store: the four subteam CSV sources loaded into memory
//!
//! Each source is a header row plus data rows with at least the columns
//! `Date`, `Members`, `Focus`, `Summary`, `Challenges/Problems` and
//! `Next Steps`. Rows are parsed with `csv` + `serde`; nothing beyond the
//! date and the members list is interpreted at load time.

use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use crate::dates::MeetingDate;
use crate::error::{Error, Result};

/// Subteam a record was logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Business,
    Build,
    Coding,
    WholeTeam,
}

/// Order in which category blocks appear inside every section
pub const CATEGORY_ORDER: [Category; 4] = [
    Category::Build,
    Category::Coding,
    Category::Business,
    Category::WholeTeam,
];

impl Category {
    /// Source file name inside the data directory
    pub fn file_name(self) -> &'static str {
        match self {
            Category::Business => "business.csv",
            Category::Build => "building.csv",
            Category::Coding => "coding.csv",
            Category::WholeTeam => "wholeTeam.csv",
        }
    }

    /// Label printed in front of a block's text
    pub fn label(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Build => "Building",
            Category::Coding => "Coding",
            Category::WholeTeam => "Entire Team",
        }
    }

    /// Template color used as the block background
    pub fn color(self) -> &'static str {
        match self {
            Category::Business => "businessBlue",
            Category::Build => "buildBlue",
            Category::Coding => "codeBlue",
            Category::WholeTeam => "wholeBlue",
        }
    }
}

/// One of the four free-text fields every record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Focus,
    Summary,
    Challenges,
    NextSteps,
}

/// Order of sections on a page
pub const SECTION_ORDER: [Section; 4] = [
    Section::Focus,
    Section::Summary,
    Section::Challenges,
    Section::NextSteps,
];

impl Section {
    /// CSV column holding this section's text
    pub fn column(self) -> &'static str {
        match self {
            Section::Focus => "Focus",
            Section::Summary => "Summary",
            Section::Challenges => "Challenges/Problems",
            Section::NextSteps => "Next Steps",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Focus => "FOCUS",
            Section::Summary => "SUMMARY",
            Section::Challenges => "CHALLENGES",
            Section::NextSteps => "NEXT STEPS",
        }
    }

    /// Width of the dashed rule that fills the line after the heading
    pub fn rule_width(self) -> &'static str {
        match self {
            Section::Focus => "16.1cm",
            Section::Summary => "15.2cm",
            Section::Challenges => "14.7cm",
            Section::NextSteps => "15cm",
        }
    }
}

const REQUIRED_COLUMNS: [&str; 6] = [
    "Date",
    "Members",
    "Focus",
    "Summary",
    "Challenges/Problems",
    "Next Steps",
];

/// One row of a category source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: MeetingDate,
    /// Raw time-of-day token following the date, e.g. `(morning)`
    pub time: Option<String>,
    pub members: Vec<String>,
    pub focus: String,
    pub summary: String,
    pub challenges: String,
    pub next_steps: String,
}

impl Record {
    pub fn builder(date: MeetingDate) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                date,
                time: None,
                members: Vec::new(),
                focus: String::new(),
                summary: String::new(),
                challenges: String::new(),
                next_steps: String::new(),
            },
        }
    }

    /// Text for the given section (may be empty)
    pub fn field(&self, section: Section) -> &str {
        match section {
            Section::Focus => &self.focus,
            Section::Summary => &self.summary,
            Section::Challenges => &self.challenges,
            Section::NextSteps => &self.next_steps,
        }
    }
}

/// Convenience builder used by tests and benchmarks to assemble records
/// without going through CSV.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn time(mut self, token: &str) -> Self {
        self.record.time = Some(token.to_string());
        self
    }

    pub fn members(mut self, names: &[&str]) -> Self {
        self.record.members = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn text(mut self, section: Section, text: &str) -> Self {
        let slot = match section {
            Section::Focus => &mut self.record.focus,
            Section::Summary => &mut self.record.summary,
            Section::Challenges => &mut self.record.challenges,
            Section::NextSteps => &mut self.record.next_steps,
        };
        *slot = text.to_string();
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// All loaded records, one list per category, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    business: Vec<Record>,
    build: Vec<Record>,
    coding: Vec<Record>,
    whole_team: Vec<Record>,
}

impl RecordSet {
    pub fn get(&self, category: Category) -> &[Record] {
        match category {
            Category::Business => &self.business,
            Category::Build => &self.build,
            Category::Coding => &self.coding,
            Category::WholeTeam => &self.whole_team,
        }
    }

    pub fn push(&mut self, category: Category, record: Record) {
        self.list_mut(category).push(record);
    }

    /// Iterate categories in page order together with their records
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Record])> + '_ {
        CATEGORY_ORDER.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, rs)| rs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<Record> {
        match category {
            Category::Business => &mut self.business,
            Category::Build => &mut self.build,
            Category::Coding => &mut self.coding,
            Category::WholeTeam => &mut self.whole_team,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Members")]
    members: String,
    #[serde(rename = "Focus")]
    focus: String,
    #[serde(rename = "Summary")]
    summary: String,
    #[serde(rename = "Challenges/Problems")]
    challenges: String,
    #[serde(rename = "Next Steps")]
    next_steps: String,
}

/// Load all four category sources from `data_dir`.
///
/// Any failure is fatal: a partially loaded set is never returned.
pub fn load(data_dir: &Path) -> Result<RecordSet> {
    let mut set = RecordSet::default();
    for category in CATEGORY_ORDER {
        let records = load_category(data_dir, category)?;
        log::debug!("loaded {} {:?} records", records.len(), category);
        *set.list_mut(category) = records;
    }
    Ok(set)
}

/// Load a single category source.
pub fn load_category(data_dir: &Path, category: Category) -> Result<Vec<Record>> {
    let path = data_dir.join(category.file_name());
    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingSource { path })
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| Error::malformed(&path, None, format!("unreadable header: {e}")))?
        .clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(Error::malformed(&path, None, format!("missing column `{missing}`")));
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawRow>().enumerate() {
        let row_no = i + 1;
        let raw = row.map_err(|e| Error::malformed(&path, Some(row_no), e.to_string()))?;
        let record =
            parse_row(raw).map_err(|reason| Error::malformed(&path, Some(row_no), reason))?;
        records.push(record);
    }
    Ok(records)
}

fn parse_row(raw: RawRow) -> std::result::Result<Record, String> {
    let (date, time) = split_date_cell(&raw.date);
    Ok(Record {
        date: MeetingDate::parse(date)?,
        time: time.map(str::to_string),
        members: split_members(&raw.members),
        focus: raw.focus,
        summary: raw.summary,
        challenges: raw.challenges,
        next_steps: raw.next_steps,
    })
}

/// Split a `Date` cell into its date portion and optional time token.
fn split_date_cell(cell: &str) -> (&str, Option<&str>) {
    match cell.trim().split_once(' ') {
        Some((date, rest)) => {
            let rest = rest.trim();
            (date, (!rest.is_empty()).then_some(rest))
        }
        None => (cell.trim(), None),
    }
}

fn split_members(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
