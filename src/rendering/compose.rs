//! Page composition: one LaTeX document per meeting date

use std::collections::HashSet;

use crate::dates::MeetingDate;
use crate::records::{Category, Record, RecordSet, Section, CATEGORY_ORDER, SECTION_ORDER};
use crate::rendering::template::{escape_latex, PageTemplate, SlotValues};
use crate::rendering::Page;
use crate::sessions::{label_sessions, resolve, SessionLabel};

/// A record matched to a date, with its session label
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub category: Category,
    pub label: SessionLabel,
    pub record: &'a Record,
}

/// Every record held on one date, grouped in page order
#[derive(Debug, Clone)]
pub struct DateGroup<'a> {
    pub date: MeetingDate,
    /// Entries in `CATEGORY_ORDER`, source order within a category
    pub entries: Vec<Entry<'a>>,
}

impl<'a> DateGroup<'a> {
    pub fn collect(records: &'a RecordSet, date: MeetingDate) -> Self {
        let mut entries = Vec::new();
        for (category, list) in records.iter() {
            let indices = resolve(list, &date);
            let labels = label_sessions(list, &indices);
            entries.extend(indices.iter().zip(labels).map(|(&i, label)| Entry {
                category,
                label,
                record: &list[i],
            }));
        }
        Self { date, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of all members, keeping the first occurrence of each name
    pub fn attendees(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for entry in &self.entries {
            for name in &entry.record.members {
                if seen.insert(name.as_str()) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Entries with non-empty text in `section`, in page order
    pub fn blocks(&self, section: Section) -> impl Iterator<Item = &Entry<'a>> + '_ {
        CATEGORY_ORDER.into_iter().flat_map(move |category| {
            self.entries
                .iter()
                .filter(move |e| e.category == category && !e.record.field(section).is_empty())
        })
    }
}

/// Compose the page for `date`.
pub fn compose(records: &RecordSet, date: MeetingDate, template: &PageTemplate) -> Page {
    let group = DateGroup::collect(records, date);
    let attendees = group.attendees();

    let names = attendees.iter().map(|n| escape_latex(n)).collect::<Vec<_>>().join(", ");
    let sections = SECTION_ORDER
        .iter()
        .map(|&s| render_section(&group, s))
        .collect::<Vec<_>>()
        .join("\n");

    let source = template.render(&SlotValues {
        date: &date.display_long(),
        attendees: &names,
        sections: &sections,
    });

    Page {
        date,
        attendees,
        source,
    }
}

fn render_section(group: &DateGroup<'_>, section: Section) -> String {
    let mut out = format!(
        "{{\\Large \\textbf{{{} }}}} \\textcolor{{lineBlue}}\
         {{\\hdashrule[0.5ex]{{{}}}{{0.5mm}}{{2mm 1.5pt}}}}",
        section.heading(),
        section.rule_width()
    );
    for entry in group.blocks(section) {
        out.push('\n');
        out.push_str(&render_block(entry, entry.record.field(section)));
    }
    out
}

fn render_block(entry: &Entry<'_>, text: &str) -> String {
    format!(
        "\\begin{{tcolorbox}}[colback={},colframe=white!,coltext=textGrey] \
         \\textit{{\\textbf{{{} ({}): }}}}{}\\end{{tcolorbox}}",
        entry.category.color(),
        entry.category.label(),
        entry.label,
        escape_latex(text)
    )
}
