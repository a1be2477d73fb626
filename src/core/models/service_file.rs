use crate::core::models::service_settings::ServiceSettings;

/// A single `key=value` line inside a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingLine {
    pub key: String,
    pub value: String,
    /// 1-based line in the file it was read from; 0 for settings added in memory.
    pub line_number: usize,
}

/// Represents any line in a service file below a header.
///
/// Keeping comments and blank lines next to the settings lets a
/// rewrite leave untouched sections as they were.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A `key=value` setting.
    Setting(SettingLine),
    /// A comment line (`# ...` or `; ...`), stored verbatim.
    Comment(String),
    /// An empty or whitespace-only line.
    Blank,
}

/// One `[name]` block and the lines that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<Line>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Iterates over only the settings, skipping comments and blanks.
    pub fn settings(&self) -> impl Iterator<Item = &SettingLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::Setting(setting) => Some(setting),
            _ => None,
        })
    }

    /// Replace every setting with `settings`.
    ///
    /// Comments above the first setting and below the last one stay in
    /// place; comments interleaved between settings are dropped.
    pub fn replace_settings(&mut self, settings: &ServiceSettings) {
        let first = self
            .lines
            .iter()
            .position(|l| matches!(l, Line::Setting(_)));
        let last = self
            .lines
            .iter()
            .rposition(|l| matches!(l, Line::Setting(_)));

        let (head, tail) = match (first, last) {
            (Some(first), Some(last)) => (
                self.lines[..first].to_vec(),
                self.lines[last + 1..].to_vec(),
            ),
            _ => {
                let mut head = std::mem::take(&mut self.lines);
                while head.last() == Some(&Line::Blank) {
                    head.pop();
                }
                (head, Vec::new())
            }
        };

        let mut lines = head;
        lines.extend(settings.iter().map(|(key, value)| {
            Line::Setting(SettingLine {
                key: key.to_string(),
                value: value.to_string(),
                line_number: 0,
            })
        }));
        lines.extend(tail);
        self.lines = lines;
    }
}

/// A parsed service file (e.g. `pg_service.conf`).
///
/// Sections keep their file order. Lines above the first header are
/// kept as a preamble so they survive a rewrite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceFile {
    pub preamble: Vec<Line>,
    pub sections: Vec<Section>,
}

impl ServiceFile {
    /// Returns all service names in file order.
    pub fn service_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    /// Returns the settings of `name` as an ordered mapping.
    pub fn settings(&self, name: &str) -> Option<ServiceSettings> {
        self.section(name).map(|section| {
            section
                .settings()
                .map(|s| (s.key.as_str(), s.value.as_str()))
                .collect()
        })
    }

    /// Append an empty section. Returns false if `name` already exists.
    pub fn add_section(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.sections.push(Section::new(name));
        true
    }

    /// Remove a section. Returns false if `name` does not exist.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    /// Replace all settings of `name`. Returns false if `name` does not exist.
    pub fn replace_settings(&mut self, name: &str, settings: &ServiceSettings) -> bool {
        match self.section_mut(name) {
            Some(section) => {
                section.replace_settings(settings);
                true
            }
            None => false,
        }
    }
}
