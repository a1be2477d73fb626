use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{PgServiceError, Result};
use crate::core::models::service_file::{Line, Section, ServiceFile, SettingLine};
use crate::core::models::service_settings::ServiceSettings;
use crate::core::traits::parser::ConfigParser;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<name>.+)\]$").expect("valid section regex"));

/// Parses and serializes libpq service files.
///
/// Supports:
/// - `[service]` section headers
/// - `key=value` settings (spaces around `=` are tolerated on read)
/// - Comment lines starting with `#` or `;`
/// - Blank lines
///
/// Writes always use `key=value` with no spaces around `=`, which is
/// what libpq and other tools expect.
pub struct IniParser;

impl IniParser {
    /// Parse a single line into a `Line` or a section header name.
    fn parse_line(raw: &str, line_number: usize, origin: &Path) -> Result<ParsedLine> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Ok(ParsedLine::Body(Line::Blank));
        }

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            return Ok(ParsedLine::Body(Line::Comment(raw.to_string())));
        }

        if let Some(caps) = SECTION_HEADER.captures(trimmed) {
            return Ok(ParsedLine::Header(caps["name"].to_string()));
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(format_error(
                origin,
                format!("line {line_number}: expected [service] or key=value, got: {trimmed}"),
            ));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(format_error(origin, format!("line {line_number}: empty key")));
        }

        Ok(ParsedLine::Body(Line::Setting(SettingLine {
            key: key.to_string(),
            value: value.trim().to_string(),
            line_number,
        })))
    }
}

enum ParsedLine {
    Header(String),
    Body(Line),
}

fn format_error(origin: &Path, detail: String) -> PgServiceError {
    PgServiceError::FileFormat {
        path: origin.to_path_buf(),
        detail,
    }
}

/// Drop trailing blank lines; the serializer owns section spacing.
fn trimmed_lines(lines: &[Line]) -> &[Line] {
    let end = lines
        .iter()
        .rposition(|l| *l != Line::Blank)
        .map_or(0, |i| i + 1);
    &lines[..end]
}

fn push_line(output: &mut String, line: &Line) {
    match line {
        Line::Setting(setting) => {
            output.push_str(&setting.key);
            output.push('=');
            output.push_str(&setting.value);
        }
        Line::Comment(text) => output.push_str(text),
        Line::Blank => {}
    }
    output.push('\n');
}

/// Reject a setting that would not read back as the same `key=value` line.
pub fn check_setting(key: &str, value: &str) -> Result<()> {
    let reason = if key.trim().is_empty() {
        "key is empty"
    } else if key.trim() != key {
        "key has leading or trailing whitespace"
    } else if key.starts_with(['#', ';', '[']) {
        "key starts with a comment or section marker"
    } else if key.contains('=') {
        "key contains '='"
    } else if key.contains(['\n', '\r']) {
        "key contains a line break"
    } else if value.contains(['\n', '\r']) {
        "value contains a line break"
    } else {
        return Ok(());
    };

    Err(PgServiceError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

/// Check every entry with [`check_setting`], stopping at the first bad one.
pub fn check_settings(settings: &ServiceSettings) -> Result<()> {
    settings
        .iter()
        .try_for_each(|(key, value)| check_setting(key, value))
}

/// Render one service as a standalone block: `[name]` then `key=value` lines.
///
/// The result is a valid single-section service file.
pub fn render_section(name: &str, settings: &ServiceSettings) -> Result<String> {
    check_settings(settings)?;

    let mut output = format!("[{name}]\n");
    for (key, value) in settings.iter() {
        output.push_str(key);
        output.push('=');
        output.push_str(value);
        output.push('\n');
    }
    Ok(output)
}

impl ConfigParser for IniParser {
    fn parse(&self, content: &str, origin: &Path) -> Result<ServiceFile> {
        let mut file = ServiceFile::default();

        for (idx, raw) in content.lines().enumerate() {
            let line_number = idx + 1;

            match IniParser::parse_line(raw, line_number, origin)? {
                ParsedLine::Header(name) => {
                    if file.contains(&name) {
                        return Err(format_error(
                            origin,
                            format!("line {line_number}: section '{name}' already exists"),
                        ));
                    }
                    file.sections.push(Section::new(name));
                }
                ParsedLine::Body(line) => match file.sections.last_mut() {
                    Some(section) => {
                        if let Line::Setting(setting) = &line
                            && let Some(first) = section.settings().find(|s| s.key == setting.key)
                        {
                            return Err(format_error(
                                origin,
                                format!(
                                    "line {line_number}: key '{}' already set in section '{}' on line {}",
                                    setting.key, section.name, first.line_number
                                ),
                            ));
                        }
                        section.lines.push(line);
                    }
                    None => {
                        if let Line::Setting(setting) = &line {
                            return Err(format_error(
                                origin,
                                format!(
                                    "line {line_number}: setting '{}' appears before any [service] header",
                                    setting.key
                                ),
                            ));
                        }
                        file.preamble.push(line);
                    }
                },
            }
        }

        Ok(file)
    }

    fn serialize(&self, file: &ServiceFile) -> String {
        let mut output = String::new();

        for line in trimmed_lines(&file.preamble) {
            push_line(&mut output, line);
        }

        for section in &file.sections {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push('[');
            output.push_str(&section.name);
            output.push_str("]\n");
            for line in trimmed_lines(&section.lines) {
                push_line(&mut output, line);
            }
        }

        output
    }
}
