use std::collections::BTreeMap;
use std::io::BufRead;
use std::io::BufWriter;
use std::io::Write;

use itertools::Itertools;
use log::info;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("missing @<type> header line")]
    MissingHeader,

    #[error("invalid section line {0}")]
    InvalidLine(String),

    #[error("only a single section per stream is supported, found {0}")]
    MultipleSections(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single section of the textual exchange format: a typed header, a
/// dictionary from keys to token lists and a body of token rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedSection {
    /// The type tag of the section, e.g. "NFA".
    pub section_type: String,

    /// The key/value lines of the section. Keys the consumer does not
    /// recognize are ignored.
    pub dict: BTreeMap<String, Vec<String>>,

    /// The token rows of the section body.
    pub body: Vec<Vec<String>>,
}

/// Reads a single section in plain text from the given reader.
///
/// # Details
///
/// The first significant line must be the `@<type>` header. Every following
/// line starting with `%` contributes its tokens to the dictionary under the
/// key after the percent sign; repeated keys accumulate. All other lines are
/// whitespace-split into body rows. A `#` starts a comment running to the end
/// of the line, and blank lines are skipped.
pub fn read_section(reader: impl BufRead) -> Result<ParsedSection, SectionError> {
    info!("Reading section...");

    let header_regex = Regex::new(r"^@(\S+)$").expect("Regex compilation should not fail");

    let mut section: Option<ParsedSection> = None;
    for line in reader.lines() {
        let line = line?;
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        match &mut section {
            None => {
                let captures = header_regex
                    .captures(line)
                    .ok_or_else(|| SectionError::MissingHeader)?;
                section = Some(ParsedSection {
                    section_type: captures[1].to_string(),
                    ..ParsedSection::default()
                });
            }
            Some(section) => {
                if let Some(key_line) = line.strip_prefix('%') {
                    let mut tokens = key_line.split_whitespace();
                    let key = tokens.next().ok_or_else(|| SectionError::InvalidLine(line.to_string()))?;

                    section
                        .dict
                        .entry(key.to_string())
                        .or_default()
                        .extend(tokens.map(str::to_string));
                } else if header_regex.is_match(line) {
                    return Err(SectionError::MultipleSections(line.to_string()));
                } else {
                    section.body.push(line.split_whitespace().map(str::to_string).collect());
                }
            }
        }
    }

    section.ok_or(SectionError::MissingHeader)
}

/// Writes the given section in plain text to the given writer. Note that the
/// writer is buffered internally using a `BufWriter`.
pub fn write_section(writer: &mut impl Write, section: &ParsedSection) -> Result<(), SectionError> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "@{}", section.section_type)?;
    for (key, tokens) in &section.dict {
        writeln!(writer, "%{} {}", key, tokens.iter().format(" "))?;
    }

    for row in &section.body {
        writeln!(writer, "{}", row.iter().format(" "))?;
    }

    Ok(())
}
