//! Building blocks shared by the per-dump grammars.
//!
//! Multi-line dumps (players, squads) are parsed by a [`RecordGrammar`]: an
//! anchor pattern opens a record and an ordered table of field rules fills
//! it in. Single-line dumps (flags, vehicles) go through [`parse_each_line`].

use std::str::FromStr;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::Location;
use crate::tokenizer::tokenize;

/// Compile one of the fixed dump patterns
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid dump pattern {pattern:?}: {e}"))
}

/// Text of capture group `index`, or an empty string if it did not take part
pub(crate) fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Parse an integer field, falling back to zero on overflow or garbage
pub fn int_or_zero<T: FromStr + Default>(value: &str) -> T {
    value.trim().parse().unwrap_or_default()
}

/// Parse a float field, falling back to zero for garbage and non-finite values
pub fn float_or_zero(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

static LABELLED_LOCATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^\(?\s*X\s*=\s*([^\s,]+)[\s,]+Y\s*=\s*([^\s,]+)[\s,]+Z\s*=\s*([^\s,)]+)\s*\)?$")
});

static BARE_LOCATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"^\(?\s*([-+0-9.eE]+)\s*[,\s]\s*([-+0-9.eE]+)\s*[,\s]\s*([-+0-9.eE]+)\s*\)?$")
});

/// Read a location clause in either of the shapes servers print.
///
/// Accepts `X=1 Y=2 Z=3` (commas and parentheses tolerated) and a bare
/// `1, 2, 3` triple. Returns `None` when the clause is neither.
pub fn parse_location(clause: &str) -> Option<Location> {
    let clause = clause.trim();
    let caps = LABELLED_LOCATION
        .captures(clause)
        .or_else(|| BARE_LOCATION.captures(clause))?;

    Some(Location::new(
        float_or_zero(group(&caps, 1)),
        float_or_zero(group(&caps, 2)),
        float_or_zero(group(&caps, 3)),
    ))
}

/// Updates the open record from a matched field line
pub type FieldSetter<R> = fn(&mut R, &Captures<'_>);

/// One row of a record grammar's field table
pub struct FieldRule<R> {
    pub name: &'static str,
    pub pattern: Regex,
    pub apply: FieldSetter<R>,
}

impl<R> FieldRule<R> {
    pub fn new(name: &'static str, pattern: &str, apply: FieldSetter<R>) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            apply,
        }
    }
}

/// Where a multi-line parser stands between two lines
#[derive(Debug)]
pub enum ParserState<R> {
    /// No anchor seen yet
    Idle,
    /// Fields are being collected into this record
    Accumulating(R),
}

impl<R> ParserState<R> {
    /// Hand back the open record, if any, leaving the parser idle
    fn flush(&mut self) -> Option<R> {
        match std::mem::replace(self, ParserState::Idle) {
            ParserState::Accumulating(record) => Some(record),
            ParserState::Idle => None,
        }
    }
}

/// Anchor plus field table for one multi-line record type
pub struct RecordGrammar<R> {
    pub record: &'static str,
    pub anchor: Regex,
    pub start: fn(&Captures<'_>) -> R,
    pub fields: Vec<FieldRule<R>>,
}

impl<R> RecordGrammar<R> {
    /// Apply the first field rule matching `line`. Returns the rule name.
    pub fn apply_line(&self, record: &mut R, line: &str) -> Option<&'static str> {
        self.fields.iter().find_map(|rule| {
            rule.pattern.captures(line).map(|caps| {
                (rule.apply)(record, &caps);
                rule.name
            })
        })
    }

    /// Run the grammar over a whole dump
    pub fn parse(&self, text: &str) -> Vec<R> {
        let mut records = Vec::new();
        let mut state = ParserState::Idle;

        for line in tokenize(text) {
            if let Some(caps) = self.anchor.captures(line) {
                records.extend(state.flush());
                state = ParserState::Accumulating((self.start)(&caps));
                continue;
            }

            match &mut state {
                ParserState::Idle => trace!("{}: skipping line before first anchor: {}", self.record, line),
                ParserState::Accumulating(record) => match self.apply_line(record, line) {
                    Some(field) => trace!("{}: matched {}", self.record, field),
                    None => trace!("{}: skipping unmatched line: {}", self.record, line),
                },
            }
        }
        records.extend(state.flush());

        debug!("Parsed {} {} records", records.len(), self.record);
        records
    }
}

/// Parse a dump where every record sits on a single line
pub fn parse_each_line<R>(
    record: &str,
    text: &str,
    mut parse_line: impl FnMut(&str) -> Option<R>,
) -> Vec<R> {
    let records: Vec<R> = tokenize(text)
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                trace!("{}: skipping unmatched line: {}", record, line);
            }
            parsed
        })
        .collect();

    debug!("Parsed {} {} records", records.len(), record);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("X=100.5 Y=200.25 Z=10.0", Some((100.5, 200.25, 10.0)); "labelled")]
    #[test_case("(X=-1,Y=2,Z=3)", Some((-1.0, 2.0, 3.0)); "labelled with commas and parens")]
    #[test_case("x=1 y=2 z=3", Some((1.0, 2.0, 3.0)); "lower case labels")]
    #[test_case("X=abc Y=2 Z=3", Some((0.0, 2.0, 3.0)); "bad coordinate defaults")]
    #[test_case("1.5, -2, 3e2", Some((1.5, -2.0, 300.0)); "bare triple")]
    #[test_case("10 20 30", Some((10.0, 20.0, 30.0)); "bare triple with spaces")]
    #[test_case("somewhere near the lake", None; "free text")]
    #[test_case("", None; "empty")]
    fn test_parse_location(clause: &str, expected: Option<(f64, f64, f64)>) {
        let expected = expected.map(|(x, y, z)| Location::new(x, y, z));
        assert_eq!(parse_location(clause), expected);
    }

    #[test]
    fn test_numeric_defaults() {
        assert_eq!(int_or_zero::<u64>("120"), 120);
        assert_eq!(int_or_zero::<u64>("-5"), 0);
        assert_eq!(int_or_zero::<i64>("-5"), -5);
        assert_eq!(int_or_zero::<u32>("99999999999"), 0);
        assert_eq!(int_or_zero::<i64>("lots"), 0);
        assert_eq!(float_or_zero("1.25"), 1.25);
        assert_eq!(float_or_zero("1.2.3"), 0.0);
        assert_eq!(float_or_zero("NaN"), 0.0);
        assert_eq!(float_or_zero("inf"), 0.0);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Entry {
        key: String,
        value: u32,
    }

    fn start_entry(caps: &Captures<'_>) -> Entry {
        Entry {
            key: group(caps, 1).to_string(),
            value: 0,
        }
    }

    fn set_value(entry: &mut Entry, caps: &Captures<'_>) {
        entry.value = int_or_zero(group(caps, 1));
    }

    fn set_double(entry: &mut Entry, caps: &Captures<'_>) {
        entry.value = int_or_zero::<u32>(group(caps, 1)) * 2;
    }

    fn entry_grammar() -> RecordGrammar<Entry> {
        RecordGrammar {
            record: "entry",
            anchor: compile(r"^\[(\w+)\]$"),
            start: start_entry,
            fields: vec![
                FieldRule::new("value", r"^value=(.*)$", set_value),
                FieldRule::new("double", r"^double=(.*)$", set_double),
            ],
        }
    }

    #[test]
    fn test_record_grammar_accumulates_and_flushes() {
        let text = "value=9\n[a]\nvalue=1\nnoise\n[b]\ndouble=4\n[c]";
        let entries = entry_grammar().parse(text);
        assert_eq!(
            entries,
            vec![
                Entry { key: "a".into(), value: 1 },
                Entry { key: "b".into(), value: 8 },
                Entry { key: "c".into(), value: 0 },
            ]
        );
    }

    #[test]
    fn test_record_grammar_first_rule_wins() {
        let grammar = entry_grammar();
        let mut entry = Entry::default();
        assert_eq!(grammar.apply_line(&mut entry, "value=3"), Some("value"));
        assert_eq!(grammar.apply_line(&mut entry, "other=3"), None);
        assert_eq!(entry.value, 3);
    }

    #[test]
    fn test_parse_each_line() {
        let numbers = parse_each_line("number", "1\nx\n\n3", |line| line.parse::<u32>().ok());
        assert_eq!(numbers, vec![1, 3]);
    }
}
