//! Printing a parsed document.

use std::fmt::Write as _;

use clap::ValueEnum;
use jsonscope::{Document, Value};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single line JSON.
    Compact,
    /// Indented JSON.
    Pretty,
    /// Typed outline of every node.
    Tree,
    /// Node counts as JSON.
    Summary,
}

pub fn render(document: &Document, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Compact => document.to_string(),
        OutputFormat::Pretty => serde_json::to_string_pretty(document)?,
        OutputFormat::Tree => {
            let mut out = String::new();
            write_tree(&mut out, document.root(), 0)?;
            out
        }
        OutputFormat::Summary => serde_json::to_string_pretty(&Summary::of(document))?,
    })
}

fn write_tree(out: &mut String, value: &Value, indent: usize) -> std::fmt::Result {
    let pad = "  ".repeat(indent);
    match value {
        Value::Null => writeln!(out, "{pad}Null"),
        Value::Boolean(b) => writeln!(out, "{pad}Boolean({b})"),
        Value::Number(n) => writeln!(out, "{pad}Number({n})"),
        Value::String(s) => writeln!(out, "{pad}String({s:?})"),
        Value::Array(items) => {
            writeln!(out, "{pad}Array({})", items.len())?;
            items
                .iter()
                .try_for_each(|item| write_tree(out, item, indent + 1))
        }
        Value::Object(members) => {
            writeln!(out, "{pad}Object({})", members.len())?;
            for (key, member) in members {
                writeln!(out, "{pad}  {key:?}:")?;
                write_tree(out, member, indent + 2)?;
            }
            Ok(())
        }
    }
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
struct Counts {
    null: usize,
    boolean: usize,
    number: usize,
    string: usize,
    array: usize,
    object: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    root: &'static str,
    values: usize,
    max_depth: usize,
    counts: Counts,
}

impl Summary {
    fn of(document: &Document) -> Self {
        let mut counts = Counts::default();
        let max_depth = tally(document.root(), 1, &mut counts);
        let values =
            counts.null + counts.boolean + counts.number + counts.string + counts.array + counts.object;
        Summary {
            root: document.root().type_name(),
            values,
            max_depth,
            counts,
        }
    }
}

/// Count every node under `value` and return the deepest composite nesting level reached.
fn tally(value: &Value, depth: usize, counts: &mut Counts) -> usize {
    match value {
        Value::Null => counts.null += 1,
        Value::Boolean(_) => counts.boolean += 1,
        Value::Number(_) => counts.number += 1,
        Value::String(_) => counts.string += 1,
        Value::Array(items) => {
            counts.array += 1;
            return items
                .iter()
                .map(|item| tally(item, depth + 1, counts))
                .fold(depth, usize::max);
        }
        Value::Object(members) => {
            counts.object += 1;
            return members
                .values()
                .map(|member| tally(member, depth + 1, counts))
                .fold(depth, usize::max);
        }
    }
    depth - 1
}
