/*!
 * Argument Parser
 *
 * Registry of command-line flags and named sub-commands, able to render a
 * help screen. Every parser starts with `-h, --help` registered. Parsing an
 * actual argument vector is not provided.
 */

use std::fmt::Write as _;
use tracing::debug;

use crate::collections::Dict;
use crate::core::{KlError, KlResult};
use crate::memory::{Array, UniquePtr};
use crate::text::Text;

/// One recognised flag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Argument {
    pub short: Option<char>,
    pub long: Text,
    /// Number of values the flag consumes
    pub params: usize,
    pub info: Text,
}

impl Argument {
    pub fn new(short: Option<char>, long: impl Into<Text>, params: usize, info: impl Into<Text>) -> Self {
        Self {
            short,
            long: long.into(),
            params,
            info: info.into(),
        }
    }

    /// Flag column of the help screen, e.g. `-o, --output <VALUE>`
    fn flag_column(&self) -> String {
        let mut column = String::new();
        match self.short {
            Some(c) if self.long.is_empty() => {
                let _ = write!(column, "-{}", c);
            }
            Some(c) => {
                let _ = write!(column, "-{}, --{}", c, self.long);
            }
            None => {
                let _ = write!(column, "    --{}", self.long);
            }
        }
        for _ in 0..self.params {
            column.push_str(" <VALUE>");
        }
        column
    }
}

#[derive(Debug)]
pub struct ArgumentParser {
    prog_name: Text,
    description: Text,
    epilogue: Text,
    arguments: Array<Argument>,
    children: Dict<Text, UniquePtr<ArgumentParser>>,
}

impl ArgumentParser {
    pub fn new(prog_name: impl Into<Text>, description: impl Into<Text>, epilogue: impl Into<Text>) -> Self {
        let mut arguments = Array::new();
        arguments.push(Argument {
            short: Some('h'),
            long: Text::literal("help"),
            params: 0,
            info: Text::literal("This help message"),
        });
        Self {
            prog_name: prog_name.into(),
            description: description.into(),
            epilogue: epilogue.into(),
            arguments,
            children: Dict::new(),
        }
    }

    #[inline]
    pub fn prog_name(&self) -> &Text {
        &self.prog_name
    }

    #[inline]
    pub fn arguments(&self) -> &Array<Argument> {
        &self.arguments
    }

    /// Register a flag; a short or long form already in use is rejected
    pub fn add(&mut self, argument: Argument) -> KlResult<()> {
        for existing in self.arguments.iter() {
            if argument.short.is_some() && argument.short == existing.short {
                let short = argument.short.map(String::from).unwrap_or_default();
                return Err(KlError::duplicate_index(&short));
            }
            if !argument.long.is_empty() && argument.long == existing.long {
                return Err(KlError::duplicate_index(&argument.long.to_string()));
            }
        }
        debug!(prog = %self.prog_name, flag = %argument.long, "argument registered");
        self.arguments.push(argument);
        Ok(())
    }

    /// Register a sub-command named `feature` and return its parser
    ///
    /// The child's program name is `"<parent> <feature>"`.
    pub fn create_subparser(&mut self, feature: impl Into<Text>) -> KlResult<&mut ArgumentParser> {
        let feature = feature.into();
        if self.children.has(&feature) {
            return Err(KlError::duplicate_index(&feature.to_string()));
        }
        let prog = Text::from(format!("{} {}", self.prog_name, feature));
        let child = UniquePtr::new(ArgumentParser::new(prog, Text::new(), Text::new()));
        debug!(prog = %self.prog_name, feature = %feature, "subparser created");
        self.children.add(feature.clone(), child);
        self.children.get_mut(&feature)?.value_mut()
    }

    pub fn subparser(&self, feature: &str) -> KlResult<&ArgumentParser> {
        self.children.get(&Text::from(feature))?.value()
    }

    /// Registered sub-command names, sorted
    pub fn features(&self) -> Array<Text> {
        self.children.keys()
    }

    /// Help screen, one entry per line
    pub fn help(&self) -> Array<Text> {
        let mut lines = Array::new();
        lines.push(Text::from(format!("Usage: {} [OPTIONS]...", self.prog_name)));
        if !self.description.is_empty() {
            lines.push(self.description.clone());
        }

        lines.push(Text::literal("Options:"));
        let columns: Array<String> = self.arguments.iter().map(Argument::flag_column).collect();
        let width = columns.iter().map(String::len).max().unwrap_or(0);
        for (column, argument) in columns.iter().zip(self.arguments.iter()) {
            lines.push(Text::from(format!(
                "  {:<width$}  {}",
                column,
                argument.info,
                width = width
            )));
        }

        if !self.children.is_empty() {
            lines.push(Text::literal("Commands:"));
            for feature in self.children.iter().map(|(feature, _)| feature) {
                lines.push(Text::from(format!("  {}", feature)));
            }
        }

        if !self.epilogue.is_empty() {
            lines.push(self.epilogue.clone());
        }
        lines
    }
}
