//! Prefix-driven command-line argument parser.
//!
//! Each registered group has one or more prefixes (aliases) and a fixed
//! arity. A prefix on the command line consumes exactly that many values.

use super::errors::ArgsError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Argument {
    present: bool,
    arity: usize,
    values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArgumentParser {
    aliases: HashMap<String, usize>,
    arguments: Vec<Argument>,
}

impl ArgumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group reachable through every prefix in `prefixes`.
    pub fn register(&mut self, prefixes: &[&str], arity: usize) -> Result<&mut Self, ArgsError> {
        if let Some(taken) = prefixes.iter().find(|p| self.aliases.contains_key(**p)) {
            return Err(ArgsError::DuplicatePrefix((*taken).to_string()));
        }

        let index = self.arguments.len();
        for prefix in prefixes {
            if self.aliases.insert((*prefix).to_string(), index).is_some() {
                // repeated within the same call
                self.aliases.retain(|_, slot| *slot != index);
                return Err(ArgsError::DuplicatePrefix((*prefix).to_string()));
            }
        }
        self.arguments.push(Argument {
            present: false,
            arity,
            values: Vec::new(),
        });
        Ok(self)
    }

    /// Consumes `tokens` left to right. Repeated prefixes append values.
    pub fn parse<I, S>(&mut self, tokens: I) -> Result<(), ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        while let Some(prefix) = tokens.next() {
            let index = *self
                .aliases
                .get(&prefix)
                .ok_or_else(|| ArgsError::UnknownPrefix(prefix.clone()))?;
            let argument = &mut self.arguments[index];

            for found in 0..argument.arity {
                match tokens.next() {
                    Some(value) => argument.values.push(value),
                    None => {
                        return Err(ArgsError::TooFewValues {
                            prefix,
                            expected: argument.arity,
                            found,
                        })
                    }
                }
            }
            argument.present = true;
        }
        Ok(())
    }

    pub fn is_present(&self, prefix: &str) -> bool {
        self.aliases
            .get(prefix)
            .is_some_and(|&index| self.arguments[index].present)
    }

    pub fn values_for(&self, prefix: &str) -> Result<&[String], ArgsError> {
        match self.aliases.get(prefix) {
            Some(&index) if self.arguments[index].present => Ok(&self.arguments[index].values),
            _ => Err(ArgsError::NotPresent(prefix.to_string())),
        }
    }
}
