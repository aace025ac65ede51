use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context};

use crate::heap::SortKey;

/// Longest name an employee record can hold, in bytes.
pub const MAX_NAME_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    name: String,
    salary: i32,
}

impl Employee {
    pub fn new(name: impl Into<String>, salary: i32) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            bail!("Employee name cannot be empty");
        }
        if name.chars().any(char::is_whitespace) {
            bail!("Employee name cannot contain whitespace: {:?}", name);
        }
        if name.len() > MAX_NAME_LEN {
            bail!(
                "Employee name is {} bytes long, at most {MAX_NAME_LEN} are allowed: {}",
                name.len(),
                name
            );
        }
        Ok(Employee { name, salary })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> i32 {
        self.salary
    }
}

impl SortKey for Employee {
    type Key = i32;

    fn sort_key(&self) -> i32 {
        self.salary
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[id={} sal={}]", self.name, self.salary)
    }
}

impl FromStr for Employee {
    type Err = anyhow::Error;

    /// Parses `"<name> <salary>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or(anyhow!("Expected a name"))?;
        let salary = parts
            .next()
            .ok_or(anyhow!("Expected a salary for {name}"))?
            .parse::<i32>()
            .with_context(|| format!("Failed to parse salary for {name}"))?;
        if let Some(extra) = parts.next() {
            bail!("Unexpected trailing input after salary: {extra}");
        }
        Employee::new(name, salary)
    }
}
