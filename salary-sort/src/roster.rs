use std::{
    collections::VecDeque,
    fmt::Display,
    io::{self, BufRead, Write},
};

use anyhow::{anyhow, Context};
use itertools::Itertools;
use log::debug;

use crate::employee::Employee;

/// Reads employee records as whitespace separated tokens, a name followed by
/// a salary, optionally prompting for each field the way an interactive
/// terminal session expects.
pub struct RecordSource<R, W> {
    reader: R,
    prompt: Option<W>,
    pending: VecDeque<String>,
}

impl<R: BufRead> RecordSource<R, io::Sink> {
    pub fn new(reader: R) -> Self {
        RecordSource {
            reader,
            prompt: None,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead, W: Write> RecordSource<R, W> {
    pub fn with_prompts(reader: R, prompt: W) -> Self {
        RecordSource {
            reader,
            prompt: Some(prompt),
            pending: VecDeque::new(),
        }
    }

    /// Reads exactly `count` employees. Anything left in the input after that
    /// is not consumed.
    pub fn read_employees(&mut self, count: usize) -> anyhow::Result<Vec<Employee>> {
        let employees = (1..=count)
            .map(|position| self.read_employee(position))
            .collect::<anyhow::Result<Vec<_>>>()?;
        debug!("read {} employee records", employees.len());
        Ok(employees)
    }

    fn read_employee(&mut self, position: usize) -> anyhow::Result<Employee> {
        self.prompt("Name: ")?;
        let name = self
            .next_token()?
            .ok_or_else(|| anyhow!("Input ended before the name of employee {position}"))?;

        self.prompt("Salary: ")?;
        let salary = self
            .next_token()?
            .ok_or_else(|| anyhow!("Input ended before the salary of employee {position}"))?;
        let salary = salary
            .parse::<i32>()
            .with_context(|| format!("Invalid salary {salary:?} for employee {position}"))?;
        self.prompt("\n")?;

        Employee::new(name, salary).with_context(|| format!("Invalid employee {position}"))
    }

    fn next_token(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .context("Failed to read employee records")?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<()> {
        if let Some(out) = self.prompt.as_mut() {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Renders records as `a, b, c` with no trailing separator.
pub fn format_list<T: Display>(records: &[T]) -> String {
    records.iter().join(", ")
}

/// Writes `label` followed by the formatted list and a newline.
///
/// A closed pipe on the other end is not an error, the reader just stopped
/// listening.
pub fn write_list<T: Display>(
    out: &mut impl Write,
    label: &str,
    records: &[T],
) -> anyhow::Result<()> {
    let line = format!("{label}{}\n", format_list(records));
    if let Err(err) = out.write_all(line.as_bytes()).and_then(|_| out.flush()) {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err).context("Failed to write employee list");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use rstest::rstest;

    use super::{format_list, write_list, RecordSource};
    use crate::employee::Employee;

    fn employee(name: &str, salary: i32) -> Employee {
        Employee::new(name, salary).unwrap()
    }

    #[test]
    fn test_reads_tokens_across_lines() {
        let input = Cursor::new("alice\n100 bob\n\n   200\ncarol 300 extra 1\n");
        let mut source = RecordSource::new(input);

        let employees = source.read_employees(3).unwrap();

        assert_eq!(
            employees,
            vec![
                employee("alice", 100),
                employee("bob", 200),
                employee("carol", 300)
            ]
        );
    }

    #[test]
    fn test_reading_zero_records_consumes_nothing() {
        let mut source = RecordSource::new(Cursor::new(""));
        assert!(source.read_employees(0).unwrap().is_empty());
    }

    #[test]
    fn test_prompts_for_every_field() {
        let input = Cursor::new("alice 100\nbob 200\n");
        let mut prompts = Vec::new();

        let employees = RecordSource::with_prompts(input, &mut prompts)
            .read_employees(2)
            .unwrap();

        assert_eq!(employees.len(), 2);
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "Name: Salary: \nName: Salary: \n"
        );
    }

    #[rstest]
    #[case("alice 100\n", "Input ended before the name of employee 2")]
    #[case("alice 100 bob", "Input ended before the salary of employee 2")]
    #[case("alice 100 bob lots", "Invalid salary \"lots\" for employee 2")]
    #[case("alice 3000000000 bob 1", "Invalid salary \"3000000000\" for employee 1")]
    #[case("alice 100 abcdefghijklmnopqrstuvwxyz0123456 1", "Invalid employee 2")]
    fn test_malformed_input(#[case] input: &str, #[case] expected_error: &str) {
        let mut source = RecordSource::new(Cursor::new(input.to_string()));
        let err = source.read_employees(2).unwrap_err();
        assert_eq!(err.to_string(), expected_error);
    }

    #[rstest]
    #[case(vec![], "")]
    #[case(vec![employee("a", 1)], "[id=a sal=1]")]
    #[case(
        vec![employee("a", 1), employee("b", -2), employee("c", 3)],
        "[id=a sal=1], [id=b sal=-2], [id=c sal=3]"
    )]
    fn test_format_list(#[case] records: Vec<Employee>, #[case] expected: &str) {
        assert_eq!(format_list(&records), expected);
    }

    #[test]
    fn test_write_list() {
        let mut out = Vec::new();
        write_list(&mut out, "Before: ", &[employee("a", 1), employee("b", 2)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Before: [id=a sal=1], [id=b sal=2]\n"
        );
    }

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_list_ignores_broken_pipe() {
        let mut out = FailingWriter(io::ErrorKind::BrokenPipe);
        assert!(write_list(&mut out, "After: ", &[employee("a", 1)]).is_ok());
    }

    #[test]
    fn test_write_list_reports_other_errors() {
        let mut out = FailingWriter(io::ErrorKind::PermissionDenied);
        assert!(write_list(&mut out, "After: ", &[employee("a", 1)]).is_err());
    }
}
