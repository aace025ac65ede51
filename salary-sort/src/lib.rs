use std::io::{BufRead, Write};

use log::debug;

pub mod employee;
pub mod heap;
pub mod roster;

use roster::{write_list, RecordSource};

/// Reads `count` employees from `source`, prints them, sorts them by
/// descending salary and prints them again.
pub fn sort_roster<R: BufRead, W: Write>(
    source: &mut RecordSource<R, W>,
    count: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut employees = source.read_employees(count)?;
    write_list(out, "Before: ", &employees)?;

    debug!("sorting {} employees by salary", employees.len());
    heap::sort(&mut employees);

    write_list(out, "After: ", &employees)
}
