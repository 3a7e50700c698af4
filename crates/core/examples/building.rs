//! Building Statement Example
//!
//! Apportions a representative monthly bill across the fixture building and
//! prints the resulting statement.

use std::io;

use anyhow::Result;

use rateio::{allocation::apportion, fixtures, statement::Statement};

pub fn main() -> Result<()> {
    let roster = fixtures::building();
    let bill = fixtures::sample_bill();

    let allocation = apportion(&roster, &bill);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Statement::new(&roster, &allocation).write_to(&mut handle)?;

    Ok(())
}
