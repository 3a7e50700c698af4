//! Statement
//!
//! Rendering of an [`Allocation`] for the people who actually pay it: a
//! console table for the building manager and a CSV export consumed by the
//! downstream spreadsheet. Amounts are formatted as BRL.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{allocation::Allocation, occupancy::Roster};

/// Errors that can occur while rendering a statement.
#[derive(Debug, Error)]
pub enum StatementError {
    /// Error writing the rendered statement.
    #[error("failed to write statement: {0}")]
    Io(#[from] io::Error),

    /// An amount does not fit the displayable currency range.
    #[error("amount out of displayable currency range")]
    AmountRange,
}

/// A printable view over one allocation.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    roster: &'a Roster,
    allocation: &'a Allocation,
}

impl<'a> Statement<'a> {
    /// Create a statement over a roster and its allocation.
    #[must_use]
    pub fn new(roster: &'a Roster, allocation: &'a Allocation) -> Self {
        Self { roster, allocation }
    }

    /// Write the statement table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns a [`StatementError`] if an amount cannot be represented as
    /// currency or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), StatementError> {
        let mut builder = Builder::default();

        builder.push_record(["Unit", "Residents", "Share", "Amount"]);

        for (id, occupants) in self.roster.iter() {
            let amount = self.share_for(id);

            builder.push_record([
                id.to_owned(),
                occupants.to_string(),
                format_percent(share_of_total(amount, self.allocation.grand_total)),
                to_brl(amount)?.to_string(),
            ]);
        }

        write_table(&mut out, builder)?;
        self.write_summary(&mut out)?;

        Ok(())
    }

    /// Render the CSV export: `apartamento,moradores,valor`, one row per
    /// unit in id order, amounts with two decimals.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("apartamento,moradores,valor\n");

        for (id, occupants) in self.roster.iter() {
            let mut amount = self.share_for(id);
            amount.rescale(2);

            csv.push_str(&csv_field(id));
            csv.push(',');
            csv.push_str(&occupants.to_string());
            csv.push(',');
            csv.push_str(&amount.to_string());
            csv.push('\n');
        }

        csv
    }

    fn share_for(&self, id: &str) -> Decimal {
        self.allocation
            .shares
            .get(id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), StatementError> {
        let fixed = to_brl(self.allocation.fixed_share_per_unit.round_dp(2))?;
        let rate = to_brl(self.allocation.variable_rate_per_occupant.round_dp(2))?;
        let collected = to_brl(self.allocation.total_collected)?;
        let bill_total = to_brl(self.allocation.grand_total.round_dp(2))?;

        writeln!(out, " Fixed share per unit:      {fixed}")?;
        writeln!(out, " Variable rate / resident:  {rate}")?;
        writeln!(out, " Collected:                 {collected}")?;
        writeln!(out, " \x1b[1mBill total:                {bill_total}\x1b[0m")?;
        writeln!(out, " Residents:                 {}", self.allocation.total_occupants)?;

        Ok(())
    }
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), StatementError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

/// Convert a currency-rounded amount to BRL for display.
fn to_brl(amount: Decimal) -> Result<Money<'static, iso::Currency>, StatementError> {
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(StatementError::AmountRange)?;

    Ok(Money::from_minor(minor, iso::BRL))
}

/// Fraction of the grand total carried by one unit's amount.
fn share_of_total(amount: Decimal, grand_total: Decimal) -> Percentage {
    if grand_total.is_zero() {
        return Percentage::from(0.0);
    }

    Percentage::from(amount / grand_total)
}

/// Converts a fractional percentage to percent points for display.
fn format_percent(percentage: Percentage) -> String {
    let mut points = (percentage * Decimal::ONE_HUNDRED).round_dp(2);
    points.rescale(2);

    format!("{points}%")
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
