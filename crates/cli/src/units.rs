// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Amounts display units.
use clap::ValueEnum;
use std::fmt;

/// The unit used to show bets and pots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DisplayUnit {
    /// Dollars.
    #[default]
    #[value(name = "$", alias = "usd")]
    Dollars,
    /// Big blinds.
    #[value(name = "bb")]
    BigBlinds,
}

/// Converts a dollar amount to big blinds, 0 if the big blind is not positive.
pub fn to_big_blinds(amount: f64, big_blind: f64) -> f64 {
    if big_blind > 0.0 { amount / big_blind } else { 0.0 }
}

/// Converts an amount in big blinds to dollars.
pub fn to_dollars(big_blinds: f64, big_blind: f64) -> f64 {
    big_blinds * big_blind.max(0.0)
}

/// A dollar amount shown in a unit.
#[derive(Debug, Clone, Copy)]
pub struct Amount {
    dollars: f64,
    unit: DisplayUnit,
    big_blind: f64,
}

impl Amount {
    /// Creates an amount, the big blind is ignored for dollars.
    pub fn new(dollars: f64, unit: DisplayUnit, big_blind: f64) -> Self {
        Self {
            dollars,
            unit,
            big_blind,
        }
    }

    /// The display unit.
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    /// The big blind used for conversion.
    pub fn big_blind(&self) -> f64 {
        self.big_blind
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DisplayUnit::Dollars => {
                let cents = (self.dollars.abs() * 100.0).round() as u64;
                let (whole, cents) = (cents / 100, cents % 100);
                let sign = if self.dollars < 0.0 && (whole > 0 || cents > 0) {
                    "-"
                } else {
                    ""
                };

                // Thousands groups, most significant first.
                let mut groups = vec![whole % 1000];
                let mut rest = whole / 1000;
                while rest > 0 {
                    groups.push(rest % 1000);
                    rest /= 1000;
                }

                write!(f, "{sign}${}", groups.pop().unwrap_or(0))?;
                for group in groups.iter().rev() {
                    write!(f, ",{group:03}")?;
                }

                if cents > 0 {
                    write!(f, ".{cents:02}")?;
                }

                Ok(())
            }
            DisplayUnit::BigBlinds => {
                let bbs = to_big_blinds(self.dollars, self.big_blind);
                if bbs.fract() == 0.0 {
                    write!(f, "{bbs:.0} bb")
                } else {
                    write!(f, "{bbs:.1} bb")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_blinds_conversion() {
        assert_eq!(to_big_blinds(50.0, 2.0), 25.0);
        assert_eq!(to_big_blinds(50.0, 0.0), 0.0);
        assert_eq!(to_dollars(25.0, 2.0), 50.0);
        assert_eq!(to_dollars(to_big_blinds(37.5, 0.5), 0.5), 37.5);
    }

    #[test]
    fn dollars_display() {
        let dollars = |v| Amount::new(v, DisplayUnit::Dollars, 0.0).to_string();
        assert_eq!(dollars(0.0), "$0");
        assert_eq!(dollars(50.0), "$50");
        assert_eq!(dollars(12.5), "$12.50");
        assert_eq!(dollars(1_250.0), "$1,250");
        assert_eq!(dollars(2_005_010.25), "$2,005,010.25");
        assert_eq!(dollars(-3.0), "-$3");
        assert_eq!(dollars(1_000_000_000.0), "$1,000,000,000");
        assert_eq!(dollars(12_345_678_901.5), "$12,345,678,901.50");
    }

    #[test]
    fn big_blinds_display() {
        let bbs = |v| Amount::new(v, DisplayUnit::BigBlinds, 2.0).to_string();
        assert_eq!(bbs(50.0), "25 bb");
        assert_eq!(bbs(5.0), "2.5 bb");
        assert_eq!(Amount::new(50.0, DisplayUnit::BigBlinds, 0.0).to_string(), "0 bb");
    }
}
