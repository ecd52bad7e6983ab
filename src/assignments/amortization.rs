#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Monthly payment on a fully amortized loan, rounded to cents.
///
/// `annual_rate_percent` is a percentage, so `5.0` means 5%. A zero rate
/// spreads the principal evenly.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    if months == 0 {
        return round_cents(principal);
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    if r == 0.0 {
        return round_cents(principal / f64::from(months));
    }
    let payment = principal * (r / (1.0 - (1.0 + r).powi(-(months as i32))));
    round_cents(payment)
}

/// Rounds to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A loan whose payment the program is expected to print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanCase {
    /// amount borrowed
    pub principal:   f64,
    /// annual rate in percent
    pub annual_rate: f64,
    /// term in months
    pub months:      u32,
}

impl LoanCase {
    /// Creates a loan case
    pub const fn new(principal: f64, annual_rate: f64, months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            months,
        }
    }

    /// Expected monthly payment, rounded to cents
    pub fn payment(&self) -> f64 {
        monthly_payment(self.principal, self.annual_rate, self.months)
    }
}
