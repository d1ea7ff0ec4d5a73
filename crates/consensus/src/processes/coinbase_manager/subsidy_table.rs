//! Offline generator for [`SUBSIDY_BY_DEFLATIONARY_MONTH`](super::SUBSIDY_BY_DEFLATIONARY_MONTH).
//!
//! Uses floating point and is never called while validating blocks.

/// Subsidy shrinks by this factor every year, applied in monthly steps.
const YEARLY_DEFLATION_FACTOR: f64 = 1.4;
const MONTHS_PER_YEAR: f64 = 12.0;

/// `floor(base_subsidy / 1.4^(month / 12))`.
pub fn deflationary_subsidy_float_calc(base_subsidy: u64, month: u64) -> u64 {
    let subsidy = base_subsidy as f64 / YEARLY_DEFLATION_FACTOR.powf(month as f64 / MONTHS_PER_YEAR);
    subsidy as u64
}

/// Subsidy for every month until it reaches zero, the zero entry included.
pub fn generate_subsidy_table(base_subsidy: u64) -> Vec<u64> {
    let mut table = Vec::new();
    for month in 0.. {
        let subsidy = deflationary_subsidy_float_calc(base_subsidy, month);
        table.push(subsidy);
        if subsidy == 0 {
            break;
        }
    }
    table
}
