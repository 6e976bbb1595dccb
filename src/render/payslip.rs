//! Fixed-width text payslip layout.
//!
//! The layout mirrors the printed payslip: a centred institution header, a
//! summary block, the deduction table in two columns, then the totals
//! right-aligned. Lines are positioned by the order of the breakdown's
//! fields, never by label text.

use crate::calculation::PLACEHOLDER;
use crate::config::InstitutionMetadata;
use crate::models::{Breakdown, DeductionLine, PayPeriod};

/// Width of a rendered payslip in characters.
pub const PAGE_WIDTH: usize = 78;

/// Width of the left column of the deduction table.
const LEFT_COLUMN: usize = 39;
/// Width of each of the Basic / DA cells in the summary block.
const SUMMARY_CELL: usize = 20;
/// Label padding in the left and right deduction columns.
const LEFT_LABEL: usize = 15;
const RIGHT_LABEL: usize = 17;
/// Minimum width of a deduction value.
const VALUE_WIDTH: usize = 3;

/// Renders one breakdown as a text payslip.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::build_breakdown;
/// use payslip_engine::config::{DeductionCatalog, InstitutionMetadata};
/// use payslip_engine::models::{PayPeriod, RawRow};
/// use payslip_engine::render::render_payslip;
///
/// let row = RawRow::new().with("NAME", "A. Mary").with("GROSS", 10000);
/// let breakdown = build_breakdown(&row, &DeductionCatalog::standard());
/// let text = render_payslip(
///     &breakdown,
///     &PayPeriod::new(5, 2025).unwrap(),
///     &InstitutionMetadata::default(),
/// );
///
/// assert!(text.contains("Payslip for the month of May 2025"));
/// assert!(text.contains("Net Pay: 10,000"));
/// ```
pub fn render_payslip(
    breakdown: &Breakdown,
    period: &PayPeriod,
    institution: &InstitutionMetadata,
) -> String {
    let rule = "-".repeat(PAGE_WIDTH);
    let mut lines = vec![
        centre(&institution.name),
        centre(&format!("{} {}", institution.heading, period)),
        rule.clone(),
        justify(
            &format!("Name: {}", breakdown.name),
            &format!("Pay: {}", breakdown.pay),
        ),
        format!(
            "{:<cell$}{:<cell$}OA: {}",
            format!("Basic: {}", breakdown.basic),
            format!("DA: {}", breakdown.da),
            breakdown.oa,
            cell = SUMMARY_CELL
        ),
    ];

    if breakdown.days != PLACEHOLDER {
        lines.push(format!("{} days salary", breakdown.days));
    }

    lines.extend(breakdown.deductions.chunks(2).map(deduction_row));

    lines.push(right(&format!("Deductions: {}", breakdown.total_deductions)));
    lines.push(right(&format!("Net Pay: {}", breakdown.net_pay)));
    lines.push(rule);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn deduction_row(pair: &[DeductionLine]) -> String {
    let left = format!(
        "{:<lw$} : {:>vw$}",
        pair[0].label,
        pair[0].value,
        lw = LEFT_LABEL,
        vw = VALUE_WIDTH
    );
    match pair.get(1) {
        Some(second) => format!(
            "{:<col$}{:<rw$} : {:>vw$}",
            left,
            second.label,
            second.value,
            col = LEFT_COLUMN,
            rw = RIGHT_LABEL,
            vw = VALUE_WIDTH
        ),
        None => left,
    }
}

fn centre(text: &str) -> String {
    format!("{:^width$}", text, width = PAGE_WIDTH)
        .trim_end()
        .to_string()
}

fn right(text: &str) -> String {
    format!("{:>width$}", text, width = PAGE_WIDTH)
}

/// Places `left` and `right` at opposite edges, keeping at least one space
/// between them when they would collide.
fn justify(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = PAGE_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}
