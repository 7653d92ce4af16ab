//! Derived financial indicators.
//!
//! GDIS value is the proposal total minus the photovoltaic kit: the share of
//! the sale the installation company actually works on. Tax is a fixed 12%
//! of GDIS; profits and margin are computed over the same base.

/// Fixed tax rate applied over the GDIS value.
pub const TAX_RATE: f64 = 0.12;

/// Margin thresholds (percent over GDIS) for KPI card colouring.
pub const MARGIN_GOOD_ABOVE: f64 = 17.0;
pub const MARGIN_WARNING_ABOVE: f64 = 13.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kpis {
    pub gdis_value: f64,
    pub tax: f64,
    /// Effective tax percentage over GDIS (0 when GDIS is not positive).
    pub tax_pct: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    /// Net margin over GDIS, in percent (0 when GDIS is not positive).
    pub margin_pct: f64,
}

/// Qualitative band of the net margin, driving the dashboard card style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarginBand {
    Good,
    Warning,
    Bad,
}

impl Kpis {
    pub fn derive(proposal_value: f64, kit_value: f64, total_costs: f64) -> Kpis {
        let gdis_value = proposal_value - kit_value;
        let tax = gdis_value * TAX_RATE;
        let gross_profit = gdis_value - total_costs;
        let net_profit = gross_profit - tax;
        let (tax_pct, margin_pct) = if gdis_value > 0.0 {
            (tax / gdis_value * 100.0, net_profit / gdis_value * 100.0)
        } else {
            (0.0, 0.0)
        };
        Kpis {
            gdis_value,
            tax,
            tax_pct,
            gross_profit,
            net_profit,
            margin_pct,
        }
    }

    pub fn margin_band(&self) -> MarginBand {
        if self.margin_pct > MARGIN_GOOD_ABOVE {
            MarginBand::Good
        } else if self.margin_pct >= MARGIN_WARNING_ABOVE {
            MarginBand::Warning
        } else {
            MarginBand::Bad
        }
    }
}

/// Percentage of `value` over `base`, 0 when the base is zero. Used by the
/// report tables ("x% do Projeto / y% do GDIS").
pub fn percent_of(value: f64, base: f64) -> f64 {
    if base == 0.0 { 0.0 } else { value / base * 100.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenario() {
        // proposal=100000, kit=40000, costs=10000
        let k = Kpis::derive(100_000.0, 40_000.0, 10_000.0);
        assert_eq!(k.gdis_value, 60_000.0);
        assert_eq!(k.tax, 7_200.0);
        assert_eq!(k.gross_profit, 50_000.0);
        assert_eq!(k.net_profit, 42_800.0);
        assert!((k.margin_pct - 71.3333).abs() < 0.001);
        assert_eq!(k.margin_band(), MarginBand::Good);
    }

    #[test]
    fn non_positive_gdis_zeroes_percentages() {
        let k = Kpis::derive(40_000.0, 40_000.0, 1_000.0);
        assert_eq!(k.margin_pct, 0.0);
        assert_eq!(k.tax_pct, 0.0);
        let k = Kpis::derive(30_000.0, 40_000.0, 0.0);
        assert_eq!(k.margin_pct, 0.0);
        assert!(k.tax < 0.0);
    }

    #[test]
    fn margin_bands() {
        assert_eq!(
            Kpis::derive(100.0, 0.0, 70.0).margin_band(),
            MarginBand::Good
        );
        // gdis=100, costs=73 → net = 27 - 12 = 15 → warning
        assert_eq!(
            Kpis::derive(100.0, 0.0, 73.0).margin_band(),
            MarginBand::Warning
        );
        assert_eq!(
            Kpis::derive(100.0, 0.0, 80.0).margin_band(),
            MarginBand::Bad
        );
    }

    #[test]
    fn percent_of_zero_base() {
        assert_eq!(percent_of(10.0, 0.0), 0.0);
        assert_eq!(percent_of(25.0, 50.0), 50.0);
    }
}
