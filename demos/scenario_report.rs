//! Example: Positioning ratios for a hand-built chain
//!
//! Run with: cargo run --example scenario_report

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use option_positioning::prelude::*;

fn main() -> PositioningResult<()> {
    let as_of = Utc.with_ymd_and_hms(2025, 5, 22, 0, 0, 0).unwrap();
    let near = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
    let far = near + Duration::days(91);

    let snapshot = ChainSnapshot::new(
        "DEMO",
        100.0,
        as_of,
        vec![
            OptionContract::call(90.0, near, 0.40, 100, 200),
            OptionContract::call(110.0, near, 0.30, 50, 100),
            OptionContract::put(90.0, near, 0.45, 200, 300),
            OptionContract::put(110.0, near, 0.25, 20, 50),
            OptionContract::call(95.0, far, 0.35, 300, 900),
            OptionContract::call(115.0, far, 0.28, 80, 400),
            OptionContract::put(85.0, far, 0.48, 150, 700),
            OptionContract::put(105.0, far, 0.33, 60, 250),
        ],
    )?;

    let report = ReportAggregator::new().run(&snapshot);
    print!("{}", report);

    // Greeks behind the exposure ratios for the nearest expiration
    println!("\n=== Greeks ({}) ===\n", near);
    let group = snapshot.group(near);
    for g in ExposureAnalyzer::default().greeks(&group) {
        println!(
            "{:>4} {:>7.2}  delta {:>7.4}  gamma {:.5}",
            g.option_type().label(),
            g.contract.strike,
            g.greeks.delta,
            g.greeks.gamma
        );
    }

    // Skew detail
    let skew = &report.expirations[0].skew;
    println!("\n=== Skew ({}) ===\n", near);
    println!(
        "Call skew: {:.4} (range {:.2} - {:.2})",
        skew.call.ratio, skew.call.left_price_range, skew.call.right_price_range
    );
    println!(
        "Put skew:  {:.4} (range {:.2} - {:.2})",
        skew.put.ratio, skew.put.left_price_range, skew.put.right_price_range
    );
    println!("Weights:   call {:.2}, put {:.2}", skew.call_weight, skew.put_weight);

    Ok(())
}
