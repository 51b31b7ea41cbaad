use flowkit_core::verify::VerificationReport;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render a verification report as an aligned three-column table.
pub fn print_verification(report: &VerificationReport) {
    let rows: Vec<[String; 3]> = report
        .checks
        .iter()
        .map(|c| {
            let status = if c.passed {
                "ok"
            } else if c.required {
                "FAIL"
            } else {
                "warn"
            };
            [c.name.clone(), status.to_string(), c.message.clone()]
        })
        .collect();

    let headers = ["CHECK", "STATUS", "DETAIL"];
    let mut widths = [headers[0].len(), headers[1].len(), headers[2].len()];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let line = |cells: [&str; 3]| {
        println!(
            "{:w0$}  {:w1$}  {:w2$}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
    };
    line(headers);
    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    line([dashes[0].as_str(), dashes[1].as_str(), dashes[2].as_str()]);
    for row in &rows {
        line([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }
}
