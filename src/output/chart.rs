//! Terminal charts for history series.

use colored::Colorize;

use crate::features::focus::{format_minutes, Settings};
use crate::features::history::{bar_height_fraction, DayEntry};

const FULL_BLOCK: char = '█';
const BAR_WIDTH: usize = 30;

/// Render a horizontal bar chart.
///
/// Bars are scaled to the largest value; an all-zero chart has no bars.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(
    data: &[(String, u32)],
    label_width: usize,
    bar_width: usize,
) -> Vec<String> {
    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(0);

    data.iter()
        .map(|(label, value)| {
            let fraction = bar_height_fraction(*value, max_value);
            let bar_length = ((fraction * bar_width as f64).round() as usize).min(bar_width);
            let bar = FULL_BLOCK.to_string().repeat(bar_length);
            let padding = " ".repeat(bar_width - bar_length);

            format!("{label:label_width$} |{bar}{padding} {value}")
        })
        .collect()
}

/// Format a history series as a pretty bar chart.
#[must_use]
pub fn format_series_pretty(entries: &[DayEntry], title: &str) -> String {
    let total: u64 = entries.iter().map(|e| u64::from(e.count)).sum();

    let mut output = format!("{} ({total} sessions)\n", title.bold());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    if entries.is_empty() {
        output.push_str("  No days\n");
        return output;
    }

    let data: Vec<(String, u32)> = entries
        .iter()
        .map(|e| (format!("{} {}", e.weekday_label(), e.date.format("%m-%d")), e.count))
        .collect();
    let rows = render_bar_chart(&data, 9, BAR_WIDTH);

    for (entry, row) in entries.iter().zip(rows) {
        let line = if entry.is_today {
            format!("{}  {}", row.green().bold(), "today".green())
        } else if entry.is_future {
            row.dimmed().to_string()
        } else {
            row
        };
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format settings as pretty output.
#[must_use]
pub fn format_settings_pretty(settings: &Settings) -> String {
    let rows = [
        ("Work", format_minutes(settings.work_minutes)),
        ("Short break", format_minutes(settings.short_break_minutes)),
        ("Long break", format_minutes(settings.long_break_minutes)),
        (
            "Show chart",
            if settings.show_chart { "yes" } else { "no" }.to_string(),
        ),
    ];

    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut output = format!("{}\n", "Settings".bold());
    output.push_str(&"─".repeat(30));
    output.push('\n');

    for (label, value) in rows {
        output.push_str(&format!("{label:>label_width$} : {}\n", value.cyan()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, count: u32) -> DayEntry {
        DayEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            count,
            is_today: day == 13,
            is_future: day > 13,
        }
    }

    #[test]
    fn test_render_bar_chart_scaling() {
        let data = vec![
            ("A".to_string(), 5),
            ("B".to_string(), 10),
            ("C".to_string(), 0),
        ];
        let rows = render_bar_chart(&data, 3, 10);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matches(FULL_BLOCK).count(), 5);
        assert_eq!(rows[1].matches(FULL_BLOCK).count(), 10);
        assert_eq!(rows[2].matches(FULL_BLOCK).count(), 0);
        assert!(rows[1].ends_with(" 10"));
    }

    #[test]
    fn test_render_bar_chart_all_zero() {
        let data = vec![("A".to_string(), 0), ("B".to_string(), 0)];
        let rows = render_bar_chart(&data, 3, 10);
        assert!(rows.iter().all(|r| !r.contains(FULL_BLOCK)));
    }

    #[test]
    fn test_format_series_pretty() {
        let entries = [entry(12, 1), entry(13, 3), entry(14, 0)];
        let output = format_series_pretty(&entries, "This week");

        assert!(output.contains("This week"));
        assert!(output.contains("(4 sessions)"));
        assert!(output.contains("Tue 03-12"));
        assert!(output.contains("Wed 03-13"));
        assert!(output.contains("today"));
        // Chronological order
        let tue = output.find("Tue 03-12").unwrap();
        let thu = output.find("Thu 03-14").unwrap();
        assert!(tue < thu);
    }

    #[test]
    fn test_format_settings_pretty() {
        let output = format_settings_pretty(&Settings::default());

        assert!(output.contains("Work"));
        assert!(output.contains("25 minutes"));
        assert!(output.contains("15 minutes"));
        assert!(output.contains("no"));
    }
}
