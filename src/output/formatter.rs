use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::diagnostics::Warning;
use crate::scoring::ScoredProgram;
use crate::summary::RobustSummary;
use crate::table::{Criterion, FieldOutlook, ProgramRecord, WorldRankEntry};

const NO_RESULTS: &str = "No programs found.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width left for the title once the fixed columns are laid out.
fn fit_title(title: &str, fixed_width: usize) -> String {
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => truncate_title(title, width - fixed_width),
        Some(_) => truncate_title(title, 20),
        None => title.to_string(),
    }
}

/// Composite score with three decimals, "-" when unscored.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.3}", s),
        None => "-".to_string(),
    }
}

/// Whole dollars with thousands separators: "$32,500", "-$2,000".
pub fn format_money(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return "-".to_string();
    };
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Plain number: integers without decimals, others with one.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

fn format_criterion_value(record: &ProgramRecord, criterion: Criterion) -> String {
    let value = record.number(criterion.column());
    match criterion {
        Criterion::Tuition | Criterion::Stipend | Criterion::StateAvgStipend => format_money(value),
        Criterion::WorldRank | Criterion::UsaRank | Criterion::GlassdoorStar => format_number(value),
    }
}

fn place(record: &ProgramRecord) -> String {
    if record.university.is_empty() {
        record.region.clone()
    } else {
        format!("{}, {}", record.university, record.region)
    }
}

/// Ranked programs, one per line: index, score, title, university and state.
/// No headers (minimal format, like the browse listing).
pub fn format_ranked_table(programs: &[ScoredProgram], use_colors: bool) -> String {
    if programs.is_empty() {
        return NO_RESULTS.to_string();
    }

    let index_width = 3;
    let score_width = 6;
    let separator = "  ";

    programs
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(scored.score), width = score_width);
            let place = place(scored.record);
            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + place.chars().count();
            let title = fit_title(&scored.record.title, fixed_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    title,
                    separator,
                    place.cyan()
                )
            } else {
                format!("{} {}{}{}{}{}", index_str, score_padded, separator, title, separator, place)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line view of one ranked program with its score breakdown (verbose mode)
pub fn format_ranked_detail(scored: &ScoredProgram, use_colors: bool) -> String {
    let record = scored.record;
    let mut lines = Vec::new();

    let title = if record.title.is_empty() { "(untitled)" } else { record.title.as_str() };
    if use_colors {
        lines.push(format!("{}", title.bold()));
        lines.push(format!("  University: {}", record.university.cyan()));
    } else {
        lines.push(title.to_string());
        lines.push(format!("  University: {}", record.university));
    }
    lines.push(format!("  Location: {}, {}", record.city, record.region));
    if let Some(duration) = &record.duration {
        lines.push(format!("  Duration: {}", duration));
    }
    lines.push(format!(
        "  USA rank: {}  Tuition: {}  Stipend: {}",
        format_number(record.rank),
        format_money(record.tuition),
        format_money(record.stipend)
    ));
    lines.push(format!("  Score: {}", format_score(scored.score)));
    for factor in &scored.breakdown {
        lines.push(format!(
            "    {:<10} norm {:.3} x weight {:.2} -> {:+.3}",
            factor.column.label(),
            factor.normalized,
            factor.weight,
            factor.contribution
        ));
    }
    lines.join("\n")
}

/// Ranked programs as tab-separated values for scripting.
/// Columns: score, title, university, state, rank, tuition, stipend (no headers, no colors)
pub fn format_ranked_tsv(programs: &[ScoredProgram]) -> String {
    programs
        .iter()
        .map(|scored| {
            let r = scored.record;
            [
                format_score(scored.score),
                r.title.clone(),
                r.university.clone(),
                r.region.clone(),
                tsv_number(r.rank),
                tsv_number(r.tuition),
                tsv_number(r.stipend),
            ]
            .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tsv_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Records sorted by a criterion: index, criterion value, title, university and state.
pub fn format_browse_table(rows: &[&ProgramRecord], criterion: Criterion, use_colors: bool) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }

    let value_width = 9;
    let separator = "  ";

    rows.iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let value = format!("{:>width$}", format_criterion_value(record, criterion), width = value_width);
            let place = place(record);
            let fixed_width = 3 + 1 + value_width + separator.len() * 2 + place.chars().count();
            let title = fit_title(&record.title, fixed_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    value.bold(),
                    separator,
                    title,
                    separator,
                    place.cyan()
                )
            } else {
                format!("{} {}{}{}{}{}", index_str, value, separator, title, separator, place)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Columns: criterion value, title, university, city, state
pub fn format_browse_tsv(rows: &[&ProgramRecord], criterion: Criterion) -> String {
    rows.iter()
        .map(|r| {
            [
                tsv_number(r.number(criterion.column())),
                r.title.clone(),
                r.university.clone(),
                r.city.clone(),
                r.region.clone(),
            ]
            .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const COST_HEADERS: [&str; 8] = [
    "Tuition",
    "Stipend",
    "Required",
    "Food",
    "Housing",
    "Transport",
    "Medical",
    "Enough",
];

fn cost_cells(record: &ProgramRecord) -> [String; 8] {
    [
        format_money(record.tuition),
        format_money(record.stipend),
        format_money(record.required_income),
        format_money(record.food),
        format_money(record.housing),
        format_money(record.transportation),
        format_money(record.medical),
        record.enough_income.clone().unwrap_or_else(|| "-".to_string()),
    ]
}

/// Annual cost of living next to tuition and stipend, with a header row.
pub fn format_cost_table(rows: &[&ProgramRecord], use_colors: bool) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }

    let cell_width = 10;
    let header = COST_HEADERS
        .iter()
        .map(|h| format!("{:>width$}", h, width = cell_width))
        .collect::<String>();
    let header = format!("{}  {}", header, "Program");

    let mut lines = vec![if use_colors {
        format!("{}", header.bold())
    } else {
        header
    }];
    for record in rows {
        let cells = cost_cells(record)
            .iter()
            .map(|c| format!("{:>width$}", c, width = cell_width))
            .collect::<String>();
        let label = format!("{} ({})", record.title, record.university);
        let label = fit_title(&label, cells.chars().count() + 2);
        lines.push(format!("{}  {}", cells, label));
    }
    lines.join("\n")
}

/// Columns: title, university, then the cost columns in table order
pub fn format_cost_tsv(rows: &[&ProgramRecord]) -> String {
    rows.iter()
        .map(|r| {
            let mut cells = vec![r.title.clone(), r.university.clone()];
            cells.extend([
                tsv_number(r.tuition),
                tsv_number(r.stipend),
                tsv_number(r.required_income),
                tsv_number(r.food),
                tsv_number(r.housing),
                tsv_number(r.transportation),
                tsv_number(r.medical),
                r.enough_income.clone().unwrap_or_default(),
            ]);
            cells.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_stat(value: f64, money: bool) -> String {
    if money {
        format_money(Some(value))
    } else {
        format!("{:.1}", value)
    }
}

fn is_money(summary: &RobustSummary) -> bool {
    use crate::summary::ValueColumn;
    !matches!(
        summary.value_column,
        ValueColumn::Rank | ValueColumn::WorldRank | ValueColumn::GlassdoorStar
    )
}

/// Per-group statistics in ascending order of mean, with a header row and
/// a footer describing the outlier bounds.
pub fn format_summary_table(summary: &RobustSummary, use_colors: bool) -> String {
    if summary.groups.is_empty() {
        return "No data to summarize.".to_string();
    }

    let money = is_money(summary);
    let label_width = summary
        .groups
        .iter()
        .map(|g| g.group.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 32);
    let w = 10;

    let header = format!(
        "{:<lw$} {:>5} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$}",
        "Group", "N", "Mean", "Min", "Q1", "Median", "Q3", "Max",
        lw = label_width,
        w = w
    );
    let mut lines = vec![if use_colors {
        format!("{}", header.bold())
    } else {
        header
    }];

    for g in &summary.groups {
        let label = truncate_title(&g.group, label_width);
        let mean = format!("{:>w$}", format_stat(g.mean, money), w = w);
        let rest = format!(
            "{:>w$} {:>w$} {:>w$} {:>w$} {:>w$}",
            format_stat(g.spread.min, money),
            format_stat(g.spread.q1, money),
            format_stat(g.spread.median, money),
            format_stat(g.spread.q3, money),
            format_stat(g.spread.max, money),
            w = w
        );
        if use_colors {
            lines.push(format!(
                "{:<lw$} {:>5} {} {}",
                label,
                g.count,
                mean.bold(),
                rest,
                lw = label_width
            ));
        } else {
            lines.push(format!("{:<lw$} {:>5} {} {}", label, g.count, mean, rest, lw = label_width));
        }
    }

    if let Some(bounds) = summary.bounds {
        let footer = format!(
            "{} kept, {} outlier(s) outside [{}, {}]",
            summary.cleaned.len(),
            summary.outliers,
            format_stat(bounds.lower, money),
            format_stat(bounds.upper, money)
        );
        lines.push(String::new());
        lines.push(if use_colors {
            format!("{}", footer.dimmed())
        } else {
            footer
        });
    }
    lines.join("\n")
}

/// Columns: group, count, mean, min, q1, median, q3, max
pub fn format_summary_tsv(summary: &RobustSummary) -> String {
    summary
        .groups
        .iter()
        .map(|g| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                g.group, g.count, g.mean, g.spread.min, g.spread.q1, g.spread.median, g.spread.q3, g.spread.max
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// World ranking entries: rank, name and coordinates
pub fn format_world_table(entries: &[&WorldRankEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No ranked universities found.".to_string();
    }

    entries
        .iter()
        .map(|e| {
            let rank = format!("{:>4}", format_number(e.rank));
            let coords = match (e.latitude, e.longitude) {
                (Some(lat), Some(lon)) => format!("({:.2}, {:.2})", lat, lon),
                _ => String::new(),
            };
            if use_colors {
                format!("{}  {}  {}", rank.bold(), e.name, coords.dimmed())
            } else {
                format!("{}  {}  {}", rank, e.name, coords).trim_end().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per field, with its post-PhD outlook when known
pub fn format_fields(outlooks: &[FieldOutlook], use_colors: bool) -> String {
    if outlooks.is_empty() {
        return "No fields found.".to_string();
    }

    outlooks
        .iter()
        .map(|o| {
            let employment = o
                .post_phd_employment
                .map(|e| format!("{}%", format_number(Some(e))))
                .unwrap_or_else(|| "-".to_string());
            let salary = format_money(o.post_phd_salary);
            if use_colors {
                format!("{}  salary {}  employment {}", o.field.bold(), salary, employment)
            } else {
                format!("{}  salary {}  employment {}", o.field, salary, employment)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header shown above a field's listings
pub fn format_field_outlook(outlook: &FieldOutlook) -> String {
    let employment = outlook
        .post_phd_employment
        .map(|e| format!("{}%", format_number(Some(e))))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Field salary post PhD: {}\nField employment rate: {}",
        format_money(outlook.post_phd_salary),
        employment
    )
}

pub fn format_warning(warning: &Warning, use_colors: bool) -> String {
    if use_colors {
        format!("{} {}", "warning:".yellow().bold(), warning)
    } else {
        format!("warning: {}", warning)
    }
}
