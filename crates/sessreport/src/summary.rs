use colored::Colorize;
use sessreport_core::Report;

pub fn print_summary(report: &Report) {
    eprintln!();
    eprintln!("{}", "=== Session Report ===".bright_blue().bold());
    let global = &report.global;
    eprintln!("{}  {}", "Total Users:".dimmed(), global.total_users);
    eprintln!("{}  {}", "Total Sessions:".dimmed(), global.total_sessions);
    eprintln!("{}  {}", "Unique Browsers:".dimmed(), global.unique_browsers_count);

    if report.users_stats.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", "By User:".dimmed());
    for (name, stats) in report.users_stats.iter() {
        let ie = if stats.used_ie {
            " IE".bright_yellow().to_string()
        } else {
            String::new()
        };
        eprintln!(
            "  {:<24} {} sessions, {} total, longest {}{}",
            name, stats.sessions_count, stats.total_time, stats.longest_session, ie
        );
    }
}
