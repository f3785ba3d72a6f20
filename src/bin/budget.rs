//! CLI for the budgeting backend: monthly report, history, goals and
//! transaction entry.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use budgetkit::analytics::{
    AggregationReport, DEFAULT_SERIES_WINDOW, GoalProgress, MAX_SERIES_WINDOW, ReportOptions,
    compute_aggregation_report, goal_progress,
};
use budgetkit::client::DEFAULT_BASE_URL;
use budgetkit::error::BudgetError;
use budgetkit::filter::{TransactionFilter, newest_first};
use budgetkit::models::{
    Category, GoalId, NaiveDate, NaiveDateTime, Transaction, TransactionId, User, UserId,
};
use budgetkit::tracker::{BudgetTrackerBlocking, ExpenseEntry, IncomeEntry};
use chrono::{Local, NaiveTime};
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Budget tracker CLI: monthly report, history, goals and transaction entry.
#[derive(Debug, Parser)]
#[command(name = "budget", version, about)]
struct Cli {
    /// Base URL of the budgeting backend.
    #[arg(
        long,
        global = true,
        env = "BUDGET_API_URL",
        default_value = DEFAULT_BASE_URL,
        value_name = "URL"
    )]
    api_url: String,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Spend per category, remaining budget and the trailing monthly series.
    Report(ReportArgs),
    /// List transactions, most recent first, optionally filtered.
    Transactions(TransactionArgs),
    /// List goals with their progress.
    Goals(SourceArgs),
    /// Record an expense.
    AddExpense(ExpenseArgs),
    /// Record income, optionally allocated to a goal.
    AddIncome(IncomeArgs),
    /// Delete a transaction.
    Delete {
        /// Owner of the transaction.
        #[arg(long)]
        user_id: i64,
        /// Transaction to delete.
        #[arg(long)]
        id: i64,
    },
}

/// Where read commands take the user record from.
///
/// `--file` reads a JSON export (one user object or an array of users);
/// combined with `--user-id` or `--email` it selects from the export.
#[derive(Debug, Default, Args)]
#[group(id = "source", required = true, multiple = true)]
struct SourceArgs {
    /// Backend user id.
    #[arg(long, conflicts_with = "email")]
    user_id: Option<i64>,
    /// Login email of the user.
    #[arg(long)]
    email: Option<String>,
    /// JSON export to read instead of the backend.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

/// Arguments for the `report` subcommand.
#[derive(Debug, Args)]
struct ReportArgs {
    /// User selection.
    #[command(flatten)]
    source: SourceArgs,
    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// Number of months in the trailing series.
    #[arg(
        long,
        default_value_t = DEFAULT_SERIES_WINDOW,
        value_parser = parse_window
    )]
    window: usize,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Arguments for the `transactions` subcommand.
#[derive(Debug, Args)]
struct TransactionArgs {
    /// User selection.
    #[command(flatten)]
    source: SourceArgs,
    /// Start date (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Category label (case-insensitive).
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    /// Note substring (case-insensitive).
    #[arg(long)]
    note: Option<String>,
    /// Minimum absolute amount.
    #[arg(long)]
    min_amount: Option<f64>,
    /// Maximum absolute amount.
    #[arg(long)]
    max_amount: Option<f64>,
    /// Show expenses only.
    #[arg(long, conflicts_with = "income")]
    expenses: bool,
    /// Show income only.
    #[arg(long)]
    income: bool,
}

/// Arguments for the `add-expense` subcommand.
#[derive(Debug, Args)]
struct ExpenseArgs {
    /// Owner of the expense.
    #[arg(long)]
    user_id: i64,
    /// Amount spent.
    #[arg(long, value_parser = parse_amount)]
    amount: f64,
    /// Category label (case-insensitive).
    #[arg(long, value_parser = parse_category)]
    category: Category,
    /// Optional note.
    #[arg(long)]
    note: Option<String>,
    /// Date of the expense (YYYY-MM-DD); defaults to now.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

/// Arguments for the `add-income` subcommand.
#[derive(Debug, Args)]
struct IncomeArgs {
    /// Login email of the user.
    #[arg(long)]
    email: String,
    /// Amount received.
    #[arg(long, value_parser = parse_amount)]
    amount: f64,
    /// Goal to allocate the income to.
    #[arg(long)]
    goal: Option<i64>,
    /// Optional note.
    #[arg(long)]
    note: Option<String>,
    /// Date of the income (YYYY-MM-DD); defaults to now.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

/// Failure to obtain a user record.
#[derive(Debug, thiserror::Error)]
enum LoadError {
    /// The export file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The backend or the export parser failed.
    #[error(transparent)]
    Budget(#[from] BudgetError),
    /// The export holds no user matching the selection.
    #[error("no matching user in the export")]
    NotFound,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses a category label, rejecting labels outside the fixed set.
fn parse_category(s: &str) -> Result<Category, String> {
    let category = Category::from_label(s);
    if category.label().eq_ignore_ascii_case(s.trim()) {
        Ok(category)
    } else {
        let known: Vec<&str> = Category::ALL.iter().map(|known| known.label()).collect();
        Err(format!(
            "unknown category {s:?}, expected one of: {}",
            known.join(", ")
        ))
    }
}

/// Parses a series window within the range the engine accepts.
fn parse_window(s: &str) -> Result<usize, String> {
    let window: usize = s.trim().parse().map_err(|err| format!("{err}"))?;
    if (1..=MAX_SERIES_WINDOW).contains(&window) {
        Ok(window)
    } else {
        Err(format!(
            "window must be between 1 and {MAX_SERIES_WINDOW} months, got {window}"
        ))
    }
}

/// Parses a strictly positive amount.
fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s.trim().parse().map_err(|err| format!("{err}"))?;
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(format!("amount must be a positive number, got {s}"))
    }
}

/// Start of `date`, or the current local time when no date was given.
fn entry_time(date: Option<NaiveDate>) -> NaiveDateTime {
    date.map_or_else(
        || Local::now().naive_local(),
        |day| day.and_time(NaiveTime::MIN),
    )
}

/// Parses a JSON export holding one user object or an array of users.
fn parse_export(raw: &str) -> budgetkit::error::Result<Vec<User>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

/// Reads and parses an export file.
fn read_export(path: &Path) -> Result<Vec<User>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_export(&raw)?)
}

/// Picks the user matching the selection, or the first user when nothing
/// narrows it down.
fn select_user(users: Vec<User>, source: &SourceArgs) -> Result<User, LoadError> {
    let found = match (source.user_id, source.email.as_deref()) {
        (Some(id), _) => users
            .into_iter()
            .find(|user| user.id == Some(UserId::new(id))),
        (None, Some(email)) => users
            .into_iter()
            .find(|user| user.email.as_deref() == Some(email)),
        (None, None) => users.into_iter().next(),
    };
    found.ok_or(LoadError::NotFound)
}

/// Loads the selected user from the export file or the backend.
fn fetch_user(tracker: &BudgetTrackerBlocking, source: &SourceArgs) -> Result<User, LoadError> {
    if let Some(path) = source.file.as_deref() {
        return select_user(read_export(path)?, source);
    }
    let spinner = make_spinner("Fetching user from the backend...");
    let fetched = match (source.user_id, source.email.as_deref()) {
        (Some(id), _) => tracker.client().user(UserId::new(id)),
        (None, Some(email)) => tracker.client().user_by_email(email),
        (None, None) => Err(BudgetError::InvalidArgument(
            "one of --user-id, --email or --file is required".to_owned(),
        )),
    };
    spinner.finish_and_clear();
    Ok(fetched?)
}

/// Loads the selected user, printing an error on failure.
///
/// Returns `Ok(None)` if loading failed (error already printed), or `Err`
/// on I/O failure.
fn load_user(tracker: &BudgetTrackerBlocking, source: &SourceArgs) -> io::Result<Option<User>> {
    match fetch_user(tracker, source) {
        Ok(user) => Ok(Some(user)),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to load user: {err}",
                "error:".red().bold()
            )?;
            Ok(None)
        }
    }
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let tracker = match BudgetTrackerBlocking::builder()
        .base_url(cli.api_url)
        .build()
    {
        Ok(tracker) => tracker,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build client: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&tracker, cli.command)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(tracker: &BudgetTrackerBlocking, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Report(args) => cmd_report(tracker, &args),
        Command::Transactions(args) => cmd_transactions(tracker, &args),
        Command::Goals(source) => cmd_goals(tracker, &source),
        Command::AddExpense(args) => cmd_add_expense(tracker, args),
        Command::AddIncome(args) => cmd_add_income(tracker, args),
        Command::Delete { user_id, id } => cmd_delete(tracker, user_id, id),
    }
}

/// Executes the `report` subcommand.
fn cmd_report(tracker: &BudgetTrackerBlocking, args: &ReportArgs) -> io::Result<ExitCode> {
    let Some(user) = load_user(tracker, &args.source)? else {
        return Ok(ExitCode::FAILURE);
    };
    let reference = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let options = ReportOptions {
        monthly_series_window: args.window,
    };

    match compute_aggregation_report(&user.purchases, &user.budget_config(), reference, &options) {
        Ok(report) if args.json => {
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            writeln!(io::stdout().lock(), "{json}")?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            print_report(&report, user.preferred_currency.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to compute report: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Builds a [`TransactionFilter`] from CLI arguments.
fn build_transaction_filter(args: &TransactionArgs) -> TransactionFilter {
    let mut filter = TransactionFilter::new();
    if let Some(from) = args.from {
        filter = filter.since(from);
    }
    if let Some(to) = args.to {
        filter = filter.until(to);
    }
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    if let Some(note) = args.note.as_deref() {
        filter = filter.note(note);
    }
    filter.min_amount = args.min_amount;
    filter.max_amount = args.max_amount;
    if args.expenses {
        filter = filter.expenses_only();
    } else if args.income {
        filter = filter.income_only();
    }
    filter
}

/// Executes the `transactions` subcommand.
fn cmd_transactions(
    tracker: &BudgetTrackerBlocking,
    args: &TransactionArgs,
) -> io::Result<ExitCode> {
    let Some(user) = load_user(tracker, &args.source)? else {
        return Ok(ExitCode::FAILURE);
    };
    let filter = build_transaction_filter(args);
    let history = newest_first(filter.apply(&user.purchases));
    print_transactions_table(&history)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `goals` subcommand.
fn cmd_goals(tracker: &BudgetTrackerBlocking, source: &SourceArgs) -> io::Result<ExitCode> {
    let Some(user) = load_user(tracker, source)? else {
        return Ok(ExitCode::FAILURE);
    };
    print_goals_table(&goal_progress(&user.goals, &user.purchases))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `add-expense` subcommand.
fn cmd_add_expense(tracker: &BudgetTrackerBlocking, args: ExpenseArgs) -> io::Result<ExitCode> {
    let mut entry = ExpenseEntry::new(args.amount, args.category, entry_time(args.date));
    entry.note = args.note;
    let spinner = make_spinner("Recording expense...");
    let result = tracker.record_expense(UserId::new(args.user_id), &entry);
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Expense recorded.".green().bold(),
                response.message.unwrap_or_default().dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to record expense: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `add-income` subcommand.
fn cmd_add_income(tracker: &BudgetTrackerBlocking, args: IncomeArgs) -> io::Result<ExitCode> {
    let mut entry = IncomeEntry::new(args.amount, entry_time(args.date));
    entry.note = args.note;
    entry.goal = args.goal.map(GoalId::new);
    let spinner = make_spinner("Recording income...");
    let result = tracker.record_income(&args.email, &entry);
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} {}",
                "Income recorded.".green().bold(),
                format_args!("(new balance: {:.2})", receipt.new_balance).dimmed()
            )?;
            if let Some(goal) = receipt.goal {
                writeln!(
                    out,
                    "  {} {} {:.1}%",
                    "Goal:".bold(),
                    goal.title,
                    goal.progress_pct()
                )?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let mut stderr = io::stderr().lock();
            writeln!(
                stderr,
                "{} failed to record income: {err}",
                "error:".red().bold()
            )?;
            if let BudgetError::PartialWrite { completed, .. } = err {
                writeln!(
                    stderr,
                    "  {} {completed} already took effect; check the account before retrying",
                    "hint:".cyan()
                )?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete(tracker: &BudgetTrackerBlocking, user_id: i64, id: i64) -> io::Result<ExitCode> {
    let spinner = make_spinner("Deleting transaction...");
    let result = tracker.delete_purchase(UserId::new(user_id), TransactionId::new(id));
    spinner.finish_and_clear();

    match result {
        Ok(_) => {
            writeln!(
                io::stdout().lock(),
                "{}",
                "Transaction deleted.".green().bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to delete transaction: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Table cell text for a missing value.
const PLACEHOLDER: &str = "\u{2014}";

/// Formats an amount with the user's currency code, if known.
fn money(amount: f64, currency: Option<&str>) -> String {
    match currency {
        Some(code) => format!("{amount:.2} {code}"),
        None => format!("{amount:.2}"),
    }
}

/// Formats the calendar day of a timestamp.
fn format_day(at: Option<NaiveDateTime>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => PLACEHOLDER.to_owned(),
    }
}

/// Prints the aggregation report.
fn print_report(report: &AggregationReport, currency: Option<&str>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        "Budget report".green().bold(),
        format_args!("({})", report.reference_month).dimmed()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} {}",
        "Spent:".bold(),
        money(report.total_spent_this_month, currency)
    )?;
    let remaining = money(report.remaining_budget, currency);
    if report.remaining_budget < 0.0 {
        writeln!(out, "  {} {}", "Remaining:".bold(), remaining.red())?;
    } else {
        writeln!(out, "  {} {}", "Remaining:".bold(), remaining.green())?;
    }
    writeln!(
        out,
        "  {} {}",
        "Income:".bold(),
        money(report.income_this_month, currency)
    )?;
    writeln!(
        out,
        "  {} {:.1}%",
        "Savings progress:".bold(),
        report.savings_progress_pct
    )?;
    writeln!(out)?;

    let mut categories = Table::new();
    _ = categories.load_preset(UTF8_FULL);
    _ = categories.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Spent").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for (category, amount) in report.category_totals.iter() {
        let segment = report
            .category_segments
            .iter()
            .find(|segment| segment.label == category.label());
        let share = match segment {
            Some(segment) => format!("{:.1}%", segment.percentage),
            None => PLACEHOLDER.to_owned(),
        };
        let amount_cell = if amount > 0.0 {
            Cell::new(format!("{amount:.2}")).fg(Color::Red)
        } else {
            Cell::new(format!("{amount:.2}")).fg(Color::DarkGrey)
        };
        _ = categories.add_row(vec![Cell::new(category), amount_cell, Cell::new(share)]);
    }
    writeln!(out, "{categories}")?;
    writeln!(out)?;

    let mut series = Table::new();
    _ = series.load_preset(UTF8_FULL);
    _ = series.set_header(vec![
        Cell::new("Month").fg(Color::Cyan),
        Cell::new("Spent").fg(Color::Cyan),
    ]);
    for entry in &report.monthly_series {
        _ = series.add_row(vec![
            Cell::new(entry.month),
            Cell::new(format!("{:.2}", entry.amount)),
        ]);
    }
    writeln!(out, "{series}")?;

    if report.skipped_undated > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} {} record(s) without a usable date were left out",
            "warning:".yellow().bold(),
            report.skipped_undated
        )?;
    }
    Ok(())
}

/// Prints transactions in a table.
fn print_transactions_table(txs: &[Transaction]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Id").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Note").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
    ]);

    for tx in txs {
        let id = match tx.id {
            Some(id) => id.to_string(),
            None => PLACEHOLDER.to_owned(),
        };
        let amount_cell = if tx.is_expense() {
            Cell::new(format!("{:.2}", tx.amount)).fg(Color::Red)
        } else {
            Cell::new(format!("+{:.2}", tx.amount)).fg(Color::Green)
        };
        _ = table.add_row(vec![
            Cell::new(id),
            Cell::new(format_day(tx.occurred_at)),
            Cell::new(tx.note.as_deref().unwrap_or("")),
            Cell::new(tx.category),
            amount_cell,
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Transactions".green().bold(),
        format_args!("({})", txs.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints goal progress in a table.
fn print_goals_table(goals: &[GoalProgress]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if goals.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Goal").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Cyan),
        Cell::new("Target").fg(Color::Cyan),
        Cell::new("Progress").fg(Color::Cyan),
        Cell::new("Linked income").fg(Color::Cyan),
        Cell::new("Target date").fg(Color::Cyan),
    ]);

    for goal in goals {
        let progress = format!("{:.1}%", goal.percentage);
        let progress_cell = if goal.ratio >= 1.0 {
            Cell::new(progress).fg(Color::Green)
        } else {
            Cell::new(progress)
        };
        _ = table.add_row(vec![
            Cell::new(&goal.title),
            Cell::new(format!("{:.2}", goal.current_amount)),
            Cell::new(format!("{:.2}", goal.target_amount)),
            progress_cell,
            Cell::new(format!("{:.2}", goal.linked_income)),
            Cell::new(format_day(goal.target_date)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Goals".green().bold(),
        format_args!("({})", goals.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
