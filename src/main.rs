//! Mortgage Planner CLI
//!
//! Command-line interface for amortization schedules and extra-payment strategies

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use mortgage_planner::{
    amortization::{round_cents, schedule_for},
    config::{ExtraPaymentTiming, LoanDefaults, PlannerSettings},
    loan::{load_scenarios, LoanTerms, RepaymentPlan, TermPolicy},
    report::{self, table, PaymentCalendar},
    ScenarioRunner, ScheduleCache, StrategyComparison, StrategySimulator,
};

#[derive(Parser)]
#[command(name = "mortgage-planner", version, about = "Mortgage amortization and extra-payment strategies")]
struct Cli {
    /// Settings file (JSON); defaults to ./mortgage_planner.json when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Month-by-month annuity schedule
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// Number of months to print (all when omitted)
        #[arg(long)]
        rows: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Year-by-year ledger with annual extra payments
    Strategy {
        #[command(flatten)]
        loan: LoanArgs,

        #[command(flatten)]
        plan: PlanArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compare the plain schedule against an extra-payment strategy
    Compare {
        #[command(flatten)]
        loan: LoanArgs,

        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Simulate a range of extra-payment amounts
    Sweep {
        #[command(flatten)]
        loan: LoanArgs,

        /// Comma-separated extra payments per year
        #[arg(long, value_delimiter = ',', required = true)]
        extras: Vec<f64>,

        /// Keep the monthly payment and shorten the term instead
        #[arg(long)]
        adjust_term: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run every scenario in a CSV file
    Batch {
        /// Scenario file (label,principal,annual_rate,term_years,extra_annual_payment,adjust_term)
        #[arg(long, default_value = mortgage_planner::loan::loader::DEFAULT_SCENARIO_FILE)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    principal: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,

    /// Repayment period in years
    #[arg(long)]
    years: Option<f64>,
}

impl LoanArgs {
    fn terms(&self, defaults: &LoanDefaults) -> Result<LoanTerms> {
        LoanTerms::new(
            self.principal.unwrap_or(defaults.principal),
            self.rate.unwrap_or(defaults.annual_rate),
            self.years.unwrap_or(defaults.term_years),
        )
        .context("invalid loan terms")
    }
}

#[derive(Args)]
struct PlanArgs {
    /// Extra lump sum paid each year
    #[arg(long)]
    extra: Option<f64>,

    /// Keep the monthly payment and shorten the term instead
    #[arg(long)]
    adjust_term: bool,

    /// Credit the extra payment at the start of each year instead of the end
    #[arg(long)]
    year_start: bool,
}

impl PlanArgs {
    fn plan(&self, defaults: &LoanDefaults) -> Result<RepaymentPlan> {
        RepaymentPlan::new(
            self.extra.unwrap_or(defaults.extra_annual_payment),
            TermPolicy::from_adjust_term(self.adjust_term),
        )
        .context("invalid repayment plan")
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Also write the rows to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Date of the first payment (YYYY-MM-DD), used to label months
    #[arg(long)]
    start_date: Option<NaiveDate>,
}

impl OutputArgs {
    fn calendar(&self) -> Option<PaymentCalendar> {
        self.start_date.map(PaymentCalendar::new)
    }
}

/// One line of the batch summary file
#[derive(Debug, Serialize)]
struct BatchSummaryRow {
    label: String,
    payoff_years: u32,
    baseline_interest: f64,
    strategy_interest: f64,
    interest_saved: f64,
    years_saved: f64,
    error: Option<String>,
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = PlannerSettings::load_or_default(cli.config.as_deref())
        .context("failed to load settings")?;
    let defaults = settings.defaults;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.json {
        writeln!(out, "Mortgage Planner v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "======================\n")?;
    }

    match cli.command {
        Command::Schedule { loan, rows, output } => {
            let terms = loan.terms(&defaults)?;
            let schedule = schedule_for(&terms)?;

            if cli.json {
                print_json(&mut out, &schedule)?;
            } else {
                writeln!(out, "Loan: {:.2} at {}% over {} years\n", terms.principal, terms.annual_rate, terms.term_years)?;
                table::write_schedule_table(&mut out, &schedule, output.calendar().as_ref(), rows)?;
            }

            if let Some(path) = &output.output {
                report::export_schedule(path, &schedule.rows)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("Schedule written to {}", path.display());
            }
        }
        Command::Strategy { loan, plan, output } => {
            let terms = loan.terms(&defaults)?;
            let repayment = plan.plan(&defaults)?;
            if plan.year_start {
                settings.engine.extra_payment_timing = ExtraPaymentTiming::YearStart;
            }
            let result = StrategySimulator::new(settings.engine).simulate(&terms, &repayment)?;

            if cli.json {
                print_json(&mut out, &result)?;
            } else {
                table::write_strategy_table(&mut out, &result, output.calendar().as_ref())?;
            }

            if let Some(path) = &output.output {
                report::export_strategy(path, &result.rows)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("Strategy written to {}", path.display());
            }
        }
        Command::Compare { loan, plan } => {
            let terms = loan.terms(&defaults)?;
            let repayment = plan.plan(&defaults)?;
            if plan.year_start {
                settings.engine.extra_payment_timing = ExtraPaymentTiming::YearStart;
            }
            let mut cache = ScheduleCache::with_settings(settings.engine);
            let baseline = cache.schedule(&terms)?;
            let strategy = cache.strategy(&terms, &repayment)?;
            let comparison = StrategyComparison::between(&baseline, &strategy);

            if cli.json {
                print_json(&mut out, &comparison)?;
            } else {
                table::write_comparison(&mut out, &comparison)?;
            }
        }
        Command::Sweep { loan, extras, adjust_term, output } => {
            let terms = loan.terms(&defaults)?;
            let runner = ScenarioRunner::with_settings(settings.engine);
            let points = runner.sweep(&terms, &extras, TermPolicy::from_adjust_term(adjust_term))?;

            if cli.json {
                print_json(&mut out, &points)?;
            } else {
                table::write_sweep_table(&mut out, &points)?;
            }

            if let Some(path) = &output.output {
                report::export_sweep(path, &points)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        Command::Batch { input, output } => {
            let scenarios = load_scenarios(&input)
                .with_context(|| format!("failed to load scenarios from {}", input.display()))?;
            let runner = ScenarioRunner::with_settings(settings.engine);
            let outcomes = runner.run_batch(&scenarios);

            let summary: Vec<BatchSummaryRow> = scenarios
                .iter()
                .zip(&outcomes)
                .map(|(scenario, outcome)| match outcome {
                    Ok(o) => BatchSummaryRow {
                        label: o.label.clone(),
                        payoff_years: o.comparison.strategy_years,
                        baseline_interest: round_cents(o.comparison.baseline_interest),
                        strategy_interest: round_cents(o.comparison.strategy_interest),
                        interest_saved: round_cents(o.comparison.interest_saved),
                        years_saved: round_cents(o.comparison.years_saved),
                        error: None,
                    },
                    Err(e) => {
                        log::warn!("Scenario {} failed: {}", scenario.label, e);
                        BatchSummaryRow {
                            label: scenario.label.clone(),
                            payoff_years: 0,
                            baseline_interest: 0.0,
                            strategy_interest: 0.0,
                            interest_saved: 0.0,
                            years_saved: 0.0,
                            error: Some(e.to_string()),
                        }
                    }
                })
                .collect();

            if cli.json {
                print_json(&mut out, &summary)?;
            } else {
                writeln!(out, "{:<20} {:>6} {:>16} {:>16} {:>16} {:>8}",
                    "Scenario", "Years", "Base interest", "Strat. interest", "Saved", "Yrs saved")?;
                writeln!(out, "{}", "-".repeat(88))?;
                for row in &summary {
                    match &row.error {
                        None => writeln!(out, "{:<20} {:>6} {:>16.2} {:>16.2} {:>16.2} {:>8.2}",
                            row.label, row.payoff_years, row.baseline_interest,
                            row.strategy_interest, row.interest_saved, row.years_saved)?,
                        Some(e) => writeln!(out, "{:<20} error: {}", row.label, e)?,
                    }
                }
            }

            if let Some(path) = &output.output {
                let mut wtr = csv::Writer::from_path(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                for row in &summary {
                    wtr.serialize(row)?;
                }
                wtr.flush()?;
                writeln!(out, "\nSummary written to: {}", path.display())?;
            }
        }
    }

    Ok(())
}
