use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{EditEntryCmd, Engine, EntryKind, EntryStore, MoneyCents, MonthYear, NewEntryCmd};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    render,
};

#[derive(Parser, Debug)]
#[command(name = "simplifinance")]
#[command(about = "Monthly income and expense tracker")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the snapshot file path.
    #[arg(long, global = true)]
    pub data: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Month to view, 1-12. Defaults to the current month.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Year to view. Defaults to the current year.
    #[arg(long, global = true, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub year: Option<i32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the month's entries and totals.
    Show,
    /// Add an entry to the viewed month.
    Add(AddArgs),
    /// Change description, amount or date of an entry.
    Edit(EditArgs),
    /// Mark an entry paid, or unpaid again.
    Toggle(IdArgs),
    /// Delete an entry.
    Delete(IdArgs),
    /// Show the occurrences an overdue entry was carried forward from.
    Chain(IdArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Fixed,
    Variable,
}

impl From<KindArg> for EntryKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => EntryKind::Income,
            KindArg::Fixed => EntryKind::FixedExpense,
            KindArg::Variable => EntryKind::VariableExpense,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long = "type", value_enum, default_value_t = KindArg::Variable)]
    kind: KindArg,
    #[arg(long)]
    description: String,
    /// Amount, `.` or `,` as decimal separator.
    #[arg(long, allow_hyphen_values = true)]
    amount: MoneyCents,
    /// YYYY-MM-DD. Defaults to today's day in the viewed month.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Split a variable expense over this many months.
    #[arg(long, default_value_t = 1)]
    installments: u32,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Entry id or unique id prefix.
    id: String,
    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<MoneyCents>,
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Entry id or unique id prefix.
    id: String,
}

impl Cli {
    /// The month to view, defaulting each missing part to today.
    pub fn view(&self) -> Result<MonthYear> {
        let today = MonthYear::current();
        let month = self.month.map_or(today.month(), |m| m - 1);
        let year = self.year.unwrap_or(today.year());
        Ok(MonthYear::new(month, year)?)
    }
}

pub fn run<S: EntryStore>(engine: &mut Engine<S>, command: Command) -> Result<()> {
    match command {
        Command::Show => {}
        Command::Add(args) => {
            let date = match args.date {
                Some(date) => date,
                None => default_day(engine.view())?,
            };
            let cmd = NewEntryCmd::new(
                args.kind.into(),
                args.description,
                args.amount,
                midnight_utc(date),
            )
            .installments(args.installments);
            for entry in engine.submit(cmd)? {
                render::created(&entry);
            }
        }
        Command::Edit(args) => {
            let id = resolve_id(engine, &args.id)?;
            let mut cmd = EditEntryCmd::default();
            cmd.kind = args.kind.map(Into::into);
            cmd.description = args.description;
            cmd.amount = args.amount;
            cmd.date = args.date.map(midnight_utc);
            let updated = engine.edit(id, cmd)?;
            render::updated(&updated);
        }
        Command::Toggle(args) => {
            let id = resolve_id(engine, &args.id)?;
            engine.toggle_paid(id)?;
            render::updated(engine.entry(id)?);
        }
        Command::Delete(args) => {
            let id = resolve_id(engine, &args.id)?;
            let removed = engine.delete(id)?;
            render::deleted(&removed);
        }
        Command::Chain(args) => {
            let id = resolve_id(engine, &args.id)?;
            render::chain(&engine.chain(id)?);
            return Ok(());
        }
    }

    render::month(&engine.month_view());
    Ok(())
}

/// Finds the single entry whose id starts with `prefix`.
pub fn resolve_id<S: EntryStore>(engine: &Engine<S>, prefix: &str) -> Result<Uuid> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return Err(AppError::InvalidArgument("empty id".to_string()));
    }

    let mut matches = engine
        .entries()
        .iter()
        .filter(|e| e.id.to_string().starts_with(&prefix));
    let Some(found) = matches.next() else {
        return Err(AppError::InvalidArgument(format!("no entry with id {prefix}")));
    };
    if matches.next().is_some() {
        return Err(AppError::InvalidArgument(format!(
            "id {prefix} is ambiguous, type more characters"
        )));
    }
    Ok(found.id)
}

/// Today's day of month in `view`, capped at 28 so it exists in every month.
fn default_day(view: MonthYear) -> Result<NaiveDate> {
    let day = Local::now().day().min(28);
    NaiveDate::from_ymd_opt(view.year(), view.month() + 1, day)
        .ok_or_else(|| AppError::InvalidArgument(format!("no day {day} in {view}")))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use engine::{FinancialEntry, MemoryStore};

    use super::*;

    fn engine_with(entries: Vec<FinancialEntry>) -> Engine<MemoryStore> {
        Engine::builder()
            .store(MemoryStore::with_entries(entries))
            .view(MonthYear::new(2, 2025).unwrap())
            .build()
            .unwrap()
    }

    fn entry(description: &str) -> FinancialEntry {
        let march = MonthYear::new(2, 2025).unwrap();
        FinancialEntry::new(
            EntryKind::VariableExpense,
            description,
            MoneyCents::from_reais(10),
            midnight_utc(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            march,
        )
    }

    #[test]
    fn resolves_unique_prefix() {
        let mercado = entry("Mercado");
        let engine = engine_with(vec![mercado.clone()]);
        let prefix = &mercado.id.to_string()[..8];

        assert_eq!(resolve_id(&engine, prefix).unwrap(), mercado.id);
        assert_eq!(
            resolve_id(&engine, &prefix.to_ascii_uppercase()).unwrap(),
            mercado.id
        );
    }

    #[test]
    fn rejects_unknown_or_ambiguous_prefix() {
        let mut a = entry("A");
        let mut b = entry("B");
        a.id = Uuid::parse_str("aaaaaaaa-0000-4000-8000-000000000001").unwrap();
        b.id = Uuid::parse_str("aaaaaaaa-0000-4000-8000-000000000002").unwrap();
        let engine = engine_with(vec![a, b]);

        assert!(resolve_id(&engine, "  ").is_err());
        assert!(resolve_id(&engine, "zzzz").is_err());
        assert!(matches!(
            resolve_id(&engine, "aaaa"),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(resolve_id(&engine, "aaaaaaaa-0000-4000-8000-000000000002").is_ok());
    }

    #[test]
    fn month_flag_is_one_based() {
        let cli = Cli::try_parse_from(["simplifinance", "--month", "1", "--year", "2026"]).unwrap();
        assert_eq!(cli.view().unwrap(), MonthYear::new(0, 2026).unwrap());
        assert!(Cli::try_parse_from(["simplifinance", "--month", "13"]).is_err());
    }

    #[test]
    fn year_flag_is_bounded() {
        assert!(Cli::try_parse_from(["simplifinance", "--year", "2147483647"]).is_err());
        assert!(Cli::try_parse_from(["simplifinance", "--year", "0"]).is_err());
        let cli = Cli::try_parse_from(["simplifinance", "--year", "9999"]).unwrap();
        assert_eq!(cli.view().unwrap().year(), 9999);
    }

    #[test]
    fn default_day_lands_in_viewed_month() {
        let view = MonthYear::new(1, 2025).unwrap();
        let date = default_day(view).unwrap();
        assert_eq!(MonthYear::of(date), view);
    }

    #[test]
    fn edit_can_switch_the_type() {
        let mercado = entry("Mercado");
        let id = mercado.id;
        let mut engine = engine_with(vec![mercado]);
        let cli = Cli::try_parse_from([
            "simplifinance",
            "edit",
            id.to_string().as_str(),
            "--type",
            "fixed",
        ])
        .unwrap();

        run(&mut engine, cli.command.unwrap()).unwrap();

        let edited = engine.entry(id).unwrap();
        assert_eq!(edited.kind, EntryKind::FixedExpense);
        assert_eq!(edited.description, "Mercado");
    }

    #[test]
    fn add_runs_through_the_engine() {
        let mut engine = engine_with(Vec::new());
        let cli = Cli::try_parse_from([
            "simplifinance",
            "add",
            "--type",
            "variable",
            "--description",
            "Geladeira",
            "--amount",
            "300,00",
            "--date",
            "2025-03-15",
            "--installments",
            "3",
        ])
        .unwrap();

        run(&mut engine, cli.command.unwrap()).unwrap();

        assert_eq!(engine.entries().len(), 3);
        assert_eq!(engine.entries()[2].amount, MoneyCents::from_reais(100));
    }
}
