//! Plain-text output for the command line.
use engine::{FinancialEntry, MonthView};

fn short_id(entry: &FinancialEntry) -> String {
    entry.id.simple().to_string()[..8].to_string()
}

fn line(entry: &FinancialEntry) -> String {
    let paid = if entry.is_paid { "Pago" } else { "" };
    format!(
        "{id}  {date}  {kind:<8}  {description:<40}  {amount:>14}  {paid}",
        id = short_id(entry),
        date = entry.date.format("%d/%m/%Y"),
        kind = entry.kind.label(),
        description = entry.description,
        amount = entry.amount.to_string(),
    )
    .trim_end()
    .to_string()
}

pub fn month(view: &MonthView) {
    println!("{}", view.month);
    println!();

    if view.entries.is_empty() {
        println!("Nenhum lançamento neste mês.");
    }
    for entry in &view.entries {
        println!("{}", line(entry));
    }

    let summary = &view.summary;
    println!();
    println!("Receitas:         {}", summary.income);
    println!("Despesas Total:   {}", summary.total_expenses);
    println!("Despesas Pagas:   {}", summary.paid_expenses);
    println!("Saldo Disponível: {}", summary.balance);
}

pub fn created(entry: &FinancialEntry) {
    println!("criado:    {}", line(entry));
}

pub fn updated(entry: &FinancialEntry) {
    println!("alterado:  {}", line(entry));
}

pub fn deleted(entry: &FinancialEntry) {
    println!("removido:  {}", line(entry));
}

/// Prints a carried-forward chain, newest occurrence first.
pub fn chain(entries: &[&FinancialEntry]) {
    for (depth, entry) in entries.iter().enumerate() {
        println!(
            "{indent}{month:02}/{year}  {line}",
            indent = "  ".repeat(depth),
            month = entry.month + 1,
            year = entry.year,
            line = line(entry),
        );
    }
}
