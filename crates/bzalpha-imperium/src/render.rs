use std::io::BufRead;
use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use bzalpha_contracts::Department;
use bzalpha_contracts::OrderStatus;
use bzalpha_panel::ConfirmDialog;
use bzalpha_panel::FieldError;
use bzalpha_panel::ListRender;
use bzalpha_panel::Notification;
use bzalpha_panel::NotificationLevel;
use bzalpha_panel::NotificationSink;
use bzalpha_panel::OrderCreationForm;
use bzalpha_panel::OrderRow;
use bzalpha_panel::RankAvatar;
use bzalpha_panel::SelectOption;
use colored::ColoredString;
use colored::Colorize;

/// Prints notifications to the terminal as they arrive.
pub struct TerminalNotifications;

impl NotificationSink for TerminalNotifications {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message.green().bold()),
            NotificationLevel::Error => eprintln!("{}", notification.message.red().bold()),
        }
    }
}

fn avatar(avatar: &RankAvatar) -> ColoredString {
    let badge = format!("{:>5}", avatar.badge());
    match avatar.department {
        Department::Deck => badge.blue().bold(),
        Department::Engine => badge.red().bold(),
        Department::Catering => badge.green().bold(),
        Department::Other => badge.white().bold(),
    }
}

fn status(status: &OrderStatus) -> ColoredString {
    let text = format!("{:<10}", status.as_str());
    match status {
        OrderStatus::Pending => text.yellow(),
        OrderStatus::Completed => text.green(),
        OrderStatus::Other(_) => text.normal(),
    }
}

fn print_row(row: &OrderRow) {
    println!(
        "{} {:<32} {} {}",
        avatar(&row.avatar),
        row.id_label,
        status(&row.status),
        row.details.as_deref().unwrap_or_default().dimmed()
    );
    if let Some(expansion) = &row.expansion {
        for (label, value) in expansion.fields() {
            println!("        {} {}", format!("{label}:").bold(), value);
        }
    }
}

pub fn print_orders(render: &ListRender) {
    match render {
        ListRender::Loading => println!("{}", "Loading...".dimmed()),
        ListRender::Empty => println!("{}", "No Data".dimmed()),
        ListRender::Table(rows) => {
            println!(
                "{:>5} {:<32} {:<10} {}",
                "".bold(),
                "ID".bold(),
                "Status".bold(),
                "Details".bold()
            );
            rows.iter().for_each(print_row);
        }
    }
}

pub fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("{} {}", format!("{}:", error.field).bold(), error.message.red());
    }
}

pub fn print_options(options: &[SelectOption]) {
    if options.is_empty() {
        println!("{}", "No Data".dimmed());
    }
    for option in options {
        println!("{:>8}  {}", option.value.bold(), option.label);
    }
}

pub fn print_ranks() {
    for option in OrderCreationForm::position_options() {
        let avatar = avatar(&RankAvatar::for_position(&option.value));
        println!("{avatar}  {}", option.label);
    }
}

pub fn print_currencies() {
    for option in OrderCreationForm::currency_options() {
        println!("{:>5}  {}", option.value.bold(), option.label);
    }
}

/// Asks the dialog's question on the terminal.
pub fn confirm(dialog: &ConfirmDialog) -> Result<bool> {
    print!(
        "{} [{}/{}] ",
        dialog.title.red().bold(),
        dialog.ok_text,
        dialog.cancel_text
    );
    std::io::stdout().flush().context("Could not write to stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Could not read the answer")?;
    Ok(dialog.confirms(&answer))
}
