//! Menu-driven session flow: authentication, ledger actions, reports.

use std::collections::BTreeMap;

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::core::dates;
use crate::core::services::{AuthService, LedgerService, ReportService};
use crate::domain::report::ReportFilter;
use crate::domain::transaction::Transaction;
use crate::domain::user::User;
use crate::storage::UserRepository;

use super::{output, render, CliError};

/// Owns the loaded registry and the handle of the signed-in user for the
/// duration of one interactive run. The core stays stateless; this is the
/// only place session state lives.
pub struct Session<R: UserRepository> {
    repository: R,
    users: BTreeMap<String, User>,
    theme: ColorfulTheme,
}

impl<R: UserRepository> Session<R> {
    pub fn open(repository: R) -> Result<Self, CliError> {
        let users = repository.load_all()?;
        Ok(Self {
            repository,
            users,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn run(&mut self) -> Result<(), CliError> {
        output::info("Personal finance tracker");
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Welcome")
                .items(&["Log in", "Register", "Exit"])
                .default(0)
                .interact()?;
            let key = match choice {
                0 => self.login()?,
                1 => self.register()?,
                _ => return Ok(()),
            };
            if let Some(key) = key {
                self.main_menu(&key)?;
            }
        }
    }

    fn login(&mut self) -> Result<Option<String>, CliError> {
        let login = self.prompt_text("Login")?;
        let password = self.prompt_password()?;
        match AuthService::login(&self.users, &login, &password) {
            Ok(key) => {
                output::success(format!("Welcome back, {}.", self.users[&key].login));
                Ok(Some(key))
            }
            Err(err) => {
                output::error(err);
                Ok(None)
            }
        }
    }

    fn register(&mut self) -> Result<Option<String>, CliError> {
        let login = self.prompt_text("Login")?;
        let password = self.prompt_password()?;
        match AuthService::register(&mut self.users, &login, &password) {
            Ok(key) => {
                self.persist()?;
                output::success(format!("Registered `{}`.", self.users[&key].login));
                Ok(Some(key))
            }
            Err(err) => {
                output::error(err);
                Ok(None)
            }
        }
    }

    fn main_menu(&mut self, key: &str) -> Result<(), CliError> {
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Main menu")
                .items(&[
                    "Add income",
                    "Add expense",
                    "Transfer",
                    "Budgets",
                    "Categories",
                    "Report",
                    "Log out",
                ])
                .default(0)
                .interact()?;
            match choice {
                0 => self.add_transaction(key, true)?,
                1 => self.add_transaction(key, false)?,
                2 => self.transfer(key)?,
                3 => self.budgets_menu(key)?,
                4 => self.categories_menu(key)?,
                5 => self.report_menu(key)?,
                _ => return Ok(()),
            }
        }
    }

    fn add_transaction(&mut self, key: &str, income: bool) -> Result<(), CliError> {
        let category = self.prompt_text("Category")?;
        let Some(amount) = self.prompt_amount("Amount")? else {
            return Ok(());
        };
        let date = self.prompt_text("Date (YYYY-MM-DD, empty for today)")?;
        let description = self.prompt_text("Description")?;
        let Some(user) = self.users.get_mut(key) else {
            return Ok(());
        };
        let result = if income {
            LedgerService::record_income(user, &category, amount, &date, &description)
        } else {
            LedgerService::record_expense(user, &category, amount, &date, &description)
        };
        match result {
            Ok(outcome) => {
                self.persist()?;
                output::success(format!(
                    "Recorded {:.2} under `{}` on {}.",
                    outcome.value.amount, outcome.value.category, outcome.value.date
                ));
                if let Some(notice) = outcome.notice {
                    output::warning(notice);
                }
            }
            Err(err) => output::error(err),
        }
        Ok(())
    }

    fn transfer(&mut self, key: &str) -> Result<(), CliError> {
        let receiver = self.prompt_text("Receiver login")?;
        let Some(amount) = self.prompt_amount("Amount")? else {
            return Ok(());
        };
        let date = self.prompt_text("Date (YYYY-MM-DD, empty for today)")?;
        let description = self.prompt_text("Description")?;
        match LedgerService::transfer(&mut self.users, key, &receiver, amount, &date, &description)
        {
            Ok(outcome) => {
                self.persist()?;
                output::success(format!("Transferred {amount:.2} to `{}`.", receiver.trim()));
                if let Some(notice) = outcome.notice {
                    output::warning(notice);
                }
            }
            Err(err) => output::error(err),
        }
        Ok(())
    }

    fn budgets_menu(&mut self, key: &str) -> Result<(), CliError> {
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Budgets")
                .items(&[
                    "Set budget",
                    "Update budget",
                    "Remove budget",
                    "Show budget status",
                    "Back",
                ])
                .default(0)
                .interact()?;
            match choice {
                0 | 1 => {
                    let category = self.prompt_text("Category")?;
                    let Some(limit) = self.prompt_amount("Limit")? else {
                        continue;
                    };
                    let Some(user) = self.users.get_mut(key) else {
                        continue;
                    };
                    let result = if choice == 0 {
                        LedgerService::set_budget(user, &category, limit)
                    } else {
                        LedgerService::update_budget(user, &category, limit)
                    };
                    match result {
                        Ok(()) => {
                            self.persist()?;
                            output::success("Budget saved.");
                        }
                        Err(err) => output::error(err),
                    }
                }
                2 => {
                    let category = self.prompt_text("Category")?;
                    let Some(user) = self.users.get_mut(key) else {
                        continue;
                    };
                    match LedgerService::remove_budget(user, &category) {
                        Ok(()) => {
                            self.persist()?;
                            output::success("Budget removed.");
                        }
                        Err(err) => output::error(err),
                    }
                }
                3 => {
                    if let Some(user) = self.users.get(key) {
                        let history: Vec<&Transaction> =
                            user.wallet.transactions.iter().collect();
                        let statuses = ReportService::budget_statuses(&user.wallet, &history);
                        if statuses.is_empty() {
                            output::info("No budgets set.");
                        } else {
                            render::print_budget_statuses(&statuses);
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn categories_menu(&mut self, key: &str) -> Result<(), CliError> {
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Categories")
                .items(&["List categories", "Rename category", "Remove category", "Back"])
                .default(0)
                .interact()?;
            match choice {
                0 => {
                    if let Some(user) = self.users.get(key) {
                        render::print_categories(&ReportService::list_categories(&user.wallet));
                    }
                }
                1 => {
                    let old_name = self.prompt_text("Current name")?;
                    let new_name = self.prompt_text("New name")?;
                    let Some(user) = self.users.get_mut(key) else {
                        continue;
                    };
                    match LedgerService::rename_category(user, &old_name, &new_name) {
                        Ok(()) => {
                            self.persist()?;
                            output::success("Category renamed.");
                        }
                        Err(err) => output::error(err),
                    }
                }
                2 => {
                    let category = self.prompt_text("Category")?;
                    let Some(user) = self.users.get_mut(key) else {
                        continue;
                    };
                    match LedgerService::remove_category(user, &category) {
                        Ok(()) => {
                            self.persist()?;
                            output::success("Category removed along with its transactions.");
                        }
                        Err(err) => output::error(err),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn report_menu(&mut self, key: &str) -> Result<(), CliError> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Report")
            .items(&["Full report", "By categories", "By period", "Back"])
            .default(0)
            .interact()?;
        let filter = match choice {
            0 => ReportFilter::default(),
            1 => {
                let raw = self.prompt_text("Categories (comma-separated)")?;
                ReportFilter::for_categories(
                    raw.split(',').map(str::to_string).collect(),
                )
            }
            2 => {
                let from = self.prompt_report_date("From (YYYY-MM-DD, empty for open)")?;
                let to = self.prompt_report_date("To (YYYY-MM-DD, empty for open)")?;
                ReportFilter::for_period(from, to)
            }
            _ => return Ok(()),
        };
        if let Some(user) = self.users.get(key) {
            let report = ReportService::build(&user.wallet, &filter, Vec::new());
            render::print_report(&report);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), CliError> {
        self.repository.save_all(&self.users)?;
        Ok(())
    }

    fn prompt_text(&self, label: &str) -> Result<String, CliError> {
        Ok(Input::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?)
    }

    fn prompt_password(&self) -> Result<String, CliError> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?)
    }

    fn prompt_amount(&self, label: &str) -> Result<Option<f64>, CliError> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        match raw.trim().parse::<f64>() {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                output::error("Expected a numeric amount.");
                Ok(None)
            }
        }
    }

    /// Report date bounds are validated here at entry; the report builder
    /// itself treats unparseable bounds as absent.
    fn prompt_report_date(&self, label: &str) -> Result<Option<String>, CliError> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), &str> {
                if value.trim().is_empty() || dates::parse_iso(value).is_some() {
                    Ok(())
                } else {
                    Err("Expected YYYY-MM-DD")
                }
            })
            .interact_text()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}
