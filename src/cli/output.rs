use colored::Colorize;
use std::fmt;

pub fn info(message: impl fmt::Display) {
    println!("{message}");
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green().bold(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow().bold(), message.to_string().yellow());
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red().bold(), message.to_string().red());
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {title} ===").bold());
}
