use std::cell::RefCell;
use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{ProgressBar, ProgressStyle};
use pyvm_installer::InstallReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Plain,
    Rich,
}

pub fn current_output_style() -> OutputStyle {
    if std::env::var_os("NO_COLOR").is_some() {
        return OutputStyle::Plain;
    }
    if std::env::var("TERM").map(|term| term == "dumb").unwrap_or(false) {
        return OutputStyle::Plain;
    }
    if !std::io::stdout().is_terminal() {
        return OutputStyle::Plain;
    }
    OutputStyle::Rich
}

pub fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("[{status}] {message}"),
        OutputStyle::Rich => format!("{} {message}", colorize(status_style(status), status)),
    }
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "done" => AnsiColor::BrightGreen,
        "error" => AnsiColor::BrightRed,
        _ => AnsiColor::BrightCyan,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

pub struct StageReporter {
    style: OutputStyle,
    spinner: RefCell<Option<ProgressBar>>,
}

impl StageReporter {
    pub fn new(style: OutputStyle) -> Self {
        Self {
            style,
            spinner: RefCell::new(None),
        }
    }

    pub fn finish(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl InstallReporter for StageReporter {
    fn step(&self, message: &str) {
        self.finish();
        println!("{}", render_status_line(self.style, "step", message));
        if self.style == OutputStyle::Rich {
            let spinner = ProgressBar::new_spinner();
            if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg}") {
                spinner.set_style(template);
            }
            spinner.set_message(message.to_string());
            spinner.enable_steady_tick(Duration::from_millis(80));
            *self.spinner.borrow_mut() = Some(spinner);
        }
    }
}
