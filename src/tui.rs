// Text console: menus, prompts and result listings.
//
// Prompts go through a `LineReader`: `rustyline` on a terminal, or any
// `BufRead` for scripted sessions in tests.
use crate::error::Interrupted;
use crate::types::{LocationAverageRow, Review, SummaryRow};
use log::warn;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;
use tabled::{settings::Style, Table};

const BANNER: &str = "
╔════════════════════════════════════════╗
║   DISNEYLAND REVIEWS ANALYSER v1.0     ║
╚════════════════════════════════════════╝
";

/// Source of answers to prompts. Ctrl-C and end of input both come back as
/// `Interrupted`.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<String, Interrupted>;
}

/// Line editor for interactive use. Ctrl-C aborts the pending prompt at once.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Terminal { editor: DefaultEditor::new()? })
    }
}

fn readline_answer(result: Result<String, ReadlineError>) -> Result<String, Interrupted> {
    match result {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(Interrupted),
        Err(e) => {
            warn!("Error reading line: {}", e);
            Err(Interrupted)
        }
    }
}

impl LineReader for Terminal {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<String, Interrupted> {
        let _ = output.flush();
        let answer = readline_answer(self.editor.readline(prompt))?;
        if !answer.is_empty() {
            let _ = self.editor.add_history_entry(answer.as_str());
        }
        Ok(answer)
    }
}

/// Prompts answered from a buffered reader, one line per prompt.
pub struct Scripted<R>(pub R);

impl<R: BufRead> LineReader for Scripted<R> {
    fn read_line(&mut self, prompt: &str, output: &mut dyn Write) -> Result<String, Interrupted> {
        let _ = output.write_all(prompt.as_bytes());
        let _ = output.flush();
        let mut buf = String::new();
        match self.0.read_line(&mut buf) {
            Ok(0) | Err(_) => Err(Interrupted),
            Ok(_) => Ok(buf.trim().to_string()),
        }
    }
}

pub struct Console<L, W> {
    input: L,
    output: W,
}

impl<L: LineReader, W: Write> Console<L, W> {
    pub fn new(input: L, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn print(&mut self, text: &str) {
        let _ = self.output.write_all(text.as_bytes());
        let _ = self.output.flush();
    }

    pub fn show_msg(&mut self, msg: &str) {
        self.print(&format!("{}\n", msg));
    }

    pub fn banner(&mut self) {
        self.print(&format!("{}\n", BANNER));
    }

    pub fn invalid_choice(&mut self) {
        self.show_msg("Invalid option.\n");
    }

    /// Prompt with `label` and return the trimmed answer.
    pub fn ask(&mut self, label: &str) -> Result<String, Interrupted> {
        self.input.read_line(&format!("{}: ", label), &mut self.output)
    }

    pub fn main_menu(&mut self) -> Result<String, Interrupted> {
        self.print("[A] View data\n[B] Graphs\n[C] Export summary\n[X] Exit\n");
        self.ask("Choice")
    }

    pub fn view_menu(&mut self) -> Result<String, Interrupted> {
        self.print(
            "\n=== DATA VIEW MENU ===\n\
             1) List reviews by park\n\
             2) Number of reviews by park and location\n\
             3) Annual rating average by park\n\
             4) Average by park and location (table)\n\
             [X] Back\n",
        );
        self.ask("Choice")
    }

    pub fn graph_menu(&mut self) -> Result<String, Interrupted> {
        self.print(
            "\n=== GRAPHS MENU ===\n\
             1) Reviews by park (pie)\n\
             2) Average rating by park (bar)\n\
             3) Top 10 locations for a park (bar)\n\
             4) Monthly average for a park (bar)\n\
             [X] Back\n",
        );
        self.ask("Choice")
    }

    pub fn export_menu(&mut self) -> Result<String, Interrupted> {
        self.print("\n=== EXPORT SUMMARY === (TXT / CSV / JSON)\n");
        self.ask("Format")
    }

    pub fn show_reviews(&mut self, reviews: &[&Review]) {
        let mut text = String::new();
        for r in reviews {
            text.push_str(&format!("{} | {}⭐ | {} | {}\n", r.id, r.rating, r.period, r.location));
        }
        text.push_str(&format!("Total: {} review(s)\n\n", reviews.len()));
        self.print(&text);
    }

    /// One markdown table per park, locations best first.
    pub fn show_table(&mut self, stats: &BTreeMap<String, BTreeMap<String, f64>>) {
        let mut text = String::new();
        for (park, locs) in stats {
            let mut sorted: Vec<(&String, &f64)> = locs.iter().collect();
            sorted.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));
            let rows: Vec<LocationAverageRow> = sorted
                .into_iter()
                .map(|(loc, avg)| LocationAverageRow {
                    location: loc.clone(),
                    avg: format!("{:.2}", avg),
                })
                .collect();
            text.push_str(&format!("\n### {}\n", park));
            text.push_str(&Table::new(rows).with(Style::markdown()).to_string());
            text.push('\n');
        }
        text.push('\n');
        self.print(&text);
    }

    pub fn show_summary(&mut self, rows: &[SummaryRow]) {
        if rows.is_empty() {
            self.show_msg("(no rows)\n");
            return;
        }
        let table = Table::new(rows.to_vec()).with(Style::markdown()).to_string();
        self.print(&format!("{}\n\n", table));
    }

    /// Point the user at a rendered chart and block until they dismiss it.
    pub fn show_chart(&mut self, path: &Path) -> Result<(), Interrupted> {
        self.show_msg(&format!("Chart saved at {}", path.display()));
        self.ask("Press Enter to close the chart").map(|_| ())
    }
}
