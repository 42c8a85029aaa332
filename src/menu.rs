use crate::chart;
use crate::error::{ChartError, InputError, Interrupted};
use crate::export::{export_summary, summary_rows, ExportFormat};
use crate::stats;
use crate::tui::{Console, LineReader};
use crate::types::Review;
use crate::util::is_valid_year;
use log::{debug, warn};
use std::io::Write;
use std::path::PathBuf;

pub fn require(field: &'static str, value: String) -> Result<String, InputError> {
    if value.is_empty() {
        Err(InputError::Empty(field))
    } else {
        Ok(value)
    }
}

pub fn parse_year(value: String) -> Result<String, InputError> {
    let value = require("Year", value)?;
    if is_valid_year(&value) {
        Ok(value)
    } else {
        Err(InputError::InvalidYear(value))
    }
}

/// The interactive session over a dataset loaded once at startup.
pub struct App<'a> {
    reviews: &'a [Review],
    out_dir: PathBuf,
}

impl<'a> App<'a> {
    pub fn new(reviews: &'a [Review], out_dir: PathBuf) -> Self {
        App { reviews, out_dir }
    }

    /// Outer loop. Returns when the user exits or interrupts at this level.
    pub fn run<L: LineReader, W: Write>(&self, console: &mut Console<L, W>) {
        loop {
            let choice = match console.main_menu() {
                Ok(c) => c,
                Err(Interrupted) => {
                    console.show_msg("\nProgram terminated by user.");
                    return;
                }
            };
            let outcome = match choice.to_uppercase().as_str() {
                "A" => self.handle_view(console),
                "B" => self.handle_graph(console),
                "C" => self.handle_export(console),
                "X" => {
                    console.show_msg("Exiting...");
                    return;
                }
                _ => {
                    console.invalid_choice();
                    Ok(())
                }
            };
            if outcome.is_err() {
                console.show_msg("\nOperation cancelled by user.");
            }
        }
    }

    pub fn handle_view<L: LineReader, W: Write>(&self, console: &mut Console<L, W>) -> Result<(), Interrupted> {
        loop {
            let option = console.view_menu()?;
            match option.to_uppercase().as_str() {
                "1" => {
                    let park = match require("Park", console.ask("Park")?) {
                        Ok(p) => p,
                        Err(e) => {
                            console.show_msg(&e.to_string());
                            continue;
                        }
                    };
                    let data = stats::reviews_by_park(self.reviews, &park);
                    console.show_reviews(&data);
                }
                "2" => {
                    let park = console.ask("Park")?;
                    let loc = console.ask("Reviewer location")?;
                    if park.is_empty() || loc.is_empty() {
                        console.show_msg("Park and location cannot be empty.");
                        continue;
                    }
                    let total = stats::count_by_park_and_location(self.reviews, &park, &loc);
                    console.show_msg(&format!("Total: {} review(s)", total));
                }
                "3" => {
                    let park = console.ask("Park")?;
                    let year = console.ask("Year (YYYY)")?;
                    if park.is_empty() || year.is_empty() {
                        console.show_msg("Park and year cannot be empty.");
                        continue;
                    }
                    let year = match parse_year(year) {
                        Ok(y) => y,
                        Err(e) => {
                            console.show_msg(&e.to_string());
                            continue;
                        }
                    };
                    match stats::avg_rating_by_park_year(self.reviews, &park, &year) {
                        Some(avg) => {
                            console.show_msg(&format!("Average for {} in {}: {:.2}", park, year, avg))
                        }
                        None => console.show_msg("No data."),
                    }
                }
                "4" => {
                    let table = stats::avg_rating_per_park_location(self.reviews);
                    console.show_table(&table);
                }
                "X" => return Ok(()),
                _ => console.invalid_choice(),
            }
        }
    }

    pub fn handle_graph<L: LineReader, W: Write>(&self, console: &mut Console<L, W>) -> Result<(), Interrupted> {
        loop {
            let option = console.graph_menu()?;
            let dir = self.out_dir.as_path();
            let rendered = match option.to_uppercase().as_str() {
                "1" => chart::pie_reviews_per_park(&stats::count_per_park(self.reviews), dir),
                "2" => chart::bar_avg_rating_per_park(&stats::avg_rating_per_park(self.reviews), dir),
                "3" | "4" => {
                    let park = match require("Park", console.ask("Park")?) {
                        Ok(p) => p,
                        Err(e) => {
                            console.show_msg(&e.to_string());
                            continue;
                        }
                    };
                    if option == "3" {
                        let data = stats::top_locations_for_park(self.reviews, &park, stats::DEFAULT_TOP_N);
                        chart::bar_top_locations(&data, &park, dir)
                    } else {
                        let data = stats::avg_monthly_rating(self.reviews, &park);
                        chart::bar_monthly_rating(&data, &park, dir)
                    }
                }
                "X" => return Ok(()),
                _ => {
                    console.invalid_choice();
                    continue;
                }
            };
            match rendered {
                Ok(path) => {
                    let shown = std::fs::canonicalize(&path).unwrap_or(path);
                    console.show_chart(&shown)?;
                }
                Err(ChartError::NoData) => console.show_msg("No data."),
                Err(e) => {
                    warn!("Chart failed: {}", e);
                    console.show_msg(&format!("Error generating graph: {}", e));
                }
            }
        }
    }

    pub fn handle_export<L: LineReader, W: Write>(&self, console: &mut Console<L, W>) -> Result<(), Interrupted> {
        let answer = console.export_menu()?;
        let format = match require("Format", answer).and_then(|f| f.parse::<ExportFormat>()) {
            Ok(f) => f,
            Err(InputError::UnknownFormat(f)) => {
                debug!("Rejected export format {:?}", f);
                console.invalid_choice();
                return Ok(());
            }
            Err(e) => {
                console.show_msg(&e.to_string());
                return Ok(());
            }
        };

        let summary = stats::park_summary(self.reviews);
        match export_summary(&summary, format, &self.out_dir) {
            Ok(path) => {
                console.show_summary(&summary_rows(&summary));
                let shown = std::fs::canonicalize(&path).unwrap_or(path);
                console.show_msg(&format!("File saved at {}", shown.display()));
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                console.show_msg(&format!("Error exporting: {}", e));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::Scripted;
    use std::io::Cursor;

    fn sample() -> Vec<Review> {
        vec![
            Review::new(1, 5, "2019-01", "Brazil", "Paris"),
            Review::new(2, 4, "2019-01", "USA", "Paris"),
            Review::new(3, 3, "2019-02", "France", "Paris"),
            Review::new(4, 5, "2020-01", "Brazil", "Orlando"),
            Review::new(5, 4, "2020-01", "USA", "Orlando"),
        ]
    }

    fn run_script(reviews: &[Review], out_dir: PathBuf, script: &str) -> String {
        let mut console = Console::new(Scripted(Cursor::new(script.as_bytes().to_vec())), Vec::new());
        App::new(reviews, out_dir).run(&mut console);
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_validation_helpers() {
        assert_eq!(require("Park", String::new()), Err(InputError::Empty("Park")));
        assert_eq!(parse_year("2019".into()), Ok("2019".to_string()));
        assert_eq!(parse_year("19".into()), Err(InputError::InvalidYear("19".into())));
        assert_eq!(parse_year(String::new()), Err(InputError::Empty("Year")));
    }

    #[test]
    fn test_year_average_and_no_data() {
        let data = sample();
        let out = run_script(
            &data,
            PathBuf::from("."),
            "a\n3\nparis\n2019\n3\nParis\n2020\n3\nParis\n19x\nx\nx\n",
        );
        assert!(out.contains("Average for paris in 2019: 4.00"));
        assert!(out.contains("No data."));
        assert!(out.contains("Year must be in YYYY format."));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_zero_average_is_reported_as_number() {
        let data = vec![Review::new(1, 0, "2019-01", "X", "Paris")];
        let out = run_script(&data, PathBuf::from("."), "A\n3\nParis\n2019\nX\nX\n");
        assert!(out.contains("Average for Paris in 2019: 0.00"));
        assert!(!out.contains("No data."));
    }

    #[test]
    fn test_view_listing_count_and_empty_input() {
        let data = sample();
        let out = run_script(
            &data,
            PathBuf::from("."),
            "A\n1\nOrlando\n2\nParis\nbr\n1\n\n7\nX\nX\n",
        );
        assert!(out.contains("4 | 5⭐ | 2020-01 | Brazil"));
        assert!(out.contains("Total: 2 review(s)"));
        assert!(out.contains("Total: 1 review(s)"));
        assert!(out.contains("Park cannot be empty."));
        assert!(out.contains("Invalid option."));
    }

    #[test]
    fn test_graphs_render_and_wait() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        let out = run_script(
            &data,
            dir.path().to_path_buf(),
            "B\n1\n\n2\n\n3\nParis\n\n4\nParis\n\nX\nX\n",
        );
        for name in ["reviews_per_park", "avg_rating_per_park", "top_locations", "monthly_rating"] {
            assert!(dir.path().join(format!("{}.svg", name)).exists(), "{} missing", name);
        }
        assert_eq!(out.matches("Chart saved at").count(), 4);
        assert_eq!(out.matches("Press Enter to close the chart").count(), 4);
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_graph_failures_stay_in_menu() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        let out = run_script(&data, dir.path().join("missing"), "B\n1\n3\nTokyo\nX\nX\n");
        assert!(out.contains("Error generating graph:"));
        assert!(out.contains("No data."));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        let out = run_script(&data, dir.path().to_path_buf(), "C\ncsv\nC\nxml\nC\n\nX\n");
        assert!(dir.path().join("summary.csv").exists());
        assert!(out.contains("File saved at"));
        assert!(out.contains("Invalid option."));
        assert!(out.contains("Format cannot be empty."));
    }

    #[test]
    fn test_export_failure_does_not_end_session() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        let out = run_script(&data, dir.path().join("missing"), "C\ntxt\nX\n");
        assert!(out.contains("Error exporting:"));
        assert!(out.contains("Exiting..."));
    }

    #[test]
    fn test_end_of_input_in_submenu_cancels_then_terminates() {
        let data = sample();
        let out = run_script(&data, PathBuf::from("."), "A\n");
        assert!(out.contains("Operation cancelled by user."));
        assert!(out.contains("Program terminated by user."));
    }
}
