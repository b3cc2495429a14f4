//! Interactive text menu.
//!
//! The menu reads answers line by line from any [`BufRead`] and writes prompts
//! and results to any [`Write`], so the whole session can be scripted in
//! tests. Every failure inside a menu action is printed and logged, and the
//! loop carries on; only output errors end it early. End of input ends the
//! session cleanly.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::error;

use crate::catalog::InsertOutcome;
use crate::config::OutputFormat;
use crate::error::AnnocatError;
use crate::query::{parse_bound, DimensionQuery, TriState};
use crate::session::Session;

const MENU: &str = "1. List Current Files
2. List Records
3. Load File
4. Display Record Info
5. Search
   5.1. Find by category
   5.2. Find by dimension
6. Statistics
7. Exit

Enter your choice: ";

/// Whether the menu loop keeps going after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive menu over a [`Session`].
pub struct Menu<'s, R, W> {
    session: &'s mut Session,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(session: &'s mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), AnnocatError> {
        loop {
            let Some(answer) = self.prompt(MENU)? else {
                return Ok(());
            };

            let choice = match answer.trim().parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(
                        self.output,
                        "\nPlease enter a number between 1 and 7, inclusive.\n"
                    )?;
                    continue;
                }
            };

            let flow = match choice {
                1 => self.list_files()?,
                2 => self.list_records()?,
                3 => self.load_file()?,
                4 => self.display_record()?,
                5 => self.search()?,
                6 => self.statistics()?,
                7 => self.confirm_exit()?,
                _ => {
                    writeln!(self.output, "Please enter a valid number.\n")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn list_files(&mut self) -> Result<Flow, AnnocatError> {
        match self.session.list_files() {
            Ok(files) => {
                writeln!(self.output, "\nThe current files are:")?;
                for file in files {
                    writeln!(self.output, "{file}")?;
                }
                writeln!(self.output)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn list_records(&mut self) -> Result<Flow, AnnocatError> {
        let keys = self.session.list_keys();
        if keys.is_empty() {
            writeln!(self.output, "\n0 records loaded.\n")?;
        } else {
            writeln!(
                self.output,
                "{} records loaded: {}\n",
                keys.len(),
                keys.join(", ")
            )?;
        }
        Ok(Flow::Continue)
    }

    fn load_file(&mut self) -> Result<Flow, AnnocatError> {
        let Some(file) = self.prompt("\nEnter the filename to load: ")? else {
            return Ok(Flow::Quit);
        };
        let file = file.trim();

        match self.session.load_file(file) {
            Ok(loaded) => match loaded.outcome {
                InsertOutcome::Inserted => writeln!(
                    self.output,
                    "Record `{}` was successfully loaded.\n",
                    loaded.key
                )?,
                InsertOutcome::AlreadyPresent => writeln!(
                    self.output,
                    "Record `{}` has already been loaded.\n",
                    loaded.key
                )?,
            },
            Err(err) => {
                error!(file, error = %err, "load failed");
                writeln!(self.output, "Error loading file `{file}`: {err}\n")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn display_record(&mut self) -> Result<Flow, AnnocatError> {
        let Some(key) = self.prompt("\nEnter record name: ")? else {
            return Ok(Flow::Quit);
        };

        let Some(record) = self.session.get_record(key.trim()) else {
            writeln!(self.output, "Record not found.\n")?;
            return Ok(Flow::Continue);
        };

        match self.session.config().output {
            OutputFormat::Text => writeln!(self.output, "\n{record}")?,
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(record)?;
                writeln!(self.output, "\n{json}\n")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow, AnnocatError> {
        let by_category = loop {
            let Some(option) =
                self.prompt("\nEnter 5.1 to search by category or enter 5.2 to search by dimension: ")?
            else {
                return Ok(Flow::Quit);
            };
            match option.trim() {
                "5.1" => break true,
                "5.2" => break false,
                _ => continue,
            }
        };

        let results = if by_category {
            let Some(category) = self.prompt("Enter the category: ")? else {
                return Ok(Flow::Quit);
            };
            self.session.search_by_category(&category)
        } else {
            let Some(query) = self.read_dimension_query()? else {
                return Ok(Flow::Quit);
            };
            self.session.search_by_dimension_and_flags(&query)
        };

        self.emit(&results)?;
        Ok(Flow::Continue)
    }

    fn read_dimension_query(&mut self) -> Result<Option<DimensionQuery>, AnnocatError> {
        let fields = [
            ("min width", "Min width (enter blank for zero): "),
            ("max width", "Max width (enter blank for max): "),
            ("min height", "Min height (enter blank for zero): "),
            ("max height", "Max height (enter blank for max): "),
        ];

        let mut bounds = [None; 4];
        for (slot, (field, text)) in bounds.iter_mut().zip(fields) {
            let Some(bound) = self.read_bound(field, text)? else {
                return Ok(None);
            };
            *slot = bound;
        }

        let Some(difficult) = self.read_tristate("Difficult (yes/no/All): ")? else {
            return Ok(None);
        };
        let Some(truncated) = self.read_tristate("Truncated (yes/no/All): ")? else {
            return Ok(None);
        };

        let [min_width, max_width, min_height, max_height] = bounds;
        Ok(Some(DimensionQuery {
            min_width,
            max_width,
            min_height,
            max_height,
            difficult,
            truncated,
        }))
    }

    // Outer `None` means input ended; inner `None` means "use the default".
    fn read_bound(
        &mut self,
        field: &str,
        text: &str,
    ) -> Result<Option<Option<u32>>, AnnocatError> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_bound(field, &answer) {
                Ok(bound) => return Ok(Some(bound)),
                Err(_) => writeln!(
                    self.output,
                    "Please enter an integer greater than or equal to zero."
                )?,
            }
        }
    }

    fn read_tristate(&mut self, text: &str) -> Result<Option<TriState>, AnnocatError> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<TriState>() {
                Ok(filter) => return Ok(Some(filter)),
                Err(_) => writeln!(self.output, "Please enter yes, no or all.")?,
            }
        }
    }

    fn statistics(&mut self) -> Result<Flow, AnnocatError> {
        let snapshot = self.session.stats_snapshot();
        writeln!(self.output)?;
        self.emit(&snapshot)?;
        Ok(Flow::Continue)
    }

    fn confirm_exit(&mut self) -> Result<Flow, AnnocatError> {
        let Some(answer) = self.prompt("\nAre you sure you want to quit the program (yes/No)? ")?
        else {
            return Ok(Flow::Quit);
        };

        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => {
                writeln!(self.output, "Good bye...")?;
                Ok(Flow::Quit)
            }
            _ => Ok(Flow::Continue),
        }
    }

    /// Print a value as text or JSON depending on the session's output format.
    fn emit<T: Serialize + std::fmt::Display>(&mut self, value: &T) -> Result<(), AnnocatError> {
        match self.session.config().output {
            OutputFormat::Text => writeln!(self.output, "{value}")?,
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                writeln!(self.output, "{json}\n")?;
            }
        }
        Ok(())
    }

    fn report(&mut self, err: &AnnocatError) -> Result<(), AnnocatError> {
        error!(error = %err, "menu action failed");
        writeln!(self.output, "\nError: {err}\n")?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, AnnocatError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use std::fs;
    use std::path::Path;

    const A_XML: &str = "<annotation><filename>A.png</filename><size><width>10</width><height>20</height><depth>3</depth></size><object><name>circle</name><truncated>1</truncated><difficult>0</difficult><bndbox><xmin>0</xmin><ymin>0</ymin><xmax>2</xmax><ymax>3</ymax></bndbox></object></annotation>";
    const B_XML: &str = "<annotation><filename>B.png</filename><size><width>100</width><height>5</height><depth>3</depth></size><object><name>square</name><truncated>0</truncated><difficult>1</difficult><bndbox><xmin>0</xmin><ymin>0</ymin><xmax>4</xmax><ymax>4</ymax></bndbox></object></annotation>";

    fn fixture_dir() -> tempfile::TempDir {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("A.xml"), A_XML).expect("write A");
        fs::write(temp.path().join("B.xml"), B_XML).expect("write B");
        temp
    }

    fn run_script(root: &Path, output: OutputFormat, script: &str) -> (Session, String) {
        let mut session = Session::new(SessionConfig::new(root).with_output(output));
        let mut out = Vec::new();
        Menu::new(&mut session, script.as_bytes(), &mut out)
            .run()
            .expect("menu run");
        (session, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn load_list_and_exit() {
        let temp = fixture_dir();
        let (session, out) = run_script(
            temp.path(),
            OutputFormat::Text,
            "3\nA.xml\n3\nA.xml\n2\n7\nyes\n",
        );

        assert!(out.contains("Record `A` was successfully loaded."));
        assert!(out.contains("Record `A` has already been loaded."));
        assert!(out.contains("1 records loaded: A\n"));
        assert!(out.ends_with("Good bye...\n"));
        assert_eq!(session.list_keys(), vec!["A"]);
    }

    #[test]
    fn invalid_choices_reprompt() {
        let temp = fixture_dir();
        let (_, out) = run_script(temp.path(), OutputFormat::Text, "abc\n9\n2\n");

        assert!(out.contains("Please enter a number between 1 and 7, inclusive."));
        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("0 records loaded."));
    }

    #[test]
    fn dimension_search_reprompts_on_bad_values() {
        let temp = fixture_dir();
        let script = "3\nA.xml\n3\nB.xml\n5\n5.3\n5.2\n-4\n\n50\n\n50\nmaybe\nall\ny\n";
        let (_, out) = run_script(temp.path(), OutputFormat::Text, script);

        assert!(out.contains("Please enter an integer greater than or equal to zero."));
        assert!(out.contains("Please enter yes, no or all."));
        assert!(out.contains("Found 1 record(s):\nA\n"));
    }

    #[test]
    fn category_search_and_missing_record() {
        let temp = fixture_dir();
        let script = "3\nA.xml\n3\nB.xml\n5\n5.1\nsquare\n4\nZ\n";
        let (_, out) = run_script(temp.path(), OutputFormat::Text, script);

        assert!(out.contains("Found 1 record(s):\nB\n"));
        assert!(out.contains("Record not found."));
    }

    #[test]
    fn display_record_and_statistics() {
        let temp = fixture_dir();
        let script = "3\nA.xml\n4\nA\n6\n1\n";
        let (_, out) = run_script(temp.path(), OutputFormat::Text, script);

        assert!(out.contains("Filename: A.png\n"));
        assert!(out.contains("Area: 20 x 10 = 200\n"));
        assert!(out.contains("Number of loaded records: 1\n"));
        assert!(out.contains("Detection categories: circle\n"));
        assert!(out.contains("The current files are:\nA.xml\nB.xml\n"));
    }

    #[test]
    fn load_error_is_reported_and_session_continues() {
        let temp = fixture_dir();
        let (session, out) = run_script(
            temp.path(),
            OutputFormat::Text,
            "3\nghost.xml\n3\nB.xml\n",
        );

        assert!(out.contains("Error loading file `ghost.xml`"));
        assert_eq!(session.list_keys(), vec!["B"]);
    }

    #[test]
    fn json_output_for_search_and_stats() {
        let temp = fixture_dir();
        let script = "3\nA.xml\n5\n5.1\ncircle\n6\n";
        let (_, out) = run_script(temp.path(), OutputFormat::Json, script);

        assert!(out.contains("\"keys\": [\n    \"A\"\n  ]"));
        assert!(out.contains("\"total_detections\": 1"));
    }

    #[test]
    fn declining_exit_keeps_running() {
        let temp = fixture_dir();
        let (_, out) = run_script(temp.path(), OutputFormat::Text, "7\nno\n2\n");

        assert!(!out.contains("Good bye..."));
        assert!(out.contains("0 records loaded."));
    }
}
