//! Interactive command loop.
//!
//! Each turn the loop re-applies every category's sort mode, redraws the whole
//! model, prints the menu and dispatches one line of input. Categories and
//! tasks are addressed by their current position, so a sort changes which
//! task a given index refers to on the next turn.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use log::{debug, error, info, warn};

use crate::db::Database;
use crate::fields::SortMode;
use crate::task::{Category, Task};
use crate::tui::enums::{EditField, MenuCommand, TaskAction};
use crate::tui::input::{parse_index, parse_priority, parse_yes, Prompter};
use crate::tui::render::Renderer;
use crate::tui::style::Style;

/// Errors that end the command loop early.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("standard input closed")]
    InputClosed,
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Application state: the model, where it is saved, and per-session fold flags.
pub struct App<S: Style> {
    pub db: Database,
    data_path: PathBuf,
    /// One flag per category; folded categories show only their header.
    folded: Vec<bool>,
    /// Shown under the next frame, after the screen has been cleared.
    status_message: Option<String>,
    style: S,
}

impl<S: Style> App<S> {
    /// Every category starts folded.
    pub fn new(db: Database, data_path: PathBuf, style: S) -> Self {
        let folded = vec![true; db.categories.len()];
        App {
            db,
            data_path,
            folded,
            status_message: None,
            style,
        }
    }

    /// Start with a message already queued for the first frame.
    pub fn with_status(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Run until save & exit, or until input ends (which also saves).
    pub fn run<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        info!("Command loop started with {} categories", self.db.categories.len());
        loop {
            self.draw(p)?;
            let outcome = match p.read_line() {
                Ok(line) => self.dispatch(&line, p),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(AppError::InputClosed) => {
                    warn!("Input closed, saving before exit");
                    p.say("")?;
                    self.save(p)?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        info!("Command loop finished");
        Ok(())
    }

    /// Sort, clear the screen, draw every category, any pending status line
    /// and the menu.
    fn draw<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        self.db.apply_sorts();
        queue!(p.output, MoveTo(0, 0), Clear(ClearType::All))?;
        let renderer = Renderer::new(&self.style);
        let frame = renderer.categories(&self.db.categories, &self.folded);
        p.print(&frame)?;
        if let Some(message) = self.status_message.take() {
            p.say(&format!("\n{message}"))?;
        }
        p.print(&renderer.menu())?;
        p.output.flush()?;
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(&mut self, line: &str, p: &mut Prompter<R, W>) -> Result<Flow, AppError> {
        let command = MenuCommand::parse(line);
        debug!("Menu input {:?} -> {:?}", line, command);
        match command {
            MenuCommand::AddCategory => self.add_category(p)?,
            MenuCommand::AddTask => self.add_task(p)?,
            MenuCommand::SortCategory => self.sort_category(p)?,
            MenuCommand::SaveAndExit => {
                self.save(p)?;
                return Ok(Flow::Exit);
            }
            MenuCommand::ViewOrEditTask => self.view_or_edit_task(p)?,
            MenuCommand::ToggleFold(index) => self.toggle_fold(index, p)?,
            MenuCommand::Invalid => {
                warn!("Invalid menu option {:?}", line);
                self.set_status("Invalid option.");
            }
        }
        Ok(Flow::Continue)
    }

    fn add_category<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        let name = p.ask("Enter new category name: ")?;
        info!("Added category {:?}", name);
        self.db.categories.push(Category::new(&name));
        self.folded.push(true);
        Ok(())
    }

    fn add_task<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        if self.db.categories.is_empty() {
            self.set_status("No categories. Add one first.");
            return Ok(());
        }
        let Some(ci) = self.select_category(p)? else {
            return Ok(());
        };

        let name = p.ask("Task Name: ")?;
        let url = p.ask("Task URL: ")?;
        let priority = parse_priority(&p.ask("Priority (1 = high): ")?);
        let note = p.ask("Note: ")?;
        let completed = parse_yes(&p.ask("Completed? (y/n): ")?);

        let cat = &mut self.db.categories[ci];
        info!("Added task {:?} to category {} ({:?})", name, ci, cat.name);
        cat.tasks.push(Task {
            name,
            url,
            priority,
            note,
            completed,
        });
        Ok(())
    }

    fn sort_category<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        let Some(ci) = self.select_category(p)? else {
            return Ok(());
        };
        let answer = p.ask("Sort by [priority/completed/none]: ")?;
        match answer.parse::<SortMode>() {
            Ok(mode) => {
                info!("Category {} now sorted by {:?}", ci, mode);
                self.db.categories[ci].sort_by = mode;
            }
            Err(e) => {
                warn!("{e}");
                self.set_status("Invalid sort option.");
            }
        }
        Ok(())
    }

    fn view_or_edit_task<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        let Some(ci) = self.select_category(p)? else {
            return Ok(());
        };
        if self.db.categories[ci].tasks.is_empty() {
            self.set_status("No tasks in this category.");
            return Ok(());
        }
        let Some(ti) = self.select_task(ci, p)? else {
            return Ok(());
        };

        match TaskAction::parse(&p.ask("View or Modify? [v/m]: ")?) {
            Some(TaskAction::View) => {
                let details = Renderer::new(&self.style).task_details(&self.db.categories[ci].tasks[ti]);
                p.print(&details)?;
                p.say("\nPress Enter to continue...")?;
                p.output.flush()?;
                p.read_line()?;
            }
            Some(TaskAction::Modify) => self.modify_task(ci, ti, p)?,
            None => self.set_status("Invalid option."),
        }
        Ok(())
    }

    fn modify_task<R: BufRead, W: Write>(&mut self, ci: usize, ti: usize, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        p.say("\nWhich field to modify?")?;
        p.say("[1] Name")?;
        p.say("[2] URL")?;
        p.say("[3] Priority")?;
        p.say("[4] Note")?;
        p.say("[5] Completed (toggle)")?;
        let choice = p.ask("Choose: ")?;

        let Some(field) = EditField::parse(&choice) else {
            self.set_status("Invalid choice.");
            return Ok(());
        };
        let value = match field {
            EditField::Name => Some(p.ask("New Name: ")?),
            EditField::Url => Some(p.ask("New URL: ")?),
            EditField::Priority => Some(p.ask("New Priority: ")?),
            EditField::Note => Some(p.ask("New Note: ")?),
            EditField::ToggleCompleted => None,
        };

        let task = &mut self.db.categories[ci].tasks[ti];
        match (field, value) {
            (EditField::Name, Some(v)) => task.name = v,
            (EditField::Url, Some(v)) => task.url = v,
            (EditField::Priority, Some(v)) => task.priority = parse_priority(&v),
            (EditField::Note, Some(v)) => task.note = v,
            _ => task.completed = !task.completed,
        }
        info!("Modified {:?} of task {} in category {}", field, ti, ci);
        Ok(())
    }

    fn toggle_fold<R: BufRead, W: Write>(&mut self, index: Option<usize>, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        match index.filter(|&i| i < self.db.categories.len()) {
            Some(i) => {
                self.folded[i] = !self.folded[i];
                debug!("Category {} folded: {}", i, self.folded[i]);
            }
            None => {
                warn!("Invalid fold index {:?}", index);
                self.set_status("Invalid category index");
            }
        }
        Ok(())
    }

    /// List categories and read an index. Prints `Invalid index.` on bad input.
    fn select_category<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<Option<usize>, AppError> {
        p.say("Select category index:")?;
        for (i, cat) in self.db.categories.iter().enumerate() {
            p.say(&format!("[{i}] {}", cat.name))?;
        }
        let answer = p.ask("Index: ")?;
        let index = parse_index(&answer, self.db.categories.len());
        if index.is_none() {
            warn!("Invalid category index {:?}", answer);
            self.set_status("Invalid index.");
        }
        Ok(index)
    }

    fn select_task<R: BufRead, W: Write>(&mut self, ci: usize, p: &mut Prompter<R, W>) -> Result<Option<usize>, AppError> {
        let tasks = &self.db.categories[ci].tasks;
        p.say("Select task index:")?;
        for (i, task) in tasks.iter().enumerate() {
            p.say(&format!("[{i}] {}", task.name))?;
        }
        let answer = p.ask("Index: ")?;
        let index = parse_index(&answer, tasks.len());
        if index.is_none() {
            warn!("Invalid task index {:?}", answer);
            self.set_status("Invalid index.");
        }
        Ok(index)
    }

    /// Persist the model; failures are reported and never abort.
    fn save<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> Result<(), AppError> {
        match self.db.save(&self.data_path) {
            Ok(()) => p.say("Data saved.")?,
            Err(e) => {
                error!("Save failed: {e}");
                p.say(&format!("Error saving: {e}"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::style::PlainStyle;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Session {
        app: App<PlainStyle>,
        output: String,
        _dir: TempDir,
    }

    fn run_with(db: Database, script: &str) -> Session {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut app = App::new(db, path, PlainStyle);
        let mut p = Prompter::new(Cursor::new(script.to_string()), Vec::new());
        app.run(&mut p).unwrap();
        Session {
            app,
            output: String::from_utf8(p.output).unwrap(),
            _dir: dir,
        }
    }

    fn run(script: &str) -> Session {
        run_with(Database::default(), script)
    }

    fn task(name: &str, priority: i64) -> Task {
        Task {
            name: name.into(),
            priority,
            ..Task::default()
        }
    }

    fn one_category(tasks: Vec<Task>) -> Database {
        let mut cat = Category::new("Languages");
        cat.tasks = tasks;
        Database::with_categories(vec![cat])
    }

    fn saved(session: &Session) -> Database {
        Database::load(&session.app.data_path).unwrap()
    }

    #[test]
    fn test_add_category_and_task_then_save_round_trips() {
        let s = run("1\nLanguages\n2\n0\nRust\nhttps://rust-lang.org\n1\nownership model\nn\n4\n");
        assert!(s.output.ends_with("Data saved.\n"));

        let reloaded = saved(&s);
        assert_eq!(reloaded.categories.len(), 1);
        let cat = &reloaded.categories[0];
        assert_eq!(cat.name, "Languages");
        assert_eq!(cat.sort_by, SortMode::Unset);
        assert_eq!(
            cat.tasks,
            vec![Task {
                name: "Rust".into(),
                url: "https://rust-lang.org".into(),
                priority: 1,
                note: "ownership model".into(),
                completed: false,
            }]
        );
        let raw = std::fs::read_to_string(&s.app.data_path).unwrap();
        assert!(raw.contains("\"SortBy\": \"\""));
    }

    #[test]
    fn test_task_lands_only_in_selected_category() {
        let db = Database::with_categories(vec![Category::new("A"), Category::new("B"), Category::new("C")]);
        let s = run_with(db, "2\n1\nSICP\n\n2\nwizard book\nY\n4\n");
        let cats = &s.app.db.categories;
        assert!(cats[0].tasks.is_empty());
        assert!(cats[2].tasks.is_empty());
        assert_eq!(cats[1].tasks.len(), 1);
        assert_eq!(cats[1].tasks[0].note, "wizard book");
        assert!(cats[1].tasks[0].completed);
    }

    #[test]
    fn test_non_numeric_priority_becomes_zero() {
        let s = run_with(one_category(vec![]), "2\n0\nTokio\n\nsoon\n\nmaybe\n4\n");
        let t = &s.app.db.categories[0].tasks[0];
        assert_eq!(t.priority, 0);
        assert!(!t.completed);
    }

    #[test]
    fn test_add_task_without_categories_is_rejected() {
        let s = run("2\n4\n");
        assert!(s.output.contains("No categories. Add one first."));
        assert!(s.app.db.categories.is_empty());
    }

    #[test]
    fn test_out_of_range_or_non_numeric_index_changes_nothing() {
        let before = one_category(vec![task("a", 1)]);
        let expected = before.categories.clone();
        let s = run_with(before, "2\n1\n2\nzero\n3\n-1\n5\n7\n5\n0\n3\n4\n");
        assert_eq!(s.output.matches("Invalid index.").count(), 5);
        assert_eq!(s.app.db.categories, expected);
    }

    #[test]
    fn test_sort_by_priority_reorders_on_next_draw() {
        let s = run_with(
            one_category(vec![task("five", 5), task("one", 1), task("three", 3)]),
            "3\n0\n PRIORITY \n4\n",
        );
        let cat = &s.app.db.categories[0];
        assert_eq!(cat.sort_by, SortMode::Priority);
        let priorities: Vec<i64> = cat.tasks.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, vec![1, 3, 5]);
        assert_eq!(saved(&s).categories[0].tasks, cat.tasks);
    }

    #[test]
    fn test_sort_by_completed_then_none() {
        let mut done = task("done", 1);
        done.completed = true;
        let s = run_with(
            one_category(vec![done, task("open", 2)]),
            "3\n0\ncompleted\n3\n0\nnone\n4\n",
        );
        let cat = &s.app.db.categories[0];
        assert_eq!(cat.sort_by, SortMode::None);
        let names: Vec<&str> = cat.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["open", "done"]);
        assert!(s.output.contains("0: Languages [none]"));
        let raw = std::fs::read_to_string(&s.app.data_path).unwrap();
        assert!(raw.contains("\"SortBy\": \"none\""));
    }

    #[test]
    fn test_unknown_sort_option_is_rejected() {
        let mut db = one_category(vec![]);
        db.categories[0].sort_by = SortMode::Completed;
        let s = run_with(db, "3\n0\nalphabetical\n4\n");
        assert!(s.output.contains("Invalid sort option."));
        assert_eq!(s.app.db.categories[0].sort_by, SortMode::Completed);
    }

    #[test]
    fn test_view_prints_task_details() {
        let s = run_with(one_category(vec![task("Rust", 2)]), "5\n0\n0\nv\n\n4\n");
        assert!(s.output.contains("Full Task Details\n"));
        assert!(s.output.contains("Name: Rust\n"));
        assert!(s.output.contains("Priority: 2\n"));
        assert!(s.output.contains("Completed: false\n"));
        assert!(s.output.contains("Press Enter to continue..."));
    }

    #[test]
    fn test_modify_changes_exactly_one_field() {
        let original = Task {
            name: "Rust".into(),
            url: "https://rust-lang.org".into(),
            priority: 1,
            note: "ownership".into(),
            completed: false,
        };
        let s = run_with(
            one_category(vec![original.clone()]),
            "5\n0\n0\nm\n1\nRust 2024\n5\n0\n0\nM\n3\nurgent\n5\n0\n0\nm\n5\n4\n",
        );
        let t = &s.app.db.categories[0].tasks[0];
        assert_eq!(
            *t,
            Task {
                name: "Rust 2024".into(),
                priority: 0,
                completed: true,
                ..original
            }
        );
    }

    #[test]
    fn test_modify_url_and_note() {
        let s = run_with(
            one_category(vec![task("Rust", 1)]),
            "5\n0\n0\nm\n2\nhttps://doc.rust-lang.org\n5\n0\n0\nm\n4\nread the book\n4\n",
        );
        let t = &s.app.db.categories[0].tasks[0];
        assert_eq!(t.url, "https://doc.rust-lang.org");
        assert_eq!(t.note, "read the book");
    }

    #[test]
    fn test_invalid_view_choice_and_field() {
        let before = one_category(vec![task("Rust", 1)]);
        let expected = before.categories.clone();
        let s = run_with(before, "5\n0\n0\nx\n5\n0\n0\nm\n9\n4\n");
        assert!(s.output.contains("Invalid option."));
        assert!(s.output.contains("Invalid choice."));
        assert_eq!(s.app.db.categories, expected);
    }

    #[test]
    fn test_view_on_empty_category() {
        let s = run_with(one_category(vec![]), "5\n0\n4\n");
        assert!(s.output.contains("No tasks in this category."));
        assert!(!s.output.contains("Select task index:"));
    }

    #[test]
    fn test_fold_toggle_shows_and_hides_table() {
        let db = one_category(vec![task("Rust", 1)]);
        let s = run_with(db.clone(), "f 0\n4\n");
        assert!(!s.app.folded[0]);
        assert!(s.output.contains("Rust         | "));

        let s = run_with(db, "f 0\nf 0\n4\n");
        assert!(s.app.folded[0]);
    }

    #[test]
    fn test_categories_start_folded() {
        let s = run_with(one_category(vec![task("Rust", 1)]), "1\nBooks\n4\n");
        assert!(s.app.folded[0]);
        assert!(s.app.folded[1]);
        assert!(!s.output.contains("Rust         | "));
        assert!(s.output.contains("1: Books []"));
    }

    #[test]
    fn test_invalid_fold_index_is_reported() {
        let s = run_with(one_category(vec![]), "f 3\nf x\n4\n");
        assert_eq!(s.output.matches("Invalid category index").count(), 2);
        assert!(s.app.folded[0]);
    }

    #[test]
    fn test_unknown_option() {
        let s = run("9\nhello\n4\n");
        assert_eq!(s.output.matches("Invalid option.").count(), 2);
        assert!(s.app.db.categories.is_empty());
    }

    #[test]
    fn test_end_of_input_saves() {
        let s = run("1\nLanguages\n");
        assert!(s.output.ends_with("Data saved.\n"));
        assert_eq!(saved(&s).categories, vec![Category::new("Languages")]);
    }

    #[test]
    fn test_end_of_input_mid_prompt_saves_what_was_entered() {
        let s = run("1\nLanguages\n2\n0\nRust\n");
        assert_eq!(saved(&s).categories, vec![Category::new("Languages")]);
    }

    #[test]
    fn test_save_failure_is_reported_and_loop_ends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.json");
        let mut app = App::new(Database::default(), path, PlainStyle);
        let mut p = Prompter::new(Cursor::new("4\n".to_string()), Vec::new());
        app.run(&mut p).unwrap();
        let output = String::from_utf8(p.output).unwrap();
        assert!(output.contains("Error saving: failed to write"));
        assert!(!output.contains("Data saved."));
    }

    /// Output split at each screen clear; index 0 is what precedes the first one.
    fn screens(output: &str) -> Vec<&str> {
        output.split("\x1b[2J").collect()
    }

    #[test]
    fn test_messages_are_shown_after_the_next_clear() {
        let s = run("9\n2\n4\n");
        let screens = screens(&s.output);
        assert_eq!(screens.len(), 4);
        assert!(!screens[1].contains("Invalid option."));

        let shown = screens[2];
        let message = shown.find("Invalid option.").unwrap();
        assert!(message < shown.find("Options:").unwrap());
        assert!(!screens[3].contains("Invalid option."));
        assert!(screens[3].contains("No categories. Add one first."));
    }

    #[test]
    fn test_startup_status_appears_on_first_screen_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut app = App::new(Database::after_failed_load(), path, PlainStyle).with_status("Load error: bad json");
        let mut p = Prompter::new(Cursor::new("f 0\n4\n".to_string()), Vec::new());
        app.run(&mut p).unwrap();
        let output = String::from_utf8(p.output).unwrap();
        let screens = screens(&output);
        assert!(screens[1].contains("Load error: bad json"));
        assert!(screens[2].contains("Invalid category index"));
        assert!(!screens[2].contains("Load error"));
    }

    #[test]
    fn test_each_draw_clears_the_screen() {
        let s = run("9\n4\n");
        assert_eq!(s.output.matches("\x1b[2J").count(), 2);
    }
}
