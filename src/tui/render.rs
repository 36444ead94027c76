//! Table rendering for categories and tasks.
//!
//! Rendering happens in two steps. [`task_rows`] lays a task out into
//! fixed-width [`TaskRow`] cells (truncation, padding and note wrapping), then
//! [`Renderer`] joins the cells into lines and paints them through a [`Style`].

use crate::fields::PriorityBand;
use crate::task::{Category, Task};
use crate::tui::layout::*;
use crate::tui::style::{Role, Style};

const CHECK_DONE: &str = "[✔]";
const CHECK_OPEN: &str = "[ ]";
const DETAIL_RULE_WIDTH: usize = 60;

/// One printed line of a task, with every cell already sized to its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub name: String,
    /// Visible URL text, truncated and padded.
    pub url: String,
    /// Link target; empty when the task has no URL.
    pub url_target: String,
    pub priority: String,
    pub band: PriorityBand,
    pub note: String,
    pub completed: bool,
    /// True for wrapped note lines after the first; all other cells are blank.
    pub continuation: bool,
}

/// Lay a task out as one row, plus one continuation row per extra note line.
pub fn task_rows(task: &Task) -> Vec<TaskRow> {
    let band = PriorityBand::of(task.priority);
    wrap_note(&task.note, NOTE_WIDTH)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let note = pad_right(&line, NOTE_WIDTH);
            if i == 0 {
                TaskRow {
                    name: fit(&task.name, NAME_WIDTH),
                    url: pad_right(&truncate_with_dots(&task.url, URL_TEXT_WIDTH), URL_WIDTH),
                    url_target: task.url.clone(),
                    priority: fit(&task.priority.to_string(), PRIORITY_WIDTH),
                    band,
                    note,
                    completed: task.completed,
                    continuation: false,
                }
            } else {
                TaskRow {
                    name: " ".repeat(NAME_WIDTH),
                    url: " ".repeat(URL_WIDTH),
                    url_target: String::new(),
                    priority: " ".repeat(PRIORITY_WIDTH),
                    band,
                    note,
                    completed: task.completed,
                    continuation: true,
                }
            }
        })
        .collect()
}

/// Paints categories, tasks and menus with a given [`Style`].
pub struct Renderer<'a, S: Style + ?Sized> {
    style: &'a S,
}

impl<'a, S: Style + ?Sized> Renderer<'a, S> {
    pub fn new(style: &'a S) -> Self {
        Renderer { style }
    }

    fn rule(&self, ch: char, width: usize) -> String {
        self.style.paint(&ch.to_string().repeat(width), Role::Rule)
    }

    fn bar(&self) -> String {
        format!(" {} ", self.style.paint("|", Role::Rule))
    }

    /// `<index>: <name> [<sort>]`, preceded by a blank line.
    pub fn category_header(&self, index: usize, cat: &Category) -> String {
        format!(
            "\n{}: {} [{}]\n",
            self.style.paint(&index.to_string(), Role::Index),
            self.style.paint(&cat.name, Role::Title),
            cat.sort_by
        )
    }

    pub fn column_header(&self) -> String {
        let bar = self.bar();
        let heading = |s: &str, width: usize| self.style.paint(&fit(s, width), Role::Heading);
        format!(
            "{}{bar}{}{bar}{}{bar}{}{bar}{}\n",
            heading("Name", NAME_WIDTH),
            heading("URL", URL_WIDTH),
            heading("Pr", PRIORITY_WIDTH),
            heading("Note", NOTE_WIDTH),
            self.style.paint(" ✓", Role::Heading),
        )
    }

    /// Paint one laid-out row as a full line.
    pub fn task_line(&self, row: &TaskRow) -> String {
        let bar = self.bar();
        let text_role = if row.completed { Role::Done } else { Role::Open };
        let note = self.style.paint(&row.note, text_role);

        if row.continuation {
            // Blank cells stay unpainted and the line stops at the last bar.
            return format!(
                "{}{bar}{}{bar}{}{bar}{note} {}\n",
                row.name,
                row.url,
                row.priority,
                self.style.paint("|", Role::Rule),
            );
        }

        let check = if row.completed {
            self.style.paint(CHECK_DONE, Role::Done)
        } else {
            CHECK_OPEN.to_string()
        };
        let link = self.style.hyperlink(&row.url, &row.url_target);
        format!(
            "{}{bar}{}{bar}{}{bar}{note}{bar}{check}\n",
            self.style.paint(&row.name, text_role),
            self.style.paint(&link, Role::Link),
            self.style.paint(&row.priority, Role::Priority(row.band)),
        )
    }

    /// Header and rule only; used for folded categories.
    pub fn folded_category(&self, index: usize, cat: &Category) -> String {
        let mut out = self.category_header(index, cat);
        out.push_str(&self.rule('-', RULE_WIDTH));
        out.push('\n');
        out
    }

    /// Header, column headings and every task row of a category.
    pub fn category_table(&self, index: usize, cat: &Category) -> String {
        let mut out = self.folded_category(index, cat);
        out.push_str(&self.column_header());
        out.push_str(&self.rule('-', RULE_WIDTH));
        out.push('\n');
        for task in &cat.tasks {
            for row in task_rows(task) {
                out.push_str(&self.task_line(&row));
            }
        }
        out.push('\n');
        out.push_str(&self.rule('=', RULE_WIDTH));
        out.push('\n');
        out
    }

    /// Every category in order; `folded[i]` selects the short form for category `i`.
    ///
    /// Categories without a fold flag are drawn in full.
    pub fn categories(&self, categories: &[Category], folded: &[bool]) -> String {
        categories
            .iter()
            .enumerate()
            .map(|(i, cat)| {
                if folded.get(i).copied().unwrap_or(false) {
                    self.folded_category(i, cat)
                } else {
                    self.category_table(i, cat)
                }
            })
            .collect()
    }

    /// The main menu, ending with the `Choose: ` prompt (no trailing newline).
    pub fn menu(&self) -> String {
        let lines = [
            "\nOptions:",
            "[1] Add Category",
            "[2] Add Task",
            "[3] Sort Category",
            "[4] Save & Exit",
            "[5] View/Edit Task",
            "[f <n>] Fold/Unfold Category",
        ];
        let mut out = String::new();
        for line in lines {
            out.push_str(&self.style.paint(line, Role::Menu));
            out.push('\n');
        }
        out.push_str(&self.style.paint("Choose: ", Role::Menu));
        out
    }

    /// Every field of one task in a fixed block.
    pub fn task_details(&self, task: &Task) -> String {
        let rule = self
            .style
            .paint(&"-".repeat(DETAIL_RULE_WIDTH), Role::Accent);
        let field = |label: &str, value: &str| {
            format!("{}: {}\n", self.style.paint(label, Role::Label), value)
        };
        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&self.style.paint("Full Task Details", Role::Heading));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&field("Name", &task.name));
        out.push_str(&field("URL", &task.url));
        out.push_str(&field("Priority", &task.priority.to_string()));
        out.push_str(&field("Note", &task.note));
        out.push_str(&field("Completed", &task.completed.to_string()));
        out.push_str(&rule);
        out.push('\n');
        out
    }
}
