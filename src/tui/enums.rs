//! Enumerations for the command loop.

/// One parsed line of main-menu input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuCommand {
    AddCategory,
    AddTask,
    SortCategory,
    SaveAndExit,
    ViewOrEditTask,
    /// `f <n>`; the raw argument is validated against the category list later.
    ToggleFold(Option<usize>),
    Invalid,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuCommand::AddCategory,
            "2" => MenuCommand::AddTask,
            "3" => MenuCommand::SortCategory,
            "4" => MenuCommand::SaveAndExit,
            "5" => MenuCommand::ViewOrEditTask,
            other => match other.strip_prefix("f ") {
                Some(arg) => MenuCommand::ToggleFold(arg.trim().parse().ok()),
                None => MenuCommand::Invalid,
            },
        }
    }
}

/// Answer to the view-or-modify prompt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskAction {
    View,
    Modify,
}

impl TaskAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "v" | "view" => Some(TaskAction::View),
            "m" | "modify" => Some(TaskAction::Modify),
            _ => None,
        }
    }
}

/// The single field changed by a modify.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditField {
    Name,
    Url,
    Priority,
    Note,
    ToggleCompleted,
}

impl EditField {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(EditField::Name),
            "2" => Some(EditField::Url),
            "3" => Some(EditField::Priority),
            "4" => Some(EditField::Note),
            "5" => Some(EditField::ToggleCompleted),
            _ => None,
        }
    }
}
