use std::fmt;

use crate::actor_framework::Entity;
use crate::forms::FormState;

/// Progress of the last operation a view ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    /// The message stays until dismissed or replaced by the next operation.
    Failed(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Loading => write!(f, "loading"),
            Status::Success => write!(f, "success"),
            Status::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// An open add/edit dialog. No target means a new record is being created.
#[derive(Debug, Clone)]
pub struct Modal<T: Entity> {
    target: Option<T>,
    form: FormState<T>,
}

impl<T: Entity> Modal<T> {
    pub fn create() -> Self {
        Self {
            target: None,
            form: FormState::blank(),
        }
    }

    pub fn edit(record: T) -> Self {
        Self {
            form: FormState::prefilled(&record),
            target: Some(record),
        }
    }

    pub fn title(&self) -> String {
        match &self.target {
            Some(_) => format!("Editar {}", T::RESOURCE.title()),
            None => T::RESOURCE.create_title().to_string(),
        }
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn form(&self) -> &FormState<T> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<T> {
        &mut self.form
    }
}

/// A deletion waiting for the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt<T: Entity> {
    target: T,
    message: String,
}

impl<T: Entity> ConfirmPrompt<T> {
    pub fn new(target: T) -> Self {
        let message = format!(
            "¿Estás seguro de que quieres eliminar {} \"{}\"? Esta acción no se puede deshacer.",
            T::RESOURCE.noun(),
            target.label()
        );
        Self { target, message }
    }

    pub fn title(&self) -> String {
        format!("Eliminar {}", T::RESOURCE.title())
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
