use flashdeck_lib::config::Theme;
use flashdeck_lib::flashcards::store::tags_text;
use flashdeck_lib::flashcards::Card;

use crate::app::App;

/// Fields of the add/edit form, in tab order
pub const FORM_FIELDS: [&str; 3] = ["Question", "Answer", "Tags"];

#[derive(Debug, Clone, PartialEq)]
pub struct CardForm {
    /// Card being edited, `None` when adding
    pub editing: Option<String>,
    pub fields: [String; 3],
    pub focus: usize,
}

impl CardForm {
    pub fn new_card() -> Self {
        Self {
            editing: None,
            fields: Default::default(),
            focus: 0,
        }
    }

    pub fn edit(card: &Card) -> Self {
        Self {
            editing: Some(card.id.clone()),
            fields: [card.question.clone(), card.answer.clone(), tags_text(&card.tags)],
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FORM_FIELDS.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }

    pub fn input(&mut self) -> &mut String {
        &mut self.fields[self.focus]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Study,
    Form(CardForm),
    ConfirmDelete { id: String },
}

pub struct TuiState<'a> {
    pub app: &'a mut App,
    pub mode: Mode,
    pub theme: Theme,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl<'a> TuiState<'a> {
    pub fn new(app: &'a mut App) -> Self {
        let theme = app.config.theme;
        Self {
            app,
            mode: Mode::Study,
            theme,
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Step the filter through All, then each tag in the tag universe
    pub fn cycle_filter(&mut self) {
        let tags = self.app.session.tag_universe();
        let next = match self.app.session.view().filter() {
            None => tags.first().cloned(),
            Some(current) => match tags.iter().position(|t| t == current) {
                Some(i) => tags.get(i + 1).cloned(),
                None => tags.first().cloned(),
            },
        };
        self.app.session.set_filter(next);
    }

    pub fn clear_filter(&mut self) {
        self.app.session.set_filter(None);
    }

    pub fn open_add_form(&mut self) {
        self.mode = Mode::Form(CardForm::new_card());
    }

    pub fn open_edit_form(&mut self) {
        match self.app.session.current_card() {
            Some(card) => self.mode = Mode::Form(CardForm::edit(card)),
            None => self.flash_message = Some("No card to edit".to_string()),
        }
    }

    pub fn ask_delete(&mut self) {
        match self.app.session.current_card() {
            Some(card) => self.mode = Mode::ConfirmDelete { id: card.id.clone() },
            None => self.flash_message = Some("No card to delete".to_string()),
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Mode::ConfirmDelete { id } = std::mem::replace(&mut self.mode, Mode::Study) {
            if self.app.session.delete(&id) {
                self.flash_message = Some("Card deleted".to_string());
            }
        }
    }

    /// Submit the form. Validation errors keep the form open.
    pub fn submit_form(&mut self) {
        let Mode::Form(form) = &self.mode else {
            return;
        };
        let [question, answer, tags] = &form.fields;

        let result = match &form.editing {
            Some(id) => self
                .app
                .session
                .edit(id, question, answer, tags)
                .map(|_| "Card updated".to_string()),
            None => self
                .app
                .session
                .add(question, answer, tags)
                .map(|_| "Card added".to_string()),
        };

        match result {
            Ok(message) => {
                self.flash_message = Some(message);
                self.mode = Mode::Study;
            }
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::Study;
    }
}
