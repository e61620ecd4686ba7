//! Screen routing around the simulation: the overworld plus the bookshelf,
//! spellbook and combat overlays, and the store side effects the
//! simulation hands back as commands.

use std::mem;

use game_core::library::{Book, LibraryStore, NewBook, NewSpell, Spell, SpellSchool, Wizard};
use game_core::quiz::{CannedQuizSource, QuizSession, QuizSource};
use game_core::{Command, Overlay, Sim};

use crate::frame_input::FrameInput;

/// What the open bookshelf is currently showing.
pub enum ShelfMode {
    Browsing,
    Writing(BookDraft),
    Quiz(QuizSession),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Chapters,
}

/// An in-progress book, filled field by field.
#[derive(Clone, Debug)]
pub struct BookDraft {
    pub field: DraftField,
    pub title: String,
    pub author: String,
    pub chapters: String,
}

impl BookDraft {
    fn new() -> Self {
        Self {
            field: DraftField::Title,
            title: String::new(),
            author: String::new(),
            chapters: String::new(),
        }
    }

    fn active_text(&mut self) -> &mut String {
        match self.field {
            DraftField::Title => &mut self.title,
            DraftField::Author => &mut self.author,
            DraftField::Chapters => &mut self.chapters,
        }
    }
}

pub struct AppState {
    pub sim: Sim,
    store: Box<dyn LibraryStore>,
    pub books: Vec<Book>,
    pub spells: Vec<Spell>,
    pub wizard: Option<Wizard>,
    pub shelf_mode: ShelfMode,
    pub shelf_selection: usize,
    pub spell_selection: usize,
    pub status: Option<String>,
    quiz_source: CannedQuizSource,
}

impl AppState {
    pub fn new(world_seed: u64, store: Box<dyn LibraryStore>) -> Self {
        let mut app = Self {
            sim: Sim::new(world_seed),
            store,
            books: Vec::new(),
            spells: Vec::new(),
            wizard: None,
            shelf_mode: ShelfMode::Browsing,
            shelf_selection: 0,
            spell_selection: 0,
            status: None,
            quiz_source: CannedQuizSource,
        };
        app.refresh_catalog();
        app
    }

    /// One rendered frame: feed the simulation, carry out its commands,
    /// then let the open overlay consume the menu-level input.
    pub fn frame(&mut self, input: &FrameInput) {
        let mut frame = input.frame;
        // While a draft or quiz is open, Escape backs out of it instead of
        // closing the whole shelf.
        if matches!(self.sim.state().overlay, Overlay::Bookshelf)
            && !matches!(self.shelf_mode, ShelfMode::Browsing)
        {
            frame.cancel = false;
        }

        for command in self.sim.tick(&frame) {
            self.run_command(command);
        }

        match self.sim.state().overlay {
            Overlay::Bookshelf => self.shelf_frame(input),
            Overlay::Spellbook => self.spellbook_frame(input),
            Overlay::None | Overlay::Combat => {
                self.shelf_mode = ShelfMode::Browsing;
            }
        }
    }

    /// Fire-and-forget side effects: applied once, failures logged and
    /// never retried.
    fn run_command(&mut self, command: Command) {
        match command {
            Command::AwardXp { amount } => match self.store.add_experience(amount) {
                Ok(wizard) => {
                    self.status = Some(format!("Gained {amount} Experience!"));
                    self.wizard = Some(wizard);
                }
                Err(err) => eprintln!("experience award failed: {err}"),
            },
        }
    }

    fn refresh_catalog(&mut self) {
        match self.store.books() {
            Ok(books) => self.books = books,
            Err(err) => eprintln!("book list unavailable: {err}"),
        }
        match self.store.spells() {
            Ok(spells) => self.spells = spells,
            Err(err) => eprintln!("spell list unavailable: {err}"),
        }
        match self.store.wizard() {
            Ok(wizard) => self.wizard = Some(wizard),
            Err(err) => eprintln!("wizard record unavailable: {err}"),
        }
        self.shelf_selection = self.shelf_selection.min(self.books.len().saturating_sub(1));
        self.spell_selection = self.spell_selection.min(self.spells.len().saturating_sub(1));
    }

    fn shelf_frame(&mut self, input: &FrameInput) {
        let mode = mem::replace(&mut self.shelf_mode, ShelfMode::Browsing);
        self.shelf_mode = match mode {
            ShelfMode::Browsing => self.browse_shelf(input),
            ShelfMode::Writing(draft) => self.write_draft(draft, input),
            ShelfMode::Quiz(session) => self.run_quiz(session, input),
        };
    }

    fn browse_shelf(&mut self, input: &FrameInput) -> ShelfMode {
        if input.ui.menu_up {
            self.shelf_selection = self.shelf_selection.saturating_sub(1);
        }
        if input.ui.menu_down && self.shelf_selection + 1 < self.books.len() {
            self.shelf_selection += 1;
        }

        if input.ui.new_entry {
            return ShelfMode::Writing(BookDraft::new());
        }

        if input.ui.delete_entry
            && let Some(book) = self.books.get(self.shelf_selection).cloned()
        {
            match self.store.delete_book(book.id) {
                Ok(()) => {
                    self.status = Some(format!("\"{}\" burned.", book.title));
                    self.refresh_catalog();
                }
                Err(err) => eprintln!("failed to burn \"{}\": {err}", book.title),
            }
        }

        if input.ui.quiz
            && let Some(book) = self.books.get(self.shelf_selection)
        {
            match self.quiz_source.generate(&book.title, &book.author, book.chapters) {
                Ok(quiz) => return ShelfMode::Quiz(QuizSession::new(quiz)),
                Err(err) => eprintln!("failed to generate quiz data: {err}"),
            }
        }

        ShelfMode::Browsing
    }

    fn write_draft(&mut self, mut draft: BookDraft, input: &FrameInput) -> ShelfMode {
        if input.ui.escape {
            return ShelfMode::Browsing;
        }

        for character in &input.ui.text {
            let field = draft.field;
            let text = draft.active_text();
            let fits = match field {
                DraftField::Chapters => character.is_ascii_digit() && text.len() < 4,
                _ => text.len() < 30,
            };
            if fits {
                text.push(*character);
            }
        }
        if input.ui.backspace {
            draft.active_text().pop();
        }

        if input.ui.confirm {
            match draft.field {
                DraftField::Title => draft.field = DraftField::Author,
                DraftField::Author => draft.field = DraftField::Chapters,
                DraftField::Chapters => return self.sign_and_save(&draft),
            }
        }

        ShelfMode::Writing(draft)
    }

    fn sign_and_save(&mut self, draft: &BookDraft) -> ShelfMode {
        let chapters = draft.chapters.parse().unwrap_or(1);
        let book = NewBook {
            title: draft.title.clone(),
            author: draft.author.clone(),
            chapters,
            genre: None,
        };
        match self.store.create_book(book) {
            Ok(created) => {
                self.status = Some(format!("\"{}\" signed into the shelf.", created.title));
                self.refresh_catalog();
            }
            Err(err) => {
                eprintln!("error saving book: {err}");
                self.status = Some("Failed to save book, sorry cat".to_string());
            }
        }
        ShelfMode::Browsing
    }

    fn run_quiz(&mut self, mut session: QuizSession, input: &FrameInput) -> ShelfMode {
        if input.ui.escape {
            return ShelfMode::Browsing;
        }
        if let Some(option) = input.ui.digit {
            let _ = session.select(option);
        }
        if input.ui.confirm {
            if session.finished() {
                self.status =
                    Some(format!("Trial complete: {} / {}.", session.score(), session.len()));
                return ShelfMode::Browsing;
            }
            session.advance();
        }
        ShelfMode::Quiz(session)
    }

    fn spellbook_frame(&mut self, input: &FrameInput) {
        if input.ui.menu_up {
            self.spell_selection = self.spell_selection.saturating_sub(1);
        }
        if input.ui.menu_down && self.spell_selection + 1 < self.spells.len() {
            self.spell_selection += 1;
        }

        if input.ui.new_entry {
            let ordinal = self.spells.len() as i32 + 1;
            let school = match self.spells.len() % 3 {
                0 => SpellSchool::Destruction,
                1 => SpellSchool::Restoration,
                _ => SpellSchool::Alteration,
            };
            let spell = NewSpell {
                name: format!("Sigil {ordinal}"),
                school,
                dmg_mod: 1,
                dmg: 3 + ordinal,
                effect: ordinal % 2 == 0,
            };
            match self.store.create_spell(spell) {
                Ok(created) => {
                    self.status = Some(format!("Inscribed {}.", created.name));
                    self.refresh_catalog();
                }
                Err(err) => eprintln!("failed to inscribe spell: {err}"),
            }
        }

        if input.ui.upgrade_entry
            && let Some(spell) = self.spells.get(self.spell_selection).cloned()
        {
            let mut upgraded = spell;
            upgraded.dmg += 1;
            match self.store.update_spell(upgraded.clone()) {
                Ok(()) => {
                    self.status = Some(format!("{} sharpened to {} dmg.", upgraded.name, upgraded.dmg));
                    self.refresh_catalog();
                }
                Err(err) => eprintln!("failed to update spell: {err}"),
            }
        }

        if input.ui.delete_entry
            && let Some(spell) = self.spells.get(self.spell_selection).cloned()
        {
            match self.store.delete_spell(spell.id) {
                Ok(()) => {
                    self.status = Some(format!("{} destroyed.", spell.name));
                    self.refresh_catalog();
                }
                Err(err) => eprintln!("failed to destroy spell: {err}"),
            }
        }
    }
}
