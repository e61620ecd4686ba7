//! The library domain: books, spells, the wizard record, and the storage
//! seam. Persistence is an external collaborator, so its operations are
//! carried as a trait; the in-memory implementation lives here and backs
//! both tests and the file-backed store in the app crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accumulated experience converts to a level every time it reaches this.
pub const XP_PER_LEVEL: u32 = 10;

pub const DEFAULT_WIZARD_NAME: &str = "Wiz";
pub const DEFAULT_WEAPON_TYPE: &str = "Grimoire";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Chapter count, fed to the quiz generator.
    pub chapters: u32,
    pub genre: Option<String>,
}

/// Creation payload; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub chapters: u32,
    pub genre: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellSchool {
    Destruction,
    Restoration,
    Alteration,
}

impl fmt::Display for SpellSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Destruction => "Destruction",
            Self::Restoration => "Restoration",
            Self::Alteration => "Alteration",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: u64,
    pub name: String,
    pub school: SpellSchool,
    pub dmg_mod: i32,
    pub dmg: i32,
    pub effect: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSpell {
    pub name: String,
    pub school: SpellSchool,
    pub dmg_mod: i32,
    pub dmg: i32,
    pub effect: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    pub id: u64,
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub weapon_type: String,
}

impl Wizard {
    pub fn starting() -> Self {
        Self {
            id: 1,
            name: DEFAULT_WIZARD_NAME.to_string(),
            level: 1,
            experience: 0,
            weapon_type: DEFAULT_WEAPON_TYPE.to_string(),
        }
    }

    /// Every full `XP_PER_LEVEL` points converts into one level; the
    /// remainder is kept.
    fn absorb_experience(&mut self, amount: u32) {
        self.experience += amount;
        while self.experience >= XP_PER_LEVEL {
            self.experience -= XP_PER_LEVEL;
            self.level += 1;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The persistence collaborator's operation set. Implementations perform a
/// single attempt per call; retrying is nobody's job.
pub trait LibraryStore {
    fn books(&self) -> Result<Vec<Book>, StoreError>;
    fn book(&self, id: u64) -> Result<Book, StoreError>;
    fn create_book(&mut self, book: NewBook) -> Result<Book, StoreError>;
    fn update_book(&mut self, book: Book) -> Result<(), StoreError>;
    fn delete_book(&mut self, id: u64) -> Result<(), StoreError>;

    fn spells(&self) -> Result<Vec<Spell>, StoreError>;
    fn create_spell(&mut self, spell: NewSpell) -> Result<Spell, StoreError>;
    fn update_spell(&mut self, spell: Spell) -> Result<(), StoreError>;
    fn delete_spell(&mut self, id: u64) -> Result<(), StoreError>;

    fn wizard(&self) -> Result<Wizard, StoreError>;
    fn add_experience(&mut self, amount: u32) -> Result<Wizard, StoreError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    books: Vec<Book>,
    spells: Vec<Spell>,
    wizard: Wizard,
    next_book_id: u64,
    next_spell_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            spells: Vec::new(),
            wizard: Wizard::starting(),
            next_book_id: 1,
            next_spell_id: 1,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryStore for MemoryStore {
    fn books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.clone())
    }

    fn book(&self, id: u64) -> Result<Book, StoreError> {
        self.books.iter().find(|book| book.id == id).cloned().ok_or(StoreError::NotFound)
    }

    fn create_book(&mut self, book: NewBook) -> Result<Book, StoreError> {
        let created = Book {
            id: self.next_book_id,
            title: book.title,
            author: book.author,
            chapters: book.chapters,
            genre: book.genre,
        };
        self.next_book_id += 1;
        self.books.push(created.clone());
        Ok(created)
    }

    fn update_book(&mut self, book: Book) -> Result<(), StoreError> {
        let slot = self
            .books
            .iter_mut()
            .find(|existing| existing.id == book.id)
            .ok_or(StoreError::NotFound)?;
        *slot = book;
        Ok(())
    }

    fn delete_book(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.books.len();
        self.books.retain(|book| book.id != id);
        if self.books.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn spells(&self) -> Result<Vec<Spell>, StoreError> {
        Ok(self.spells.clone())
    }

    fn create_spell(&mut self, spell: NewSpell) -> Result<Spell, StoreError> {
        let created = Spell {
            id: self.next_spell_id,
            name: spell.name,
            school: spell.school,
            dmg_mod: spell.dmg_mod,
            dmg: spell.dmg,
            effect: spell.effect,
        };
        self.next_spell_id += 1;
        self.spells.push(created.clone());
        Ok(created)
    }

    fn update_spell(&mut self, spell: Spell) -> Result<(), StoreError> {
        let slot = self
            .spells
            .iter_mut()
            .find(|existing| existing.id == spell.id)
            .ok_or(StoreError::NotFound)?;
        *slot = spell;
        Ok(())
    }

    fn delete_spell(&mut self, id: u64) -> Result<(), StoreError> {
        let before = self.spells.len();
        self.spells.retain(|spell| spell.id != id);
        if self.spells.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn wizard(&self) -> Result<Wizard, StoreError> {
        Ok(self.wizard.clone())
    }

    fn add_experience(&mut self, amount: u32) -> Result<Wizard, StoreError> {
        self.wizard.absorb_experience(amount);
        Ok(self.wizard.clone())
    }
}
