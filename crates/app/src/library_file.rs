//! File-backed library store: the in-memory store serialized to a JSON
//! file with write-to-temp-then-rename, so a crash mid-save never leaves a
//! torn catalog behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use game_core::library::{
    Book, LibraryStore, MemoryStore, NewBook, NewSpell, Spell, StoreError, Wizard,
};
use directories::ProjectDirs;

use crate::APP_NAME;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|project_dirs| {
            let mut path = project_dirs.data_dir().to_path_buf();
            path.push("library.json");
            path
        })
    }

    /// Open an existing catalog or start a fresh one if the file does not
    /// exist yet. A present-but-unreadable file is an error, not data loss.
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let inner = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => MemoryStore::new(),
            Err(err) => return Err(err),
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.write_atomic().map_err(|err| StoreError::Backend(err.to_string()))
    }

    fn write_atomic(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.inner).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl LibraryStore for FileStore {
    fn books(&self) -> Result<Vec<Book>, StoreError> {
        self.inner.books()
    }

    fn book(&self, id: u64) -> Result<Book, StoreError> {
        self.inner.book(id)
    }

    fn create_book(&mut self, book: NewBook) -> Result<Book, StoreError> {
        let created = self.inner.create_book(book)?;
        self.persist()?;
        Ok(created)
    }

    fn update_book(&mut self, book: Book) -> Result<(), StoreError> {
        self.inner.update_book(book)?;
        self.persist()
    }

    fn delete_book(&mut self, id: u64) -> Result<(), StoreError> {
        self.inner.delete_book(id)?;
        self.persist()
    }

    fn spells(&self) -> Result<Vec<Spell>, StoreError> {
        self.inner.spells()
    }

    fn create_spell(&mut self, spell: NewSpell) -> Result<Spell, StoreError> {
        let created = self.inner.create_spell(spell)?;
        self.persist()?;
        Ok(created)
    }

    fn update_spell(&mut self, spell: Spell) -> Result<(), StoreError> {
        self.inner.update_spell(spell)?;
        self.persist()
    }

    fn delete_spell(&mut self, id: u64) -> Result<(), StoreError> {
        self.inner.delete_spell(id)?;
        self.persist()
    }

    fn wizard(&self) -> Result<Wizard, StoreError> {
        self.inner.wizard()
    }

    fn add_experience(&mut self, amount: u32) -> Result<Wizard, StoreError> {
        let wizard = self.inner.add_experience(amount)?;
        self.persist()?;
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tome(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anon".to_string(),
            chapters: 3,
            genre: Some("Fable".to_string()),
        }
    }

    #[test]
    fn a_fresh_path_opens_an_empty_catalog() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("library.json")).expect("open");
        assert!(store.books().expect("list").is_empty());
        assert_eq!(store.wizard().expect("wizard").level, 1);
    }

    #[test]
    fn mutations_survive_a_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("library.json");

        let mut store = FileStore::open(path.clone()).expect("open");
        let book = store.create_book(tome("Chronicle")).expect("create");
        store.add_experience(12).expect("xp");
        drop(store);

        let reopened = FileStore::open(path).expect("reopen");
        assert_eq!(reopened.book(book.id).expect("get").title, "Chronicle");
        let wizard = reopened.wizard().expect("wizard");
        assert_eq!(wizard.level, 2);
        assert_eq!(wizard.experience, 2);
    }

    #[test]
    fn writes_leave_no_temp_file_behind() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("library.json");

        let mut store = FileStore::open(path.clone()).expect("open");
        store.create_book(tome("A")).expect("create");

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn a_corrupt_catalog_is_reported_not_replaced() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("library.json");
        fs::write(&path, "{ not json").expect("write");

        let err = FileStore::open(path.clone()).expect_err("must fail");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(path.exists(), "the unreadable file must be left in place");
    }

    #[test]
    fn missing_parent_directories_are_created_on_first_write() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/data/library.json");

        let mut store = FileStore::open(path.clone()).expect("open");
        store.create_book(tome("Deep")).expect("create");
        assert!(path.exists());
    }
}
