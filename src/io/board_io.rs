use crate::io::store::{KeyValueStore, StoreError};
use crate::model::{Board, ThemePreference, default_board};

/// Key holding the serialized board
pub const BOARD_KEY: &str = "board";
/// Key holding the display theme preference
pub const THEME_KEY: &str = "theme";

/// Loads and saves the board (and theme preference) through a key-value store.
#[derive(Debug)]
pub struct ModelStore<S> {
    store: S,
}

impl<S: KeyValueStore> ModelStore<S> {
    pub fn new(store: S) -> Self {
        ModelStore { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Return the stored board, or a fresh default seed when nothing is
    /// stored yet. Malformed stored data is an error, never a silent reset.
    pub fn load(&self) -> Result<Board, StoreError> {
        match self.store.get(BOARD_KEY)? {
            Some(text) => serde_json::from_str(&text).map_err(|e| StoreError::Parse {
                key: BOARD_KEY.to_string(),
                source: e,
            }),
            None => {
                tracing::debug!("no stored board, using default seed");
                Ok(default_board())
            }
        }
    }

    /// Overwrite the stored board.
    pub fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        let text = serde_json::to_string(board).map_err(|e| StoreError::Serialize {
            key: BOARD_KEY.to_string(),
            source: e,
        })?;
        self.store.set(BOARD_KEY, &text)?;
        tracing::debug!(
            columns = board.columns.len(),
            cards = board.card_count(),
            "board saved"
        );
        Ok(())
    }

    /// Forget the stored board and hand back a fresh default seed.
    pub fn reset(&mut self) -> Result<Board, StoreError> {
        self.store.remove(BOARD_KEY)?;
        tracing::info!("board reset to default seed");
        Ok(default_board())
    }

    pub fn load_theme(&self) -> Result<Option<ThemePreference>, StoreError> {
        match self.store.get(THEME_KEY)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Parse {
                    key: THEME_KEY.to_string(),
                    source: e,
                }),
            None => Ok(None),
        }
    }

    pub fn save_theme(&mut self, theme: ThemePreference) -> Result<(), StoreError> {
        let text = serde_json::to_string(&theme).map_err(|e| StoreError::Serialize {
            key: THEME_KEY.to_string(),
            source: e,
        })?;
        self.store.set(THEME_KEY, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::{FileStore, MemoryStore};
    use crate::model::Column;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_board() -> Board {
        Board::new(vec![
            Column::new("col-1", "Backlog", "#8b5cf6").with_cards(["one", "two", "two"]),
            Column::new("col-1700000000000", "Späť 🚀", "#ec4899"),
            Column::new("col-3", "", "#3b82f6").with_cards(["multi\nline", ""]),
        ])
    }

    #[test]
    fn load_without_stored_board_returns_seed() {
        let store = ModelStore::new(MemoryStore::new());
        assert_eq!(store.load().unwrap(), default_board());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = ModelStore::new(MemoryStore::new());
        let board = sample_board();
        store.save(&board).unwrap();
        assert_eq!(store.load().unwrap(), board);
    }

    #[test]
    fn save_overwrites_previous_board() {
        let mut store = ModelStore::new(MemoryStore::new());
        store.save(&sample_board()).unwrap();
        let empty = Board::default();
        store.save(&empty).unwrap();
        assert_eq!(store.load().unwrap(), empty);
    }

    #[test]
    fn malformed_board_fails_fast() {
        let mut inner = MemoryStore::new();
        inner.set(BOARD_KEY, "not json {{{").unwrap();
        let store = ModelStore::new(inner);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { ref key, .. } if key == BOARD_KEY));
    }

    #[test]
    fn wrong_shape_fails_fast() {
        let mut inner = MemoryStore::new();
        inner.set(BOARD_KEY, r#"[{"id":"col-1"}]"#).unwrap();
        let store = ModelStore::new(inner);
        assert!(store.load().is_err());
    }

    #[test]
    fn reset_clears_store_and_returns_seed() {
        let mut store = ModelStore::new(MemoryStore::new());
        store.save(&sample_board()).unwrap();

        let seed = store.reset().unwrap();
        assert_eq!(seed, default_board());
        assert!(!store.inner().contains(BOARD_KEY));
        assert_eq!(store.load().unwrap(), default_board());
    }

    #[test]
    fn reset_then_load_gives_seeded_columns() {
        let mut store = ModelStore::new(MemoryStore::new());
        store.reset().unwrap();
        let board = store.load().unwrap();
        let shape: Vec<(&str, usize)> = board
            .columns
            .iter()
            .map(|c| (c.title.as_str(), c.cards.len()))
            .collect();
        assert_eq!(shape, vec![("To Do", 2), ("In Progress", 1), ("Done", 1)]);
    }

    #[test]
    fn theme_is_stored_separately_from_board() {
        let mut store = ModelStore::new(MemoryStore::new());
        assert_eq!(store.load_theme().unwrap(), None);

        store.save_theme(ThemePreference::Light).unwrap();
        assert_eq!(store.load_theme().unwrap(), Some(ThemePreference::Light));

        // Resetting the board keeps the theme
        store.reset().unwrap();
        assert_eq!(store.load_theme().unwrap(), Some(ThemePreference::Light));
    }

    #[test]
    fn file_backed_round_trip() {
        let tmp = TempDir::new().unwrap();
        let board = sample_board();
        {
            let mut store = ModelStore::new(FileStore::open(tmp.path()).unwrap());
            store.save(&board).unwrap();
        }
        let reopened = ModelStore::new(FileStore::open(tmp.path()).unwrap());
        assert_eq!(reopened.load().unwrap(), board);
    }
}
