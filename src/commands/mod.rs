pub mod add;
pub mod delete;
pub mod list;
pub mod schedule;
pub mod tags;
pub mod times;
pub mod transfer;
pub mod watch;

use eden_core::config::EdenConfig;
use eden_core::editor::{AdminEditor, EditorSettings};
use eden_core::storage::{FileStorage, PollingWatcher, SCHEDULE_KEY, TAGS_KEY};

pub type Editor = AdminEditor<FileStorage, PollingWatcher<FileStorage>>;

/// Resolved configuration plus the storage it points at.
pub struct Context {
    pub config: EdenConfig,
    pub storage: FileStorage,
}

impl Context {
    pub fn new(config: EdenConfig) -> Self {
        let storage = FileStorage::new(config.data_path());
        Context { config, storage }
    }

    pub fn settings(&self) -> EditorSettings {
        EditorSettings {
            prompt_delay: self.config.prompt_delay(),
            time_menu_limit: self.config.time_menu_limit,
        }
    }

    pub fn watcher(&self) -> PollingWatcher<FileStorage> {
        PollingWatcher::new(self.storage.clone(), &[SCHEDULE_KEY, TAGS_KEY])
    }

    pub fn editor(&self) -> Editor {
        AdminEditor::open(self.storage.clone(), self.watcher(), self.settings())
    }
}
