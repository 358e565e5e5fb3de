mod board;
mod services;
mod settings;
mod source;
mod store;

pub use board::{
    BoardError, BoardHandle, BoardService, BoardSnapshot, ConnectMode, ConnectOutcome,
};
pub use services::{Services, ServicesError};
pub use settings::{keys as settings_keys, SettingsError, SettingsService};
pub use source::{SourceClient, SourceError};
pub use store::{default_db_path, Database};

