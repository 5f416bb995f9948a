mod directory;

pub use directory::NotifyDirectoryWatcher;
