pub mod file_repo;
pub mod memory_repo;

pub use file_repo::FileSettingsRepository;
pub use memory_repo::InMemorySettingsRepository;
