//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`,
//! through the `test-support` feature).

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend avoids direct `std::fs` calls; these helpers wrap
    //! `cap_std::fs::Dir` so suites can inspect data directories the same way.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Sorted file names inside `directory`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use meals::test_support::cap_fs::list_file_names;
    ///
    /// let dir = tempfile::tempdir()?;
    /// assert!(list_file_names(dir.path())?.is_empty());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn list_file_names(directory: &Path) -> io::Result<Vec<String>> {
        let directory = Dir::open_ambient_dir(directory, ambient_authority())?;
        let mut names = directory
            .entries()?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    /// Read a UTF-8 file relative to `directory`.
    pub fn read_to_string(directory: &Path, file_name: &str) -> io::Result<String> {
        Dir::open_ambient_dir(directory, ambient_authority())?.read_to_string(file_name)
    }
}

pub mod http {
    //! Application wiring for handler and end-to-end tests.

    use std::time::Duration;

    use tempfile::TempDir;
    use zeroize::Zeroizing;

    use crate::wiring::{ServiceSettings, Services, Storage, build_services};

    /// Signing secret used by test services.
    pub const TEST_SECRET: &[u8] = b"test-signing-secret";

    /// Settings with the cheapest bcrypt cost so tests stay fast.
    pub fn test_settings() -> ServiceSettings {
        ServiceSettings {
            token_secret: Zeroizing::new(TEST_SECRET.to_vec()),
            bcrypt_cost: 4,
            storage_timeout: Duration::from_secs(5),
        }
    }

    /// Full service graph over in-memory stores.
    pub fn in_memory_services() -> Services {
        build_services(Storage::in_memory(), &test_settings())
    }

    /// Full service graph over file stores rooted at `data_dir`.
    ///
    /// Building twice over the same directory models a restart.
    pub fn on_disk_services(data_dir: &TempDir) -> Services {
        let storage = Storage::on_disk(data_dir.path())
            .unwrap_or_else(|err| panic!("open storage under {}: {err}", data_dir.path().display()));
        build_services(storage, &test_settings())
    }
}
