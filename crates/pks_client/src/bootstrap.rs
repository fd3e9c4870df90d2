//! Load-or-create the client envelope at its default location.
//!
//! The envelope lives at `~/.pks/client` (or `<dir>/client` when a
//! directory is given). Password prompting is the caller's business —
//! the password arrives as an argument and cryptographic failures
//! propagate unchanged.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::info;

use crate::client::Client;
use crate::error::ClientError;
use crate::keyring::Keyring;

pub const DEFAULT_DIR: &str = ".pks";
pub const DEFAULT_CLIENT_STORE: &str = "client";

/// Load the envelope at the resolved client path, or generate a fresh
/// identity and store it there when the file does not exist. A missing
/// file is the only error handled; everything else (including a wrong
/// password) propagates.
pub fn bootstrap<F>(
    password: &str,
    name: &str,
    client_dir: Option<&Path>,
    sigchain_loc: Option<&str>,
    make_keyring: F,
) -> Result<Client, ClientError>
where
    F: FnOnce() -> Box<dyn Keyring>,
{
    let (dir, file_loc) = resolve_client_file(client_dir, detected_home())?;

    let mut client = Client::new();
    match File::open(&file_loc) {
        Ok(mut file) => {
            client.load(password, &mut file)?;
            client.keyring = Some(make_keyring());
            info!(path = %file_loc.display(), "loaded client envelope");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            client.generate(name, make_keyring, sigchain_loc)?;
            fs::create_dir_all(&dir)?;
            let mut file = File::create(&file_loc)?;
            client.store(password, &mut file)?;
            info!(path = %file_loc.display(), "created client envelope");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(client)
}

/// Where the envelope lives: `<dir>/client` when a directory is given,
/// `<home>/.pks/client` otherwise. Returns the directory and the file
/// path; no home directory is an error.
fn resolve_client_file(
    client_dir: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf), ClientError> {
    let dir = match client_dir {
        Some(dir) => dir.to_path_buf(),
        None => home.ok_or(ClientError::NoHomeDir)?.join(DEFAULT_DIR),
    };
    let file_loc = dir.join(DEFAULT_CLIENT_STORE);
    Ok((dir, file_loc))
}

fn detected_home() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
