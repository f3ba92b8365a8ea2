//! Read-only `.netrc` lookup used as the credential fallback.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ferry_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// An entry being assembled while walking the token stream.
#[derive(Default)]
struct Entry {
  machine: String,
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn into_credentials(self, target_machine: &str) -> Option<Credentials> {
    if self.machine != target_machine {
      return None;
    }
    match (self.login, self.password) {
      (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
        Some(Credentials { username, password })
      }
      _ => None,
    }
  }
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted, since tokens are read as one whitespace separated
/// stream. Entries missing a `login` or `password` are ignored, and the first
/// complete entry for the machine wins.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(find_machine(&content, target_machine))
}

fn find_machine(content: &str, target_machine: &str) -> Option<Credentials> {
  // Comments run from `#` to the end of the line
  let mut tokens = content
    .lines()
    .flat_map(|line| line.split('#').next().unwrap_or_default().split_whitespace());
  let mut current: Option<Entry> = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        let Some(name) = tokens.next() else { break };
        if let Some(found) = current.take().and_then(|entry| entry.into_credentials(target_machine)) {
          return Some(found);
        }
        current = Some(Entry {
          machine: name.to_string(),
          ..Entry::default()
        });
      }
      "login" => {
        if let (Some(entry), Some(value)) = (current.as_mut(), tokens.next()) {
          entry.login = Some(value.to_string());
        }
      }
      "password" => {
        if let (Some(entry), Some(value)) = (current.as_mut(), tokens.next()) {
          entry.password = Some(value.to_string());
        }
      }
      _ => {}
    }
  }

  current.and_then(|entry| entry.into_credentials(target_machine))
}
