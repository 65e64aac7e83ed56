//! Tab completion for command names and path arguments.
//!
//! One contract serves every case: the caller derives a `CompletionRequest`
//! from the line and gets back an ordered, duplicate-free `CompletionSet`.
//! Matching is by prefix only.

pub mod fs;

use std::path::Path;

pub use fs::{DirEntryInfo, DirectoryLister, FsLister};

/// Syntactic role of the token being completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First word of the line.
    Command,
    /// Any later word.
    Argument,
}

/// Token under completion and its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub token: String,
    pub role: Role,
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Replacement text for the token, directory prefix included.
    pub text: String,
    /// Names a directory (rendered distinctly in candidate lists).
    pub is_dir: bool,
}

/// Ordered unique candidates, bounded by a cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSet {
    candidates: Vec<Candidate>,
    cap: usize,
}

impl CompletionSet {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            candidates: Vec::new(),
            cap,
        }
    }

    /// Add `candidate` unless its text is already present or the set is full.
    ///
    /// Returns whether it was added.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if self.is_full() || self.contains(&candidate.text) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.candidates.iter().any(|c| c.text == text)
    }

    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// The only candidate, when exactly one was found.
    pub fn single(&self) -> Option<&Candidate> {
        match self.candidates.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Candidate texts in discovery order.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Completion engine over an injected lister and environment lookup.
pub struct Completer<L, E> {
    lister: L,
    env_lookup: E,
    max_candidates: usize,
}

impl<L, E> Completer<L, E>
where
    L: DirectoryLister,
    E: Fn(&str) -> Option<String>,
{
    pub fn new(lister: L, env_lookup: E, max_candidates: usize) -> Self {
        Self {
            lister,
            env_lookup,
            max_candidates,
        }
    }

    /// Produce candidates for `request`.
    pub fn complete(&self, request: &CompletionRequest) -> CompletionSet {
        let mut set = CompletionSet::with_cap(self.max_candidates);
        let token = request.token.as_str();
        // Blind tab would enumerate all of PATH or the whole directory.
        if token.is_empty() {
            return set;
        }

        match request.role {
            Role::Argument => self.complete_path(token, false, &mut set),
            Role::Command if token.contains('/') => self.complete_path(token, true, &mut set),
            Role::Command => self.complete_command(token, &mut set),
        }
        tracing::debug!(
            token,
            role = ?request.role,
            found = set.len(),
            "completion finished"
        );
        set
    }

    /// Match entries of the token's directory prefix against its basename.
    fn complete_path(&self, token: &str, executable_only: bool, set: &mut CompletionSet) {
        let (prefix, base) = match token.rfind('/') {
            Some(idx) => token.split_at(idx + 1),
            None => ("", token),
        };
        let dir = if prefix.is_empty() {
            Path::new(".")
        } else {
            Path::new(prefix)
        };
        let Some(entries) = self.list_or_skip(dir, base) else {
            return;
        };

        for entry in entries {
            if set.is_full() {
                break;
            }
            if !entry.name.starts_with(base) {
                continue;
            }
            // Hidden entries only when asked for explicitly, as glob does.
            if entry.name.starts_with('.') && !base.starts_with('.') {
                continue;
            }
            if executable_only && !entry.executable {
                continue;
            }
            let mut text = format!("{prefix}{}", entry.name);
            if entry.is_dir {
                text.push('/');
            }
            set.push(Candidate {
                text,
                is_dir: entry.is_dir,
            });
        }
    }

    /// Search each `PATH` directory in order for executables named `token*`.
    fn complete_command(&self, token: &str, set: &mut CompletionSet) {
        let Some(path_var) = (self.env_lookup)("PATH") else {
            tracing::debug!("PATH is unset; no command candidates");
            return;
        };

        for dir in path_var.split(':').filter(|dir| !dir.is_empty()) {
            if set.is_full() {
                break;
            }
            let Some(entries) = self.list_or_skip(Path::new(dir), token) else {
                continue;
            };
            for entry in entries {
                if set.is_full() {
                    break;
                }
                if entry.is_dir || !entry.executable || !entry.name.starts_with(token) {
                    continue;
                }
                set.push(Candidate {
                    text: entry.name,
                    is_dir: false,
                });
            }
        }
    }

    fn list_or_skip(&self, dir: &Path, prefix: &str) -> Option<Vec<DirEntryInfo>> {
        match self.lister.list(dir, prefix) {
            Ok(entries) => Some(entries),
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable directory");
                None
            }
        }
    }
}
