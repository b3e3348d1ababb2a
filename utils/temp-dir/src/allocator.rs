use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scratch_config::{read_non_empty, Settings, TMP_FILE_DIR, TMP_FILE_PREFIX};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TempDirError};
use crate::suffix::{RandomSuffix, SuffixGenerator};

/// Attempts made before giving up on finding a free name
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Base directory used when `TmpFileDir` is unset
const DEFAULT_BASE_DIR: &str = ".";

/// Appended to the program name when `TmpFilePrefix` is unset
const DEFAULT_PREFIX_TAIL: &str = "-tmp-";

/// Allocator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorOptions {
    /// Upper bound on names tried per allocation. Zero fails without touching
    /// the filesystem.
    pub max_attempts: usize,
}

impl Default for AllocatorOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Base directory and prefix after settings and defaults are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNaming {
    pub base_dir: PathBuf,
    pub prefix: String,
}

impl ResolvedNaming {
    /// `base_dir/<prefix><suffix>/`, always with a trailing separator
    pub fn candidate(&self, suffix: &str) -> PathBuf {
        self
            .base_dir
            .join(format!("{}{}", self.prefix, suffix))
            .join("")
    }
}

/// Creates fresh, uniquely named directories.
///
/// Names are `<prefix><suffix>` under the configured base directory. A name
/// is claimed with a single `create_dir` call, so two allocators racing for
/// the same name cannot both win; the loser draws another suffix.
pub struct TempDirAllocator<S, G = RandomSuffix> {
    settings: S,
    program_name: String,
    options: AllocatorOptions,
    generator: G,
}

impl<S: Settings> TempDirAllocator<S> {
    pub fn new(settings: S, program_name: impl Into<String>) -> Self {
        Self {
            settings,
            program_name: program_name.into(),
            options: AllocatorOptions::default(),
            generator: RandomSuffix::new(),
        }
    }
}

impl<S: Settings, G: SuffixGenerator> TempDirAllocator<S, G> {
    pub fn with_options(mut self, options: AllocatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the suffix source
    pub fn with_generator<H: SuffixGenerator>(self, generator: H) -> TempDirAllocator<S, H> {
        TempDirAllocator {
            settings: self.settings,
            program_name: self.program_name,
            options: self.options,
            generator,
        }
    }

    /// Apply `TmpFileDir` / `TmpFilePrefix`, falling back to defaults when a
    /// setting is absent or empty.
    pub fn resolve_naming(&self) -> ResolvedNaming {
        let base_dir = read_non_empty(&self.settings, TMP_FILE_DIR)
            .unwrap_or_else(|| DEFAULT_BASE_DIR.to_string());
        let prefix = read_non_empty(&self.settings, TMP_FILE_PREFIX)
            .unwrap_or_else(|| format!("{}{DEFAULT_PREFIX_TAIL}", self.program_name));

        ResolvedNaming {
            base_dir: PathBuf::from(base_dir),
            prefix,
        }
    }

    /// Create a fresh directory, printing a confirmation to stdout when
    /// `verbose` is set.
    pub fn allocate(&mut self, verbose: bool) -> Result<PathBuf> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.allocate_to(verbose, &mut out)
    }

    /// [`TempDirAllocator::allocate`] with the confirmation written to `out`.
    pub fn allocate_to<W: Write + ?Sized>(
        &mut self,
        verbose: bool,
        out: &mut W,
    ) -> Result<PathBuf> {
        let naming = self.resolve_naming();
        let path = self.claim(&naming)?;

        if verbose {
            self
                .report(&path, out)
                .map_err(|source| TempDirError::Report {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(path)
    }

    fn claim(&mut self, naming: &ResolvedNaming) -> Result<PathBuf> {
        if self.options.max_attempts > 0 {
            ensure_base_dir(&naming.base_dir)?;
        }

        for attempt in 1..=self.options.max_attempts {
            let candidate = naming.candidate(&self.generator.next_suffix());
            match fs::create_dir(&candidate) {
                Ok(()) => {
                    debug!(path = %candidate.display(), attempt, "created temporary directory");
                    return Ok(candidate);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists && candidate.is_dir() => {
                    debug!(
                        path = %candidate.display(),
                        attempt,
                        "name taken, drawing another suffix"
                    );
                }
                Err(source) => {
                    return Err(TempDirError::Create {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        Err(TempDirError::Exhausted {
            base_dir: naming.base_dir.clone(),
            prefix: naming.prefix.clone(),
            attempts: self.options.max_attempts,
        })
    }

    fn report<W: Write + ?Sized>(&self, path: &Path, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}: Generated temporary directory: {}",
            self.program_name,
            path.display()
        )?;
        out.flush()
    }
}

fn ensure_base_dir(base_dir: &Path) -> Result<()> {
    fs::create_dir_all(base_dir).map_err(|source| TempDirError::Create {
        path: base_dir.to_path_buf(),
        source,
    })
}
