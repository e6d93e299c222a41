//! Setup steps.
//!
//! A [`SetupStep`] is either a package bundle install or a script run. Each
//! step snapshots the digest of its source when it is built, and knows how
//! to lower itself into a [`PlanStep`] with concrete command lines.

use std::path::{Path, PathBuf};

use crate::checksum::{digest_of_file, digest_of_string, ChecksumKind};
use crate::config::schema::StepDecl;
use crate::error::{Result, SetMeUpError};
use crate::plan::{PlanChecksum, PlanStep};
use crate::settings::Settings;
use crate::shell::{execute_check, quote};

/// Display name of bundle install steps.
pub const BUNDLE_STEP_NAME: &str = "Install Brew Bundle";

/// A script given either as a file on disk or as an inline command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    File(PathBuf),
    Inline(String),
}

impl ScriptSource {
    /// Resolve a raw script reference against the declaring document's directory.
    ///
    /// The reference is a file if `base_dir/raw` exists as a regular file;
    /// otherwise it is taken as a literal command.
    pub fn resolve(raw: &str, base_dir: &Path) -> Self {
        let candidate = base_dir.join(raw);
        if candidate.is_file() {
            ScriptSource::File(candidate)
        } else {
            ScriptSource::Inline(raw.to_string())
        }
    }

    /// The path or command this source was built from.
    pub fn origin(&self) -> String {
        match self {
            ScriptSource::File(path) => path.to_string_lossy().to_string(),
            ScriptSource::Inline(command) => command.clone(),
        }
    }

    pub fn checksum_kind(&self) -> ChecksumKind {
        match self {
            ScriptSource::File(_) => ChecksumKind::File,
            ScriptSource::Inline(_) => ChecksumKind::String,
        }
    }

    /// The command line that runs this source.
    pub fn command(&self, settings: &Settings) -> String {
        match self {
            ScriptSource::File(path) => format!(
                "{} {}",
                settings.script_interpreter,
                quote(&path.to_string_lossy())
            ),
            ScriptSource::Inline(command) => command.clone(),
        }
    }

    fn digest(&self) -> Result<String> {
        match self {
            ScriptSource::File(path) => digest_of_file(path),
            ScriptSource::Inline(command) => Ok(digest_of_string(command)),
        }
    }
}

/// The kind-specific part of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Install everything listed in a bundle manifest (a Brewfile).
    Bundle { manifest: PathBuf },
    /// Run a script file or inline command.
    Script { source: ScriptSource },
}

/// A resolved setup step with its checksum snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub name: String,
    pub description: Option<String>,
    pub completion_check: Option<ScriptSource>,
    pub kind: StepKind,
    checksum: String,
}

impl SetupStep {
    /// Build a bundle step, digesting the manifest.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the manifest does not exist.
    pub fn bundle(
        manifest: PathBuf,
        description: Option<String>,
        completion_check: Option<ScriptSource>,
    ) -> Result<Self> {
        Self::build(
            BUNDLE_STEP_NAME.to_string(),
            description,
            completion_check,
            StepKind::Bundle { manifest },
        )
    }

    /// Build a script step, digesting the script content.
    pub fn script(
        source: ScriptSource,
        description: Option<String>,
        completion_check: Option<ScriptSource>,
    ) -> Result<Self> {
        Self::build(
            format!("Execute Script {}", source.origin()),
            description,
            completion_check,
            StepKind::Script { source },
        )
    }

    fn build(
        name: String,
        description: Option<String>,
        completion_check: Option<ScriptSource>,
        kind: StepKind,
    ) -> Result<Self> {
        let mut step = Self {
            name,
            description,
            completion_check,
            kind,
            checksum: String::new(),
        };
        step.checksum = step.compute_checksum()?;
        Ok(step)
    }

    /// Build a step from its declaration in the document at `doc_path`.
    ///
    /// Relative manifest, script and completion check paths are resolved
    /// against `doc_path`'s directory.
    pub fn from_decl(decl: &StepDecl, doc_path: &Path) -> Result<Self> {
        let base_dir = doc_path.parent().unwrap_or_else(|| Path::new(""));
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        let completion_check = non_empty(&decl.completion_check)
            .map(|check| ScriptSource::resolve(&check, base_dir));

        match (non_empty(&decl.brewfile), non_empty(&decl.script)) {
            (Some(brewfile), None) => Self::bundle(
                base_dir.join(brewfile),
                decl.description.clone(),
                completion_check,
            ),
            (None, Some(script)) => Self::script(
                ScriptSource::resolve(&script, base_dir),
                decl.description.clone(),
                completion_check,
            ),
            (Some(_), Some(_)) => Err(SetMeUpError::ConfigurationError {
                path: doc_path.to_path_buf(),
                message: "step declares both 'brewfile' and 'script'".to_string(),
            }),
            (None, None) => Err(SetMeUpError::ConfigurationError {
                path: doc_path.to_path_buf(),
                message: "step must declare one of 'brewfile' or 'script'".to_string(),
            }),
        }
    }

    /// The digest snapshot taken when the step was built.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Digest the step's current source content.
    pub fn compute_checksum(&self) -> Result<String> {
        match &self.kind {
            StepKind::Bundle { manifest } => digest_of_file(manifest),
            StepKind::Script { source } => source.digest(),
        }
    }

    /// The origin and kind used to recompute the checksum later.
    pub fn checksum_origin(&self) -> (String, ChecksumKind) {
        match &self.kind {
            StepKind::Bundle { manifest } => {
                (manifest.to_string_lossy().to_string(), ChecksumKind::File)
            }
            StepKind::Script { source } => (source.origin(), source.checksum_kind()),
        }
    }

    /// Command line that performs the step.
    pub fn execute_command(&self, settings: &Settings) -> String {
        match &self.kind {
            StepKind::Bundle { manifest } => format!(
                "{} bundle --file {} --no-lock",
                settings.bundle_tool,
                quote(&manifest.to_string_lossy())
            ),
            StepKind::Script { source } => source.command(settings),
        }
    }

    /// Command line that exits zero when the step is already satisfied.
    ///
    /// A declared completion check wins; bundle steps otherwise fall back to
    /// `bundle check`, script steps have none.
    pub fn validation_command(&self, settings: &Settings) -> Option<String> {
        if let Some(check) = &self.completion_check {
            return Some(check.command(settings));
        }

        match &self.kind {
            StepKind::Bundle { manifest } => Some(format!(
                "{} bundle check --file {}",
                settings.bundle_tool,
                quote(&manifest.to_string_lossy())
            )),
            StepKind::Script { .. } => None,
        }
    }

    /// Lower into an executable plan step.
    ///
    /// Runs the validation command once to decide whether the step is
    /// already satisfied. No validation command means not satisfied.
    pub fn lower_to_plan_step(&self, settings: &Settings) -> PlanStep {
        let (origin, kind) = self.checksum_origin();
        let validation = self.validation_command(settings);
        let skip = validation
            .as_deref()
            .map(|command| execute_check(command, settings))
            .unwrap_or(false);

        tracing::debug!("Lowered '{}' (skip: {})", self.name, skip);

        PlanStep::new(
            self.name.clone(),
            self.description.clone(),
            PlanChecksum {
                value: self.checksum.clone(),
                origin,
                kind,
            },
            self.execute_command(settings),
            validation,
            skip,
        )
    }
}
