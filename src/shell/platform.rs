//! Terminal and CI detection.

use console::Term;

/// Variables whose presence means a CI runner.
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ci_from_lookup(|key| std::env::var(key).ok())
}

/// Check for CI markers using `lookup` in place of the process environment.
pub fn ci_from_lookup<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    CI_MARKERS.iter().any(|key| lookup(*key).is_some())
}

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    !is_ci() && Term::stdout().is_term() && Term::stderr().is_term()
}
