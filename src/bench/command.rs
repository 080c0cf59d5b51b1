use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use super::config::Implementation;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Command failed with {status}")]
    Failed { status: ExitStatus, stderr: String },
}

impl RunError {
    /// Captured standard error of a failed run, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            RunError::Failed { stderr, .. } if !stderr.trim().is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Pick the executable for an implementation.
///
/// PATH wins; the CI install location is only considered when the program
/// isn't on PATH and `ci_env_var` is set. Falls back to the bare name.
pub fn resolve_program(implementation: &Implementation, ci_env_var: &str) -> PathBuf {
    let program = &implementation.program;
    if Path::new(program).components().count() > 1 {
        return PathBuf::from(program);
    }

    if let Some(found) = find_in_path(program) {
        return found;
    }

    let on_ci = env::var_os(ci_env_var).map_or(false, |v| !v.is_empty());
    if on_ci {
        if let Some(fallback) = implementation.ci_fallback.as_ref().filter(|p| p.exists()) {
            debug!("Using CI install of {}: {}", program, fallback.display());
            return fallback.clone();
        }
    }

    PathBuf::from(program)
}

/// First executable named `name` in the directories of PATH
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Run a program to completion in `cwd` and return its wall-clock time.
///
/// The environment is inherited. Both output streams are captured and drained
/// before the clock stops; stdout is dropped, stderr is kept for failures. A
/// non-zero exit yields no duration. There is no timeout.
pub fn run_timed(
    program: &Path,
    args: &[String],
    cwd: &Path,
    stack_limit_kib: u64,
) -> Result<Duration, RunError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    raise_stack_limit(&mut cmd, stack_limit_kib);

    debug!("Executing {} {}", program.display(), args.join(" "));

    let start = Instant::now();
    let output = cmd.output().map_err(|source| RunError::Spawn {
        program: program.display().to_string(),
        source,
    })?;
    let elapsed = start.elapsed();

    if !output.status.success() {
        return Err(RunError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(elapsed)
}

/// Soft stack limit to install given the wanted size and the current
/// limits, or `None` when the current soft limit is already large enough.
/// The result never exceeds the hard limit.
#[cfg(unix)]
fn stack_limit_target(
    wanted: libc::rlim_t,
    current: &libc::rlimit,
) -> Option<libc::rlim_t> {
    let target = wanted.min(current.rlim_max);
    (target > current.rlim_cur).then_some(target)
}

#[cfg(unix)]
fn current_stack_limit() -> io::Result<libc::rlimit> {
    let mut current = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct we hand it
    if unsafe { libc::getrlimit(libc::RLIMIT_STACK, &mut current) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(current)
}

/// Raise the child's soft stack limit to `limit_kib`, clamped to the hard
/// limit. Never lowers an existing limit.
#[cfg(unix)]
fn raise_stack_limit(cmd: &mut Command, limit_kib: u64) {
    use std::os::unix::process::CommandExt;

    if limit_kib == 0 {
        return;
    }
    let wanted = limit_kib.saturating_mul(1024) as libc::rlim_t;

    // Children inherit our limits, so the clamp can be reported up front
    match current_stack_limit() {
        Ok(current) if wanted > current.rlim_max => warn!(
            "Stack limit of {} KiB exceeds the hard limit, using {} KiB",
            limit_kib,
            current.rlim_max / 1024
        ),
        Ok(_) => {}
        Err(e) => warn!("Failed to read the stack limit: {}", e),
    }

    // SAFETY: the closure only calls getrlimit/setrlimit, both async-signal-safe,
    // and touches no memory shared with the parent.
    unsafe {
        cmd.pre_exec(move || {
            let current = current_stack_limit()?;
            if let Some(target) = stack_limit_target(wanted, &current) {
                let raised = libc::rlimit {
                    rlim_cur: target,
                    rlim_max: current.rlim_max,
                };
                if libc::setrlimit(libc::RLIMIT_STACK, &raised) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }
            Ok(())
        });
    }
}

#[cfg(not(unix))]
fn raise_stack_limit(_cmd: &mut Command, _limit_kib: u64) {}
