/// Eyedropper capability: anything that can hand back a single color.
use std::env;
use std::io::Read;
use std::mem;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::config::SamplerConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("no color picker is available")]
    Unsupported,
    #[error("color picking was cancelled")]
    Cancelled,
    #[error("color picker failed: {0}")]
    Failed(String),
    #[error("color picker returned no #RRGGBB color: {0:?}")]
    InvalidOutput(String),
}

pub trait ColorSampler: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Blocks until the user picks a color, gives up, or `pick` is cancelled.
    fn sample(&self, pick: &PickHandle) -> Result<Rgb, SamplingError>;
}

/// Lets another thread abort one `sample` call. Each pick gets its own handle.
#[derive(Clone, Debug, Default)]
pub struct PickHandle(Arc<Mutex<PickerState>>);

#[derive(Debug, Default)]
enum PickerState {
    #[default]
    Idle,
    Running(Child),
    Cancelled,
}

impl PickHandle {
    /// Kill the picker if it is running; the pick returns `Cancelled` either way.
    pub fn cancel(&self) {
        let mut state = self.lock();
        match mem::replace(&mut *state, PickerState::Cancelled) {
            PickerState::Running(mut child) => {
                debug!(pid = child.id(), "killing color picker");
                if let Err(err) = child.kill() {
                    warn!(error = %err, "failed to kill color picker");
                }
                let _ = child.wait();
            }
            PickerState::Idle | PickerState::Cancelled => {}
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(*self.lock(), PickerState::Cancelled)
    }

    /// Process id of the picker currently running, if any.
    #[cfg(test)]
    pub(crate) fn running_pid(&self) -> Option<u32> {
        match &*self.lock() {
            PickerState::Running(child) => Some(child.id()),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PickerState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the sampler described by the configuration.
pub fn from_config(config: &SamplerConfig) -> Box<dyn ColorSampler> {
    match config.command.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => Box::new(CommandSampler::new(
            program.to_string(),
            config.args.clone(),
        )),
        _ => Box::new(NoSampler),
    }
}

pub struct NoSampler;

impl ColorSampler for NoSampler {
    fn is_supported(&self) -> bool {
        false
    }

    fn sample(&self, _pick: &PickHandle) -> Result<Rgb, SamplingError> {
        Err(SamplingError::Unsupported)
    }
}

/// Runs an external picker (hyprpicker, grabc, ...) and reads the color from stdout.
#[derive(Debug)]
pub struct CommandSampler {
    program: String,
    args: Vec<String>,
}

impl CommandSampler {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    fn resolve(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file().then(|| program.to_path_buf());
        }
        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }
}

impl ColorSampler for CommandSampler {
    fn is_supported(&self) -> bool {
        self.resolve().is_some()
    }

    fn sample(&self, pick: &PickHandle) -> Result<Rgb, SamplingError> {
        let Some(program) = self.resolve() else {
            return Err(SamplingError::Unsupported);
        };
        if pick.is_cancelled() {
            return Err(SamplingError::Cancelled);
        }
        debug!(program = %program.display(), args = ?self.args, "running color picker");
        let mut child = Command::new(&program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| SamplingError::Failed(err.to_string()))?;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        {
            let mut state = pick.lock();
            if matches!(*state, PickerState::Cancelled) {
                drop(state);
                let _ = child.kill();
                let _ = child.wait();
                return Err(SamplingError::Cancelled);
            }
            *state = PickerState::Running(child);
        }

        // Pipes close once the picker exits or is killed.
        let stdout = read_pipe(stdout_pipe);
        let stderr = read_pipe(stderr_pipe);

        let mut child = {
            let mut state = pick.lock();
            match mem::take(&mut *state) {
                PickerState::Running(child) => child,
                PickerState::Idle | PickerState::Cancelled => {
                    *state = PickerState::Cancelled;
                    return Err(SamplingError::Cancelled);
                }
            }
        };
        let status = child
            .wait()
            .map_err(|err| SamplingError::Failed(err.to_string()))?;

        if !status.success() {
            let stderr = stderr.trim();
            if stderr.is_empty() && stdout.trim().is_empty() {
                return Err(SamplingError::Cancelled);
            }
            return Err(SamplingError::Failed(if stderr.is_empty() {
                status.to_string()
            } else {
                stderr.to_string()
            }));
        }

        find_hex(&stdout).ok_or_else(|| SamplingError::InvalidOutput(stdout.trim().to_string()))
    }
}

fn read_pipe(pipe: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// First `#` followed by exactly six hex digits.
fn find_hex(text: &str) -> Option<Rgb> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'#')
        .find_map(|(start, _)| {
            let digits = bytes.get(start + 1..start + 7)?;
            if !digits.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            if bytes.get(start + 7).is_some_and(u8::is_ascii_hexdigit) {
                return None;
            }
            text[start..start + 7].parse().ok()
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn finds_color_in_picker_output() {
        assert_eq!(find_hex("#A1b2C3\n"), Some(Rgb::new(0xa1, 0xb2, 0xc3)));
        assert_eq!(
            find_hex("rgb(1,2,3) hex: #010203 done"),
            Some(Rgb::new(1, 2, 3))
        );
        assert_eq!(find_hex("#12345 then #abcdef"), Some(Rgb::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn ignores_non_colors() {
        assert_eq!(find_hex(""), None);
        assert_eq!(find_hex("cancelled"), None);
        assert_eq!(find_hex("#1234567"), None);
        assert_eq!(find_hex("#gggggg"), None);
        assert_eq!(find_hex("#"), None);
    }

    #[test]
    fn no_sampler_is_unsupported() {
        assert!(!NoSampler.is_supported());
        assert_eq!(NoSampler.sample(&PickHandle::default()), Err(SamplingError::Unsupported));
    }

    #[test]
    fn empty_command_falls_back_to_no_sampler() {
        let config = SamplerConfig {
            command: Some("   ".to_string()),
            args: Vec::new(),
        };
        assert!(!from_config(&config).is_supported());
        assert!(!from_config(&SamplerConfig::default()).is_supported());
    }

    #[test]
    fn missing_program_is_unsupported() {
        let sampler = CommandSampler::new("./definitely/not/a/picker".to_string(), Vec::new());
        assert!(!sampler.is_supported());
        assert_eq!(
            sampler.sample(&PickHandle::default()),
            Err(SamplingError::Unsupported)
        );
    }

    #[cfg(unix)]
    pub(crate) mod unix {
        use std::thread;
        use std::time::{Duration, Instant};

        use super::*;

        pub(crate) fn wait_for_pid(pick: &PickHandle) -> u32 {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                if let Some(pid) = pick.running_pid() {
                    return pid;
                }
                assert!(Instant::now() < deadline, "picker never started");
                thread::sleep(Duration::from_millis(5));
            }
        }

        /// Reaped processes disappear from `/proc`; `kill -0` elsewhere.
        pub(crate) fn process_exists(pid: u32) -> bool {
            if Path::new("/proc").is_dir() {
                return Path::new(&format!("/proc/{pid}")).exists();
            }
            Command::new("kill")
                .args(["-0", &pid.to_string()])
                .stderr(Stdio::null())
                .status()
                .is_ok_and(|status| status.success())
        }

        pub(crate) fn sh(script: &str) -> CommandSampler {
            CommandSampler::new("sh".to_string(), vec!["-c".to_string(), script.to_string()])
        }

        fn run(script: &str) -> Result<Rgb, SamplingError> {
            sh(script).sample(&PickHandle::default())
        }

        #[test]
        fn reads_color_from_stdout() {
            let sampler = sh("echo '#C68642'");
            assert!(sampler.is_supported());
            assert_eq!(
                sampler.sample(&PickHandle::default()),
                Ok(Rgb::new(0xc6, 0x86, 0x42))
            );
        }

        #[test]
        fn silent_failure_means_cancelled() {
            assert_eq!(run("exit 1"), Err(SamplingError::Cancelled));
        }

        #[test]
        fn stderr_is_reported() {
            assert_eq!(
                run("echo 'no display' >&2; exit 2"),
                Err(SamplingError::Failed("no display".to_string()))
            );
        }

        #[test]
        fn garbage_output_is_invalid() {
            assert_eq!(
                run("echo red"),
                Err(SamplingError::InvalidOutput("red".to_string()))
            );
        }

        #[test]
        fn cancel_kills_running_picker() {
            let pick = PickHandle::default();
            let worker = {
                let pick = pick.clone();
                thread::spawn(move || sh("exec sleep 3").sample(&pick))
            };
            let pid = wait_for_pid(&pick);

            let started = Instant::now();
            pick.cancel();
            assert_eq!(worker.join().unwrap(), Err(SamplingError::Cancelled));
            assert!(started.elapsed() < Duration::from_secs(2));
            assert!(pick.running_pid().is_none());
            assert!(!process_exists(pid), "picker {pid} still running");
        }

        #[test]
        fn cancel_only_affects_its_own_pick() {
            let sampler = sh("echo '#123456'");
            let cancelled = PickHandle::default();
            cancelled.cancel();
            assert_eq!(sampler.sample(&cancelled), Err(SamplingError::Cancelled));
            assert_eq!(
                sampler.sample(&PickHandle::default()),
                Ok(Rgb::new(0x12, 0x34, 0x56))
            );
        }
    }
}
