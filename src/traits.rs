//! Seams between the declarative configuration and the outside world.
//!
//! The configuration itself is plain data.  The only thing `tilerc` ever
//! *does* is start processes (the autostart hook), and that goes through
//! [`Spawner`] so tests can record spawns instead of running them.

use std::path::Path;

/// Something that can start a detached child process.
///
/// # Contract
///
/// * [`spawn`](Spawner::spawn) returns as soon as the child has been
///   started; it does **not** wait for it to exit.
/// * The returned id is informational (logged), not a handle.
pub trait Spawner {
    /// The error type produced by this spawner.
    type Error: std::error::Error + Send + 'static;

    /// Start `program` with `args` and return its process id.
    fn spawn(&self, program: &Path, args: &[String]) -> Result<u32, Self::Error>;
}

/// [`Spawner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    type Error = std::io::Error;

    fn spawn(&self, program: &Path, args: &[String]) -> Result<u32, std::io::Error> {
        let child = std::process::Command::new(program).args(args).spawn()?;
        Ok(child.id())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    //  Recording spawner

    /// A test double that records every spawn request.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSpawner {
        pub(crate) log: RefCell<Vec<(PathBuf, Vec<String>)>>,
        pub(crate) fail: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock spawn failure")]
    pub(crate) struct MockError;

    impl Spawner for RecordingSpawner {
        type Error = MockError;

        fn spawn(&self, program: &Path, args: &[String]) -> Result<u32, MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.log
                .borrow_mut()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(4242)
        }
    }

    #[test]
    fn recording_spawner_records() {
        let s = RecordingSpawner::default();
        let pid = s.spawn(Path::new("/bin/true"), &["-x".into()]).unwrap();
        assert_eq!(pid, 4242);
        assert_eq!(s.log.borrow().len(), 1);
        assert_eq!(s.log.borrow()[0].0, PathBuf::from("/bin/true"));
    }

    #[test]
    fn failing_spawner_errors() {
        let s = RecordingSpawner {
            fail: true,
            ..Default::default()
        };
        assert!(s.spawn(Path::new("/bin/true"), &[]).is_err());
        assert!(s.log.borrow().is_empty());
    }
}
