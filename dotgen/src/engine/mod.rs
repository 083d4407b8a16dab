//! The render engine. It serializes a graph, resolves the layout program on
//! the search path, writes the DOT text to a temporary file, and invokes the
//! program with one `-T<format> -o<path>` pair per registered output type.

pub mod exec;

pub use exec::find_executable;

use crate::error::Error;
use crate::gv::Graph;
use std::io::Read;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// A requested render target: an output format name (`png`, `svg`, ...) and
/// the destination file path.
#[derive(Debug, Clone)]
pub struct OutputType {
    name: String,
    file_path: PathBuf,
}

impl OutputType {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            file_path: PathBuf::from(format!("graph.{}", name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Set the destination path of this output type.
    pub fn set_file_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.file_path = path.into();
    }
}

/// The engine that drives an external Graphviz-compatible program.
///
/// The invocation is synchronous: `render` blocks until the program exits,
/// or until the configured deadline passes.
#[derive(Debug, Clone)]
pub struct RenderEngine {
    types: Vec<OutputType>,
    layout: String,
    work_dir: PathBuf,
    fail_on_nonzero: bool,
    timeout: Option<Duration>,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine {
    /// Create the engine with a single `png` output type and the `dot`
    /// layout program.
    pub fn new() -> Self {
        Self {
            types: vec![OutputType::new("png")],
            layout: "dot".to_string(),
            work_dir: PathBuf::from("."),
            fail_on_nonzero: true,
            timeout: None,
        }
    }

    /// Set the layout program. Available Graphviz options are: dot, neato,
    /// fdp, sfdp, twopi, circo.
    pub fn layout(&mut self, name: &str) -> &mut Self {
        self.layout = name.to_string();
        self
    }

    /// Set the directory where the layout program will be executed.
    pub fn work_dir<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.work_dir = path.into();
        self
    }

    /// Choose whether a non-zero exit of the layout program is an error
    /// (the default) or is only logged while the call completes.
    pub fn fail_on_nonzero(&mut self, fail: bool) -> &mut Self {
        self.fail_on_nonzero = fail;
        self
    }

    /// Set a deadline on the layout program. Without one, a hung program
    /// hangs the caller.
    pub fn timeout(&mut self, limit: Duration) -> &mut Self {
        self.timeout = Some(limit);
        self
    }

    /// \return the registered output types, in insertion order.
    pub fn types(&self) -> &[OutputType] {
        &self.types
    }

    /// Register an output type, or \return the existing one with the same
    /// name.
    pub fn add_type(&mut self, name: &str) -> &mut OutputType {
        let existing = self.types.iter().position(|ty| ty.name == name);
        match existing {
            Some(idx) => &mut self.types[idx],
            None => {
                self.types.push(OutputType::new(name));
                self.types.last_mut().unwrap()
            }
        }
    }

    /// Remove an output type. At least one type must stay registered.
    pub fn remove_type(&mut self, name: &str) -> Result<&mut Self, Error> {
        if self.types.len() == 1 {
            return Err(Error::NoOutputType);
        }
        self.types.retain(|ty| ty.name != name);
        Ok(self)
    }

    /// Set the destination path of the output. Only valid while a single
    /// output type is registered, because the path cannot be matched to a
    /// type otherwise.
    pub fn to_file_path<P: Into<PathBuf>>(
        &mut self,
        path: P,
    ) -> Result<&mut Self, Error> {
        if self.types.len() > 1 {
            return Err(Error::AmbiguousOutputType);
        }
        self.types[0].file_path = path.into();
        Ok(self)
    }

    /// Serialize \p graph and run the layout program over it. The temporary
    /// DOT file is deleted when the call returns, on every path.
    pub fn render(&self, graph: &Graph) -> Result<(), Error> {
        let content = graph.output();
        let prog = exec::find_executable(&self.layout)?;
        let tmp = write_dot_temp(&content, ".dot")?;

        let mut cmd = Command::new(&prog);
        for ty in &self.types {
            cmd.arg(format!("-T{}", ty.name));
            cmd.arg(format!("-o{}", ty.file_path.display()));
        }
        cmd.arg(tmp.path());
        cmd.current_dir(&self.work_dir);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        let child = cmd.spawn()?;
        let (status, stderr) = self.wait_for(child)?;

        if !status.success() {
            if self.fail_on_nonzero {
                return Err(Error::RenderFailed {
                    program: self.layout.clone(),
                    status,
                    stderr,
                });
            }
            #[cfg(feature = "log")]
            log::error!(
                "{} failed with {}: {}",
                self.layout,
                status,
                stderr.trim_end()
            );
        }
        Ok(())
    }

    /// Wait for the child to exit and collect its standard error. With a
    /// deadline configured, the child is killed and reaped when the deadline
    /// passes. The stderr pipe is drained on a separate thread while we
    /// poll, so a program that fills the pipe buffer still makes progress
    /// and the deadline only fires for programs that genuinely hang.
    fn wait_for(&self, mut child: Child) -> Result<(ExitStatus, String), Error> {
        let limit = match self.timeout {
            None => {
                let out = child.wait_with_output()?;
                let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
                return Ok((out.status, stderr));
            }
            Some(limit) => limit,
        };

        let reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut stderr = String::new();
                let _ = pipe.read_to_string(&mut stderr);
                stderr
            })
        });

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                let stderr = match reader {
                    Some(handle) => handle.join().unwrap_or_default(),
                    None => String::new(),
                };
                return Ok((status, stderr));
            }
            if start.elapsed() >= limit {
                // Killing the child closes the pipe, which lets the reader
                // thread finish on its own.
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::RenderTimeout {
                    program: self.layout.clone(),
                    timeout: limit,
                });
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

/// Write the DOT text into a fresh temporary file with the fixed `graph`
/// prefix and the given suffix. Dropping the handle deletes the file.
fn write_dot_temp(
    content: &str,
    suffix: &str,
) -> Result<tempfile::NamedTempFile, Error> {
    let mut tmp = tempfile::Builder::new()
        .prefix("graph")
        .suffix(suffix)
        .tempfile()?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    Ok(tmp)
}
