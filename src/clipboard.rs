//! Copy-to-clipboard mechanisms and the fallback chain.
//!
//! A [`ClipboardChain`] tries each mechanism in order. Failures are logged
//! and the next mechanism is tried; only when every mechanism fails does
//! the caller see a [`ClipboardError`].

use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::error::ClipboardError;

pub trait Clipboard {
    /// Short name used in logs and error reports.
    fn name(&self) -> &str;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Pipes the text into an external clipboard tool (`wl-copy`, `pbcopy`, ...).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn wl_copy() -> Self {
        Self::new("wl-copy", &[])
    }

    pub fn xclip() -> Self {
        Self::new("xclip", &["-selection", "clipboard"])
    }

    pub fn xsel() -> Self {
        Self::new("xsel", &["--clipboard", "--input"])
    }

    pub fn pbcopy() -> Self {
        Self::new("pbcopy", &[])
    }

    pub fn clip_exe() -> Self {
        Self::new("clip.exe", &[])
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;
        // Taking stdin out of the child closes it when it drops, which
        // signals end of input.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.program)),
            None => Err(anyhow!("No stdin for {}", self.program)),
        };
        if let Err(err) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(err);
        }
        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// Asks the terminal to set the clipboard via the OSC 52 escape sequence.
/// Works over SSH, but the terminal may silently ignore it. A sink that is
/// not a terminal fails the copy.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
    terminal: bool,
}

impl<W: Write + IsTerminal> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        let terminal = out.is_terminal();
        Self { out, terminal }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Wrap a sink known to reach a terminal (e.g. a pty master).
    pub fn assume_terminal(out: W) -> Self {
        Self {
            out,
            terminal: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn name(&self) -> &str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if !self.terminal {
            bail!("output is not a terminal");
        }
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
            .context("Failed to write OSC 52 sequence")?;
        self.out.flush().context("Failed to flush OSC 52 sequence")?;
        Ok(())
    }
}

/// Ordered list of mechanisms; the first success wins.
#[derive(Default)]
pub struct ClipboardChain {
    mechanisms: Vec<Box<dyn Clipboard>>,
}

impl ClipboardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mechanism: impl Clipboard + 'static) -> Self {
        self.push(mechanism);
        self
    }

    pub fn push(&mut self, mechanism: impl Clipboard + 'static) {
        self.mechanisms.push(Box::new(mechanism));
    }

    pub fn len(&self) -> usize {
        self.mechanisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }

    /// Platform tools first, then the terminal escape sequence on stderr.
    pub fn system() -> Self {
        let mut chain = Self::new();
        if cfg!(target_os = "macos") {
            chain.push(CommandClipboard::pbcopy());
        } else if cfg!(target_os = "windows") {
            chain.push(CommandClipboard::clip_exe());
        } else {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                chain.push(CommandClipboard::wl_copy());
            }
            chain.push(CommandClipboard::xclip());
            chain.push(CommandClipboard::xsel());
        }
        chain.push(Osc52Clipboard::new(std::io::stderr()));
        chain
    }

    /// Copy `text`, returning the name of the mechanism that succeeded.
    pub fn copy(&mut self, text: &str) -> Result<String, ClipboardError> {
        if self.mechanisms.is_empty() {
            return Err(ClipboardError::NoMechanism);
        }
        let mut attempts = Vec::new();
        for m in &mut self.mechanisms {
            match m.write_text(text) {
                Ok(()) => {
                    debug!(mechanism = m.name(), "copied to clipboard");
                    return Ok(m.name().to_string());
                }
                Err(err) => {
                    warn!(mechanism = m.name(), error = %format!("{:#}", err), "clipboard mechanism failed, falling back");
                    attempts.push(format!("{}: {:#}", m.name(), err));
                }
            }
        }
        Err(ClipboardError::AllFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_writes_base64_payload() {
        let mut clip = Osc52Clipboard::assume_terminal(Vec::new());
        clip.write_text("★").unwrap();
        let out = String::from_utf8(clip.into_inner()).unwrap();
        assert_eq!(out, "\x1b]52;c;4piF\x07");
    }

    #[test]
    fn empty_chain_has_no_mechanism() {
        let err = ClipboardChain::new().copy("x").unwrap_err();
        assert!(matches!(err, ClipboardError::NoMechanism));
    }

    #[test]
    fn osc52_to_a_plain_file_fails_the_chain() {
        let file = tempfile::tempfile().unwrap();
        let mut chain = ClipboardChain::new().with(Osc52Clipboard::new(file));
        match chain.copy("★") {
            Err(ClipboardError::AllFailed { attempts }) => {
                assert_eq!(attempts, vec!["osc52: output is not a terminal".to_string()]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_that_ignores_input_reports_write_failure() {
        // `true` exits without reading; a payload larger than the pipe
        // buffer cannot be delivered.
        let mut clip = CommandClipboard::new("true", &[]);
        let err = clip.write_text(&"★".repeat(1 << 20)).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to write to true"));
    }
}
