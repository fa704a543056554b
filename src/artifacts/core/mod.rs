//! Shared output helpers

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over the minus pager
///
/// `log` and `global-log` write through it when stdout is a terminal; the
/// binary pages the collected output once the command returns.
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let repository = Repository::new(&pwd, Box::new(writer))?;
/// repository.global_log()?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
