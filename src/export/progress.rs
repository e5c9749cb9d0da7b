use console::Term;
use log::warn;

/// Progress markers on stdout: a banner, one dot per page, a final newline.
pub struct Progress {
    term: Option<Term>,
}

impl Progress {
    pub fn new(quiet: bool) -> Self {
        Self {
            term: (!quiet).then(Term::stdout),
        }
    }

    pub fn start(&self) {
        self.write("Downloading...");
    }

    pub fn page_done(&self) {
        self.write(".");
    }

    pub fn finish(&self) {
        self.write("\n");
    }

    fn write(&self, marker: &str) {
        if let Some(term) = &self.term {
            if let Err(e) = term.write_str(marker) {
                warn!("Failed to write progress marker: {}", e);
            }
        }
    }
}
