//! Line-oriented source writer used by the emitters

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct CodeWriter {
    lines: Vec<String>,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one line at the current indentation
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), text));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        // Never two blank lines in a row
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
        self
    }

    /// Push `header {` and indent
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
        self
    }

    /// Push `line` as written and indent; pair with [`close_with`](Self::close_with)
    pub fn open_raw(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.line(line);
        self.depth += 1;
        self
    }

    /// Dedent and push `}`
    pub fn close(&mut self) -> &mut Self {
        self.close_with("}")
    }

    pub fn close_with(&mut self, text: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// `///` doc comment, one line per input line
    pub fn doc(&mut self, text: impl AsRef<str>) -> &mut Self {
        if text.as_ref().is_empty() {
            return self.line("///");
        }
        for line in text.as_ref().lines() {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {}", line));
            }
        }
        self
    }

    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_blocks_and_collapses_blanks() {
        let mut w = CodeWriter::new();
        w.doc("A thing");
        w.open("pub struct Thing");
        w.line("pub x: i32,");
        w.close();
        w.blank();
        w.blank();
        w.line("// end");
        w.blank();

        assert_eq!(
            w.finish(),
            "/// A thing\npub struct Thing {\n    pub x: i32,\n}\n\n// end\n"
        );
    }

    #[test]
    fn raw_open_keeps_the_line_as_written() {
        let mut w = CodeWriter::new();
        w.open_raw("pub const XS: &[i32] = &[");
        w.line("1,");
        w.close_with("];");

        assert_eq!(w.finish(), "pub const XS: &[i32] = &[\n    1,\n];\n");
    }
}
